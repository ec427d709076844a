//! 動畫插值與緩動曲線
//!
//! 所有曲線輸入 `t ∈ [0, 1]`。

use crate::domain::core_types::RenderPosition;

/// 對稱的 ease-in-out：前半 `2t²`，後半鏡射
pub fn smooth(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

/// 只有 ease-in
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// 單峰曲線，`t = 0.5` 時達到 1，兩端為 0
pub fn bump(t: f32) -> f32 {
    let centered = 2.0 * t - 1.0;
    1.0 - centered * centered
}

pub fn lerp_scalar(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

pub fn lerp_position(from: RenderPosition, to: RenderPosition, t: f32) -> RenderPosition {
    RenderPosition {
        x: lerp_scalar(from.x, to.x, t),
        y: lerp_scalar(from.y, to.y, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_curve_endpoints() {
        for (name, curve, start, end) in [
            ("smooth", smooth as fn(f32) -> f32, 0.0, 1.0),
            ("ease_in", ease_in, 0.0, 1.0),
            ("bump", bump, 0.0, 0.0),
        ] {
            assert!((curve(0.0) - start).abs() < EPSILON, "{name}(0)");
            assert!((curve(1.0) - end).abs() < EPSILON, "{name}(1)");
        }
        assert!((smooth(0.5) - 0.5).abs() < EPSILON);
        assert!((bump(0.5) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_smooth_is_symmetric_and_monotonic() {
        let mut previous = 0.0;
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let value = smooth(t);
            assert!(value >= previous, "smooth 應單調遞增 t={t}");
            assert!((value + smooth(1.0 - t) - 1.0).abs() < 1e-5, "t={t}");
            previous = value;
        }
    }
}
