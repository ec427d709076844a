//! 走法 → 動畫程式
//!
//! 編譯順序固定：移除王冠 → （原地升變 | 逐段移動，最後一段可能換位） → 攻擊。

use crate::codec::move_codec::Move;
use crate::domain::alias::Tick;
use crate::domain::constants::{BOARD_SIZE, KIND_DECROWN_FLAG};
use crate::domain::core_types::{Edge, MoveTarget, Position};
use crate::error::{AnimationError, BoardError, Result};
use crate::logic::board::Board;
use crate::logic::path::compute_path;
use std::collections::VecDeque;
use tracing::debug;

/// 單一動畫步驟，計時由排程器負責
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    Move { from: Position, to: Position },
    /// 同陣營兩枚棋子互換位置
    Swap { from: Position, to: Position },
    Attack { from: Position, to: Position },
    AddCrown(Position),
    RemoveCrown(Position),
}

/// 要播放的走法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub decrown: bool,
    pub origin: Position,
    pub target: MoveTarget,
}

impl MoveRequest {
    /// 從解碼後的走法推導動畫請求
    ///
    /// - `doRet`：目標是 `dest` 與其 `atkDir` 方向鄰格之間的邊
    /// - 其他：目標是 `dest`（`orig == dest` 即原地升變）
    pub fn from_move(mv: &Move) -> Result<Self> {
        let origin = mv.origin()?;
        let dest = mv.destination()?;
        let target = if mv.do_ret {
            let direction = mv.attack_direction()?;
            let attacked = dest.step(direction).ok_or(BoardError::OutOfBounds {
                x: dest.x,
                y: dest.y,
                size: BOARD_SIZE,
            })?;
            MoveTarget::Edge(Edge::new(dest, attacked)?)
        } else {
            MoveTarget::Cell(dest)
        };
        Ok(Self {
            decrown: mv.kind & KIND_DECROWN_FLAG != 0,
            origin,
            target,
        })
    }

    pub fn is_in_place(&self) -> bool {
        self.target == MoveTarget::Cell(self.origin)
    }
}

/// 編譯好的動畫：步驟佇列 + 每步 tick 數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationProgram {
    pub steps: VecDeque<AnimationStep>,
    pub ticks_per_step: Tick,
}

/// 每步 tick 數：`round(base / sqrt(n))`，至少 1
///
/// 路徑越長每段越快，總時間隨路徑長度次線性成長。
pub fn ticks_per_step(base_ticks: Tick, waypoint_count: usize) -> Tick {
    let scale = (waypoint_count.max(1) as f64).sqrt();
    let ticks = (f64::from(base_ticks) / scale).round() as Tick;
    ticks.max(1)
}

/// 依本地棋盤快照把走法編譯成動畫程式
///
/// # Fail fast 驗證：
/// - 起點必須有棋子
/// - `decrown` 時目標不可與起點相同
pub fn compile_animation(
    board: &Board,
    request: &MoveRequest,
    base_ticks: Tick,
) -> Result<AnimationProgram> {
    if base_ticks == 0 {
        return Err(AnimationError::ZeroTicks.into());
    }
    let origin = request.origin;
    let mover = board
        .piece_at(origin)
        .ok_or(AnimationError::NoPieceAtOrigin {
            x: origin.x,
            y: origin.y,
        })?;

    let mut steps = VecDeque::new();

    if request.decrown {
        if request.is_in_place() {
            return Err(AnimationError::DecrownInPlace {
                x: origin.x,
                y: origin.y,
            }
            .into());
        }
        steps.push_back(AnimationStep::RemoveCrown(origin));
    }

    if request.is_in_place() {
        steps.push_back(AnimationStep::AddCrown(origin));
        debug!(?origin, "compiled promote-in-place animation");
        return Ok(AnimationProgram {
            steps,
            ticks_per_step: ticks_per_step(base_ticks, 1),
        });
    }

    let path = compute_path(board, origin, request.target)?;
    for pair in path.waypoints.windows(2) {
        steps.push_back(AnimationStep::Move {
            from: pair[0],
            to: pair[1],
        });
    }

    // 終點有同陣營棋子：最後一段改為換位
    let destination = path.destination();
    let is_same_side = board
        .piece_at(destination)
        .is_some_and(|piece| piece.color == mover.color);
    if destination != origin && is_same_side {
        if let Some(AnimationStep::Move { from, to }) = steps.back().copied() {
            steps.pop_back();
            steps.push_back(AnimationStep::Swap { from, to });
        }
    }

    if let Some(attacked) = path.attacked {
        steps.push_back(AnimationStep::Attack {
            from: destination,
            to: attacked,
        });
    }

    let ticks = ticks_per_step(base_ticks, path.waypoints.len());
    debug!(
        ?origin,
        target = ?request.target,
        steps = steps.len(),
        ticks_per_step = ticks,
        "compiled animation"
    );
    Ok(AnimationProgram {
        steps,
        ticks_per_step: ticks,
    })
}
