//! 核心業務邏輯（不是 ECS System）

pub mod animation;
pub mod board;
pub mod easing;
pub mod path;
pub mod render;
pub mod scheduler;
