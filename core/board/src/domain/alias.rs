//! 型別別名

/// 棋盤座標（0..9）
pub type Coord = usize;

/// 格子索引（`row * 9 + col`，走法中以 7 bits 表示）
pub type CellIndex = u8;

/// 動畫 tick 計數
pub type Tick = u32;

/// 打包後的走法（31 bits，以 u64 承載）
pub type PackedMove = u64;

/// 原生引擎的棋盤 handle（不透明）
pub type RawHandle = u64;
