//! 遊戲常數定義

use crate::domain::alias::{Coord, Tick};

/// 棋盤邊長
pub const BOARD_SIZE: Coord = 9;

/// 棋盤格數
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 完整棋盤編碼長度：81 格棋子 + 81 格鎖定
pub const ENCODED_STATE_LEN: usize = CELL_COUNT * 2;

/// 編碼字母表起點，`'a' + v` 表示數值 v
pub const CODE_BASE: u8 = b'a';

/// 空格 / 無鎖定
pub const EMPTY_CODE: u8 = b'z';

/// 走法 `kind` 欄位中表示「移除王冠」的旗標位
pub const KIND_DECROWN_FLAG: u8 = 0b100;

/// 原生引擎單次回傳的走法數上限
pub const MAX_MOVE_LIST_LEN: usize = 100;

/// 每步動畫的基礎 tick 數
pub const DEFAULT_BASE_TICKS: Tick = 30;

/// 預設固定 tick 頻率
pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

/// 攻擊時前衝的距離（格）
pub const DEFAULT_ATTACK_LUNGE: f32 = 0.3;

/// 初始佈局最多列數（第 r 列鏡射到 8 − r，不可重疊）
pub const MAX_SETUP_ROWS: usize = 4;

/// 預設初始佈局（白方在上，黑方鏡射）
pub const DEFAULT_SETUP: [&str; 3] = [" ci.aka.ic ", "   .cic.   ", "   .i i.   "];
