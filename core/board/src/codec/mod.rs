//! 與原生引擎交換的緊湊編碼

pub mod board_codec;
pub mod move_codec;
