//! 棋盤字串編解碼
//!
//! 格式：81 個棋子字元 + 81 個鎖定字元，`'a' + v` 表示數值 v，`'z'` 表示空。
//! - 棋子：`v = regalia << 3 | color << 2 | kind`
//! - 鎖定：`v` 即 2-bit 鎖定遮罩
//!
//! 超過 162 bytes 的部分只能是填充（`'z'`、NUL 或空白）。

use crate::domain::constants::{CELL_COUNT, CODE_BASE, EMPTY_CODE, ENCODED_STATE_LEN};
use crate::domain::core_types::{Cell, Color, LockMask, Piece, PieceKind};
use crate::error::{CodecError, Result};
use crate::logic::board::Board;

const REGALIA_BIT: u8 = 0b1000;
const COLOR_BIT: u8 = 0b0100;
const KIND_MASK: u8 = 0b0011;

/// 編碼整個棋盤（162 個 ASCII 字元）
pub fn encode_board(board: &Board) -> String {
    let cells: Vec<&Cell> = board.iter_cells().map(|(_, cell)| cell).collect();

    let mut encoded = String::with_capacity(ENCODED_STATE_LEN);
    encoded.extend(cells.iter().map(|cell| char::from(encode_piece(cell.piece))));
    encoded.extend(cells.iter().map(|cell| char::from(encode_locks(cell.locks))));
    encoded
}

/// 解碼成新的棋盤
pub fn decode_board(encoded: &[u8]) -> Result<Board> {
    let mut board = Board::default();
    decode_into(&mut board, encoded)?;
    Ok(board)
}

/// 就地寫入既有棋盤（不重新配置）
///
/// 先驗證全部內容再寫入，失敗時棋盤保持原樣。每一格都會被覆寫，`'z'` 會清空該格。
pub fn decode_into(board: &mut Board, encoded: &[u8]) -> Result<()> {
    if encoded.len() < ENCODED_STATE_LEN {
        return Err(CodecError::InvalidLength {
            expected: ENCODED_STATE_LEN,
            actual: encoded.len(),
        }
        .into());
    }

    let (piece_codes, rest) = encoded.split_at(CELL_COUNT);
    let (lock_codes, padding) = rest.split_at(CELL_COUNT);

    if let Some(offset) = padding.iter().position(|&b| !is_padding(b)) {
        return Err(CodecError::InvalidPadding {
            index: ENCODED_STATE_LEN + offset,
            byte: padding[offset],
        }
        .into());
    }

    let mut decoded = [Cell::default(); CELL_COUNT];
    for (index, slot) in decoded.iter_mut().enumerate() {
        slot.piece = decode_piece(index, piece_codes[index])?;
        slot.locks = decode_locks(index, lock_codes[index])?;
    }

    for (cell, value) in board.cells_mut().zip(decoded) {
        *cell = value;
    }
    Ok(())
}

fn encode_piece(piece: Option<Piece>) -> u8 {
    match piece {
        None => EMPTY_CODE,
        Some(piece) => {
            let mut value = piece.kind as u8;
            if piece.color == Color::Black {
                value |= COLOR_BIT;
            }
            if piece.regalia {
                value |= REGALIA_BIT;
            }
            CODE_BASE + value
        }
    }
}

fn encode_locks(locks: LockMask) -> u8 {
    if locks.is_empty() {
        EMPTY_CODE
    } else {
        CODE_BASE + locks.bits()
    }
}

fn decode_piece(index: usize, byte: u8) -> Result<Option<Piece>> {
    if byte == EMPTY_CODE {
        return Ok(None);
    }
    let invalid = || CodecError::InvalidCellCode { index, byte };
    let value = byte.checked_sub(CODE_BASE).ok_or_else(invalid)?;
    if value > REGALIA_BIT | COLOR_BIT | KIND_MASK {
        return Err(invalid().into());
    }

    let kind = PieceKind::from_repr(value & KIND_MASK).ok_or_else(invalid)?;
    let color = if value & COLOR_BIT != 0 {
        Color::Black
    } else {
        Color::White
    };
    Ok(Some(Piece {
        kind,
        color,
        regalia: value & REGALIA_BIT != 0,
    }))
}

fn decode_locks(index: usize, byte: u8) -> Result<LockMask> {
    if byte == EMPTY_CODE {
        return Ok(LockMask::default());
    }
    byte.checked_sub(CODE_BASE)
        .and_then(LockMask::from_bits)
        .ok_or_else(|| CodecError::InvalidLockCode { index, byte }.into())
}

fn is_padding(byte: u8) -> bool {
    byte == EMPTY_CODE || byte == 0 || byte.is_ascii_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_code_table() {
        // (棋子, 預期字元)
        let test_data = [
            (Piece::new(PieceKind::Infantry, Color::White), b'a'),
            (Piece::new(PieceKind::King, Color::White), b'd'),
            (Piece::new(PieceKind::Infantry, Color::Black), b'e'),
            (
                Piece {
                    kind: PieceKind::Artillery,
                    color: Color::Black,
                    regalia: true,
                },
                b'o',
            ),
        ];
        for (piece, expected) in test_data {
            assert_eq!(encode_piece(Some(piece)), expected, "{piece:?}");
            assert_eq!(decode_piece(0, expected).unwrap(), Some(piece));
        }
        assert_eq!(encode_piece(None), b'z');
    }

    #[test]
    fn test_lock_code_rejects_wide_mask() {
        assert_eq!(decode_locks(0, b'd').unwrap().bits(), 3);
        assert!(decode_locks(0, b'e').is_err());
        assert!(decode_locks(0, b'A').is_err());
    }
}
