use board::codec::move_codec::{Move, MoveField, PACKED_MOVE_BITS};
use board::domain::core_types::{Direction, Position};
use board::error::{CodecError, ErrorKind};
use rand::Rng;
use strum::IntoEnumIterator;

fn max_move() -> Move {
    Move {
        kind: 0b111,
        orig: 127,
        dest: 127,
        atk_dir: 0b11,
        do_ret: true,
        cap_piece: 0b11,
        cap_reg: true,
        orig_lock: 0b1111,
        dest_lock: 0b1111,
    }
}

#[test]
fn test_max_width_values() {
    let packed = max_move().encode().expect("最大值應可編碼");
    assert_eq!(packed, (1 << PACKED_MOVE_BITS) - 1, "所有 31 bits 應為 1");
    assert_eq!(Move::decode(packed), max_move());
    assert_eq!(
        max_move().to_wire().expect("to_wire 應成功"),
        0x7FFF_FFFF,
        "u32 形式不應遺失位元"
    );
}

#[test]
fn test_field_overflow_is_rejected() {
    // (走法, 預期溢位的欄位)
    let test_data = [
        (
            Move {
                kind: 8,
                ..Default::default()
            },
            "kind",
        ),
        (
            Move {
                orig: 128,
                ..Default::default()
            },
            "orig",
        ),
        (
            Move {
                atk_dir: 4,
                ..Default::default()
            },
            "atkDir",
        ),
        (
            Move {
                cap_piece: 4,
                ..Default::default()
            },
            "capPiece",
        ),
        (
            Move {
                dest_lock: 16,
                ..Default::default()
            },
            "destLock",
        ),
    ];

    for (mv, expected_field) in test_data {
        let err = mv.encode().expect_err("超出寬度應失敗");
        match err.kind() {
            ErrorKind::Codec(CodecError::FieldOverflow { field, .. }) => {
                assert_eq!(*field, expected_field, "溢位欄位應為 {expected_field}");
            }
            other => panic!("應為 FieldOverflow，實際 {other:?}"),
        }
        mv.to_wire().expect_err("to_wire 也應失敗");
    }
}

#[test]
fn test_decode_ignores_bits_above_31() {
    let packed = max_move().encode().expect("encode 應成功");
    assert_eq!(Move::decode(packed | (0xFF << 31)), max_move());
}

#[test]
fn test_decode_encode_is_identity_on_31_bits() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let packed = rng.random_range(0..(1u64 << PACKED_MOVE_BITS));
        let mv = Move::decode(packed);
        assert_eq!(mv.encode().expect("解碼結果必定在寬度內"), packed);
    }
}

#[test]
fn test_field_offsets() {
    let mut offset = 0;
    for field in MoveField::iter() {
        let packed = 1u64 << offset;
        let mv = Move::decode(packed);
        let expected = Move::decode(0);
        assert_ne!(mv, expected, "欄位 {} 的最低位應在 bit {offset}", field.name());
        offset += field.width();
    }
    assert_eq!(offset, PACKED_MOVE_BITS);
}

#[test]
fn test_move_positions() {
    let mv = Move {
        orig: 21,
        dest: 39,
        atk_dir: 3,
        ..Default::default()
    };
    assert_eq!(mv.origin().expect("origin"), Position::new(3, 2));
    assert_eq!(mv.destination().expect("destination"), Position::new(3, 4));
    assert_eq!(mv.attack_direction().expect("atk_dir"), Direction::Up);

    let off_board = Move {
        orig: 81,
        ..Default::default()
    };
    let err = off_board.origin().expect_err("81 不在棋盤上");
    assert!(matches!(
        err.kind(),
        ErrorKind::Codec(CodecError::CellIndexOutOfRange { index: 81 })
    ));
}
