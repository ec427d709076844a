use board::constants::{BOARD_SIZE, DEFAULT_SETUP};
use board::domain::core_types::{Color, PieceKind, Position};
use board::error::{ErrorKind, LoadError};
use board::loader::{load_config, load_from_ascii, parse_setup};
use board::loader_schema::ClientConfig;
use std::time::Duration;

#[test]
fn test_default_setup() {
    let board = parse_setup(&DEFAULT_SETUP).expect("parse_setup 應成功");

    let pieces: Vec<_> = board
        .iter_cells()
        .filter_map(|(pos, cell)| cell.piece.map(|piece| (pos, piece)))
        .collect();
    assert_eq!(pieces.len(), 24, "每方 12 枚棋子");

    // (位置, 兵種, 陣營)
    let test_data = [
        (Position::new(4, 0), PieceKind::King, Color::White),
        (Position::new(4, 8), PieceKind::King, Color::Black),
        (Position::new(1, 0), PieceKind::Cavalry, Color::White),
        (Position::new(7, 8), PieceKind::Cavalry, Color::Black),
        (Position::new(3, 0), PieceKind::Artillery, Color::White),
        (Position::new(4, 1), PieceKind::Infantry, Color::White),
        (Position::new(5, 6), PieceKind::Infantry, Color::Black),
    ];
    for (pos, kind, color) in test_data {
        let piece = board.piece_at(pos).expect("應有棋子");
        assert_eq!(piece.kind, kind, "{pos:?} 兵種");
        assert_eq!(piece.color, color, "{pos:?} 陣營");
        assert!(!piece.regalia, "初始棋子不戴冠");
    }

    // 黑方是白方的上下鏡射
    for (pos, piece) in pieces {
        let mirror = Position::new(pos.x, BOARD_SIZE - 1 - pos.y);
        let other = board.piece_at(mirror).expect("鏡射位置應有棋子");
        assert_eq!(other.kind, piece.kind);
        assert_ne!(other.color, piece.color);
    }
}

#[test]
fn test_asymmetric_setup_is_rejected() {
    let rows = [" ci.aka.ic ", "   .cic.   ", "   .i  .i  "];
    let err = parse_setup(&rows).expect_err("不對稱的佈局應失敗");
    assert!(
        matches!(
            err.kind(),
            ErrorKind::Load(LoadError::AsymmetricSetup {
                row: 2,
                col: 3,
                mirror: 5,
                left: 'i',
                right: ' ',
            })
        ),
        "應在第 2 列失敗，實際 {err}"
    );
}

#[test]
fn test_malformed_setup() {
    // (佈局, 說明)
    let test_data: [(&[&str], &str); 3] = [
        (&[" ci.aka.ic"], "欄數不足"),
        (&["   .q q.   "], "未知符號"),
        (&["    i    "; 5], "列數過多"),
    ];
    for (rows, description) in test_data {
        let err = parse_setup(rows).expect_err(description);
        assert!(
            matches!(err.kind(), ErrorKind::Load(LoadError::ParseError(_))),
            "{description} 應為 ParseError，實際 {err}"
        );
    }
}

#[test]
fn test_load_config() {
    let config = load_config("").expect("空設定應使用預設值");
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.base_ticks_per_step, 30);
    assert_eq!(config.tick_interval(), Duration::from_secs_f64(1.0 / 60.0));

    let config = load_config(
        r#"
        base_ticks_per_step = 12
        tick_rate_hz = 30
        setup = ["    k    "]
        "#,
    )
    .expect("load_config 應成功");
    assert_eq!(config.base_ticks_per_step, 12);
    assert_eq!(config.tick_rate_hz, 30);
    assert!((config.attack_lunge - 0.3).abs() < f32::EPSILON, "未指定的欄位用預設值");
    assert_eq!(config.setup, vec!["    k    ".to_string()]);
}

#[test]
fn test_load_config_failures() {
    let err = load_config("base_ticks_per_step = \"fast\"").expect_err("型別錯誤應失敗");
    assert!(matches!(
        err.kind(),
        ErrorKind::Load(LoadError::DeserializeError { .. })
    ));

    for invalid in [
        "base_ticks_per_step = 0",
        "tick_rate_hz = 0",
        "attack_lunge = 1.5",
    ] {
        let err = load_config(invalid).expect_err(invalid);
        assert!(
            matches!(err.kind(), ErrorKind::Load(LoadError::InvalidConfig(_))),
            "{invalid} 應為 InvalidConfig，實際 {err}"
        );
    }

    let err = load_config(r#"setup = [" ci.aka.ci "]"#).expect_err("不對稱佈局應失敗");
    assert!(matches!(
        err.kind(),
        ErrorKind::Load(LoadError::AsymmetricSetup {
            row: 0,
            col: 1,
            mirror: 7,
            left: 'c',
            right: 'i',
        })
    ));
}

#[test]
fn test_load_from_ascii_markers() {
    let (board, markers) = load_from_ascii(
        "
        wi:S .  E
        .    bk E
        ",
    )
    .expect("load_from_ascii 應成功");

    assert_eq!(markers["S"], vec![Position::new(0, 0)]);
    assert_eq!(markers["E"], vec![Position::new(2, 0), Position::new(2, 1)]);
    assert!(board.piece_at(Position::new(0, 0)).is_some(), "標記不影響棋子");
    assert_eq!(
        board.piece_at(Position::new(1, 1)).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert!(board.piece_at(Position::new(2, 0)).is_none(), "純標記為空格");

    load_from_ascii("").expect_err("空棋盤應失敗");
    load_from_ascii(". . . . . . . . . .").expect_err("超過 9 欄應失敗");
    load_from_ascii("wq:S").expect_err("無效棋子應失敗");
}
