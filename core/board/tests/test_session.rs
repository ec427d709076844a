use board::codec::board_codec::encode_board;
use board::codec::move_codec::Move;
use board::constants::DEFAULT_SETUP;
use board::domain::core_types::{Color, Piece, PieceKind, Position};
use board::engine::EngineBackend;
use board::error::{AnimationError, ErrorKind};
use board::loader::parse_setup;
use board::loader_schema::ClientConfig;
use board::session::GameSession;
use board::test_helpers::ScriptedEngine;

/// 白方步兵 (3, 2) → (3, 4)
fn advance() -> Move {
    Move {
        orig: 21,
        dest: 39,
        ..Default::default()
    }
}

fn drain<E: EngineBackend>(session: &mut GameSession<E>) -> usize {
    let mut ticks = 0;
    while session.animation().is_animating() {
        session.tick().expect("tick 應成功");
        ticks += 1;
        assert!(ticks < 1000, "動畫應在有限 tick 內結束");
    }
    ticks
}

#[test]
fn test_new_session_pushes_setup() {
    let engine = ScriptedEngine::new();
    let log = engine.log();
    let session = GameSession::new(engine, ClientConfig::default()).expect("建立 session 應成功");

    let expected = parse_setup(&DEFAULT_SETUP).expect("parse_setup 應成功");
    {
        let log = log.borrow();
        assert_eq!(log.init_alloc_calls, 1);
        assert_eq!(log.created_handles, vec![session.engine().handle()]);
        assert_eq!(log.pushed, vec![encode_board(&expected).into_bytes()]);
    }
    assert_eq!(session.board(), &expected);
    assert_eq!(session.render_state().pieces.len(), 24);
    assert!(!session.is_sync_pending());
}

#[test]
fn test_play_animates_then_pulls() {
    let engine = ScriptedEngine::new();
    let log = engine.log();
    let mut session = GameSession::new(engine, ClientConfig::default()).expect("建立 session 應成功");

    session.play(&advance()).expect("play 應成功");
    assert_eq!(
        log.borrow().applied,
        vec![advance().to_wire().expect("to_wire 應成功")]
    );
    assert!(session.is_sync_pending());

    session.tick().expect("tick 應成功");
    assert_eq!(log.borrow().pull_count, 0, "動畫中不拉取");
    assert!(
        session.board().piece_at(Position::new(3, 2)).is_some(),
        "步驟結束前本地快照不變"
    );

    // 引擎端的結果可能與本地推算不同，最後以引擎為準
    log.borrow_mut()
        .state
        .place(Position::new(4, 4), Piece::new(PieceKind::King, Color::Black))
        .expect("place 應成功");

    let ticks = drain(&mut session);
    assert_eq!(ticks + 1, 21, "兩個路徑點每步 21 tick");
    assert_eq!(log.borrow().pull_count, 1, "播完後拉取一次");
    assert!(!session.is_sync_pending());

    assert_eq!(session.board(), &log.borrow().state, "本地快照應與引擎一致");
    assert!(session.board().piece_at(Position::new(3, 2)).is_none());
    assert!(session.board().piece_at(Position::new(3, 4)).is_some());
    assert!(
        session
            .render_state()
            .piece_index_at(Position::new(4, 4))
            .is_some(),
        "渲染清單應由拉取後的棋盤重新產生"
    );

    session.tick().expect("閒置 tick 應成功");
    assert_eq!(log.borrow().pull_count, 1, "閒置時不再拉取");
}

#[test]
fn test_play_rejected_while_animating() {
    let engine = ScriptedEngine::new();
    let log = engine.log();
    let mut session = GameSession::new(engine, ClientConfig::default()).expect("建立 session 應成功");

    session.play(&advance()).expect("play 應成功");
    let second = Move {
        orig: 23,
        dest: 41,
        ..Default::default()
    };
    let err = session.play(&second).expect_err("動畫中應拒絕");
    assert!(matches!(
        err.kind(),
        ErrorKind::Animation(AnimationError::Busy)
    ));
    assert_eq!(log.borrow().applied.len(), 1, "被拒絕的走法不送交引擎");

    drain(&mut session);
    session.play(&second).expect("播完後應可再走");
    assert_eq!(log.borrow().applied.len(), 2);
}

#[test]
fn test_invalid_move_is_not_applied() {
    let engine = ScriptedEngine::new();
    let log = engine.log();
    let mut session = GameSession::new(engine, ClientConfig::default()).expect("建立 session 應成功");

    // (4, 4) 沒有棋子
    let empty_origin = Move {
        orig: 40,
        dest: 41,
        ..Default::default()
    };
    let err = session.play(&empty_origin).expect_err("起點沒有棋子應失敗");
    assert!(matches!(
        err.kind(),
        ErrorKind::Animation(AnimationError::NoPieceAtOrigin { x: 4, y: 4 })
    ));
    assert!(log.borrow().applied.is_empty(), "編譯失敗時不送交引擎");
    assert!(!session.animation().is_animating());
}

#[test]
fn test_engine_move_lists() {
    let first = advance();
    let second = Move {
        orig: 21,
        dest: 22,
        ..Default::default()
    };
    let engine = ScriptedEngine::new()
        .with_legal_moves(21, &[first, second])
        .with_all_moves(
            21,
            vec![
                first.encode().expect("encode 應成功"),
                0,
                second.encode().expect("encode 應成功"),
            ],
        )
        .with_play_out_result(-1);
    let mut session = GameSession::new(engine, ClientConfig::default()).expect("建立 session 應成功");

    let moves = session
        .legal_moves(Position::new(3, 2))
        .expect("legal_moves 應成功");
    assert_eq!(moves, vec![first, second]);

    let moves = session
        .all_moves(Position::new(3, 2))
        .expect("all_moves 應成功");
    assert_eq!(moves, vec![first], "0 之後的項目應被忽略");

    assert!(session.legal_moves(Position::new(4, 4)).expect("空格").is_empty());
    session
        .legal_moves(Position::new(9, 0))
        .expect_err("棋盤外應失敗");

    assert_eq!(session.play_out(), -1);
}

#[test]
fn test_computer_move_is_played() {
    let engine = ScriptedEngine::new().with_computer_move(advance());
    let log = engine.log();
    let mut session = GameSession::new(engine, ClientConfig::default()).expect("建立 session 應成功");

    let mv = session.computer_move().expect("computer_move 應成功");
    assert_eq!(mv, advance());
    assert!(session.animation().is_animating());

    drain(&mut session);
    assert!(
        session.board().piece_at(Position::new(3, 4)).is_some(),
        "電腦的走法應被播放並同步"
    );
    assert_eq!(log.borrow().applied.len(), 1);
}

#[test]
fn test_handle_destroyed_on_drop() {
    let engine = ScriptedEngine::new();
    let log = engine.log();
    let session = GameSession::new(engine, ClientConfig::default()).expect("建立 session 應成功");
    let handle = session.engine().handle();

    assert!(log.borrow().destroyed_handles.is_empty());
    drop(session);
    assert_eq!(log.borrow().destroyed_handles, vec![handle], "drop 時應釋放 handle");
}
