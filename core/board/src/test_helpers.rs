//! 測試輔助：記錄呼叫並回傳預先設定結果的記憶體內引擎
//!
//! `EngineLog` 以 `Rc<RefCell<_>>` 共享，引擎被 `EngineBoard` 取得所有權（甚至 drop）
//! 之後測試仍可檢查紀錄。

use crate::codec::board_codec::{decode_into, encode_board};
use crate::codec::move_codec::Move;
use crate::domain::alias::{CellIndex, PackedMove, RawHandle};
use crate::domain::constants::KIND_DECROWN_FLAG;
use crate::domain::core_types::Edge;
use crate::engine::EngineBackend;
use crate::error::{BoardError, Result};
use crate::logic::board::Board;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// 引擎呼叫紀錄與引擎端狀態
#[derive(Debug, Default)]
pub struct EngineLog {
    pub init_alloc_calls: usize,
    pub created_handles: Vec<RawHandle>,
    pub destroyed_handles: Vec<RawHandle>,
    /// 每次 `init_board_from_str` 收到的原始 bytes
    pub pushed: Vec<Vec<u8>>,
    /// 每次 `apply_move` 收到的打包走法
    pub applied: Vec<u32>,
    pub pull_count: usize,
    /// 引擎端棋盤，測試可以直接修改來模擬規則引擎的結果
    pub state: Board,
    pub legal_moves: HashMap<CellIndex, Vec<u32>>,
    pub all_moves: HashMap<CellIndex, Vec<PackedMove>>,
    pub computer_moves: VecDeque<PackedMove>,
    pub play_out_result: i8,
}

/// 腳本化的引擎
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    log: Rc<RefCell<EngineLog>>,
    next_handle: RawHandle,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 共享的呼叫紀錄
    pub fn log(&self) -> Rc<RefCell<EngineLog>> {
        Rc::clone(&self.log)
    }

    pub fn with_legal_moves(self, cell: CellIndex, moves: &[Move]) -> Self {
        let packed = moves.iter().filter_map(|mv| mv.to_wire().ok()).collect();
        self.log.borrow_mut().legal_moves.insert(cell, packed);
        self
    }

    /// 原樣回傳的列表，可以包含 0 結尾
    pub fn with_all_moves(self, cell: CellIndex, packed: Vec<PackedMove>) -> Self {
        self.log.borrow_mut().all_moves.insert(cell, packed);
        self
    }

    pub fn with_computer_move(self, mv: Move) -> Self {
        if let Ok(packed) = mv.encode() {
            self.log.borrow_mut().computer_moves.push_back(packed);
        }
        self
    }

    pub fn with_play_out_result(self, result: i8) -> Self {
        self.log.borrow_mut().play_out_result = result;
        self
    }
}

/// 簡化的走法套用：足以讓引擎端狀態與動畫結果一致，不檢查合法性
pub fn apply_naive(board: &mut Board, mv: &Move) -> Result<()> {
    let origin = mv.origin()?;
    let dest = mv.destination()?;
    if mv.kind & KIND_DECROWN_FLAG != 0 {
        board.set_regalia(origin, false)?;
    }

    if origin == dest && !mv.do_ret {
        board.set_regalia(origin, true)?;
        return Ok(());
    }
    if origin != dest {
        let mover = board
            .piece_at(origin)
            .ok_or(BoardError::EmptyCell {
                x: origin.x,
                y: origin.y,
            })?;
        let is_same_side = board
            .piece_at(dest)
            .is_some_and(|piece| piece.color == mover.color);
        if is_same_side {
            board.swap_pieces(origin, dest)?;
        } else {
            board.move_piece(origin, dest)?;
        }
    }
    if mv.do_ret {
        let direction = mv.attack_direction()?;
        if let Some(attacked) = dest.step(direction) {
            board.lock_edge(Edge::new(dest, attacked)?)?;
        }
    }
    Ok(())
}

impl EngineBackend for ScriptedEngine {
    fn init_alloc(&mut self) {
        self.log.borrow_mut().init_alloc_calls += 1;
    }

    fn new_board_handle(&mut self) -> RawHandle {
        self.next_handle += 1;
        self.log.borrow_mut().created_handles.push(self.next_handle);
        self.next_handle
    }

    fn destroy_board_handle(&mut self, handle: RawHandle) {
        self.log.borrow_mut().destroyed_handles.push(handle);
    }

    fn init_board_from_str(&mut self, _handle: RawHandle, encoded: &[u8]) {
        let mut log = self.log.borrow_mut();
        log.pushed.push(encoded.to_vec());
        let mut state = Board::default();
        if decode_into(&mut state, encoded).is_ok() {
            log.state = state;
        }
    }

    fn gen_init_str(&mut self, _handle: RawHandle) -> Vec<u8> {
        let mut log = self.log.borrow_mut();
        log.pull_count += 1;
        let mut encoded = encode_board(&log.state).into_bytes();
        encoded.extend_from_slice(b"zz");
        encoded
    }

    fn apply_move(&mut self, _handle: RawHandle, packed: u32) {
        let mut log = self.log.borrow_mut();
        log.applied.push(packed);
        let mv = Move::decode(PackedMove::from(packed));
        // 不合法的走法讓引擎端保持原狀
        let mut next = log.state.clone();
        if apply_naive(&mut next, &mv).is_ok() {
            log.state = next;
        }
    }

    fn gen_moves(&mut self, _handle: RawHandle, cell: CellIndex) -> Vec<u32> {
        self.log
            .borrow()
            .legal_moves
            .get(&cell)
            .cloned()
            .unwrap_or_default()
    }

    fn gen_all_moves(&mut self, _handle: RawHandle, cell: CellIndex) -> Vec<PackedMove> {
        self.log
            .borrow()
            .all_moves
            .get(&cell)
            .cloned()
            .unwrap_or_default()
    }

    fn play_out_board(&mut self, _handle: RawHandle) -> i8 {
        self.log.borrow().play_out_result
    }

    fn comp_move(&mut self, _handle: RawHandle) -> PackedMove {
        self.log
            .borrow_mut()
            .computer_moves
            .pop_front()
            .unwrap_or_default()
    }
}
