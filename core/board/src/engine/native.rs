//! 連結 `engine` 動態庫的實作
//!
//! 走法列表以「寫入數量」回傳，不再掃描 0 結尾。

use super::EngineBackend;
use crate::domain::alias::{CellIndex, RawHandle};
use crate::domain::constants::{ENCODED_STATE_LEN, MAX_MOVE_LIST_LEN};
use std::sync::Once;

#[link(name = "engine")]
unsafe extern "C" {
    fn engine_init_alloc();
    fn engine_new_board_handle() -> RawHandle;
    fn engine_destroy_board_handle(handle: RawHandle);
    fn engine_init_board_from_str(handle: RawHandle, encoded: *const u8, len: usize);
    fn engine_gen_init_str(handle: RawHandle, out: *mut u8, capacity: usize);
    fn engine_apply_move(handle: RawHandle, packed: u32);
    fn engine_gen_moves(handle: RawHandle, cell: CellIndex, out: *mut u32, capacity: usize)
    -> usize;
    fn engine_gen_all_moves(
        handle: RawHandle,
        cell: CellIndex,
        out: *mut u64,
        capacity: usize,
    ) -> usize;
    fn engine_play_out_board(handle: RawHandle) -> i8;
    fn engine_comp_move(handle: RawHandle) -> u64;
}

static INIT_ALLOC: Once = Once::new();

/// 原生引擎
#[derive(Debug, Default)]
pub struct NativeEngine;

impl EngineBackend for NativeEngine {
    fn init_alloc(&mut self) {
        // SAFETY: 無參數，Once 保證整個行程只呼叫一次
        INIT_ALLOC.call_once(|| unsafe { engine_init_alloc() });
    }

    fn new_board_handle(&mut self) -> RawHandle {
        // SAFETY: init_alloc 已在 EngineBoard::new 中先行呼叫
        unsafe { engine_new_board_handle() }
    }

    fn destroy_board_handle(&mut self, handle: RawHandle) {
        // SAFETY: handle 由 new_board_handle 取得且只釋放一次
        unsafe { engine_destroy_board_handle(handle) }
    }

    fn init_board_from_str(&mut self, handle: RawHandle, encoded: &[u8]) {
        // SAFETY: 指標與長度來自同一個 slice
        unsafe { engine_init_board_from_str(handle, encoded.as_ptr(), encoded.len()) }
    }

    fn gen_init_str(&mut self, handle: RawHandle) -> Vec<u8> {
        let mut buf = vec![0u8; ENCODED_STATE_LEN];
        // SAFETY: 引擎最多寫入 capacity bytes
        unsafe { engine_gen_init_str(handle, buf.as_mut_ptr(), buf.len()) };
        buf
    }

    fn apply_move(&mut self, handle: RawHandle, packed: u32) {
        // SAFETY: 純值參數
        unsafe { engine_apply_move(handle, packed) }
    }

    fn gen_moves(&mut self, handle: RawHandle, cell: CellIndex) -> Vec<u32> {
        let mut buf = vec![0u32; MAX_MOVE_LIST_LEN];
        // SAFETY: 引擎最多寫入 capacity 筆並回傳實際筆數
        let written = unsafe { engine_gen_moves(handle, cell, buf.as_mut_ptr(), buf.len()) };
        buf.truncate(written.min(MAX_MOVE_LIST_LEN));
        buf
    }

    fn gen_all_moves(&mut self, handle: RawHandle, cell: CellIndex) -> Vec<u64> {
        let mut buf = vec![0u64; MAX_MOVE_LIST_LEN];
        // SAFETY: 同 gen_moves
        let written = unsafe { engine_gen_all_moves(handle, cell, buf.as_mut_ptr(), buf.len()) };
        buf.truncate(written.min(MAX_MOVE_LIST_LEN));
        buf
    }

    fn play_out_board(&mut self, handle: RawHandle) -> i8 {
        // SAFETY: 純值參數
        unsafe { engine_play_out_board(handle) }
    }

    fn comp_move(&mut self, handle: RawHandle) -> u64 {
        // SAFETY: 純值參數
        unsafe { engine_comp_move(handle) }
    }
}
