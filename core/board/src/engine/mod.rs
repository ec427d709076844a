//! 原生規則引擎邊界
//!
//! 引擎是權威狀態：合法走法、AI 選步與勝負都在引擎端。本地只透過
//! 編碼字串推送 / 拉取整盤狀態，並以打包走法互動。

#[cfg(feature = "native-engine")]
pub mod native;

use crate::codec::board_codec::{decode_into, encode_board};
use crate::codec::move_codec::Move;
use crate::domain::alias::{CellIndex, PackedMove, RawHandle};
use crate::error::{Context, Result};
use crate::logic::board::Board;
use tracing::debug;

/// 引擎提供的原始呼叫
///
/// 實作假設引擎初始化後永遠可用，因此這些呼叫沒有失敗回傳。
pub trait EngineBackend {
    /// 行程層級的配置器初始化，重複呼叫必須無副作用
    fn init_alloc(&mut self);
    fn new_board_handle(&mut self) -> RawHandle;
    fn destroy_board_handle(&mut self, handle: RawHandle);
    fn init_board_from_str(&mut self, handle: RawHandle, encoded: &[u8]);
    /// 162 bytes 的完整狀態，可能帶有尾端填充
    fn gen_init_str(&mut self, handle: RawHandle) -> Vec<u8>;
    fn apply_move(&mut self, handle: RawHandle, packed: u32);
    fn gen_moves(&mut self, handle: RawHandle, cell: CellIndex) -> Vec<u32>;
    fn gen_all_moves(&mut self, handle: RawHandle, cell: CellIndex) -> Vec<u64>;
    fn play_out_board(&mut self, handle: RawHandle) -> i8;
    fn comp_move(&mut self, handle: RawHandle) -> u64;
}

/// 擁有一個引擎端棋盤 handle 的唯一擁有者
///
/// 不可複製；drop 時釋放 handle。
#[derive(Debug)]
pub struct EngineBoard<E: EngineBackend> {
    backend: E,
    handle: RawHandle,
}

impl<E: EngineBackend> EngineBoard<E> {
    pub fn new(mut backend: E) -> Self {
        backend.init_alloc();
        let handle = backend.new_board_handle();
        debug!(handle, "engine board handle created");
        Self { backend, handle }
    }

    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    pub fn backend(&self) -> &E {
        &self.backend
    }

    /// 推送整盤狀態到引擎
    pub fn push(&mut self, board: &Board) {
        let encoded = encode_board(board);
        debug!(handle = self.handle, "push board state");
        self.backend
            .init_board_from_str(self.handle, encoded.as_bytes());
    }

    /// 拉取整盤狀態並就地寫入本地快照
    pub fn pull_into(&mut self, board: &mut Board) -> Result<()> {
        let encoded = self.backend.gen_init_str(self.handle);
        debug!(handle = self.handle, len = encoded.len(), "pull board state");
        decode_into(board, &encoded).context("解碼引擎棋盤狀態")
    }

    pub fn apply_move(&mut self, mv: &Move) -> Result<()> {
        let packed = mv.to_wire().context("打包走法")?;
        debug!(handle = self.handle, packed, "apply move");
        self.backend.apply_move(self.handle, packed);
        Ok(())
    }

    /// 指定格子的合法走法
    pub fn legal_moves(&mut self, cell: CellIndex) -> Vec<Move> {
        let packed = self.backend.gen_moves(self.handle, cell);
        decode_move_list(packed.into_iter().map(PackedMove::from))
    }

    /// 指定格子的延伸走法列表
    pub fn all_moves(&mut self, cell: CellIndex) -> Vec<Move> {
        let packed = self.backend.gen_all_moves(self.handle, cell);
        decode_move_list(packed.into_iter())
    }

    pub fn play_out(&mut self) -> i8 {
        self.backend.play_out_board(self.handle)
    }

    pub fn computer_move(&mut self) -> Move {
        Move::decode(self.backend.comp_move(self.handle))
    }
}

impl<E: EngineBackend> Drop for EngineBoard<E> {
    fn drop(&mut self) {
        debug!(handle = self.handle, "engine board handle destroyed");
        self.backend.destroy_board_handle(self.handle);
    }
}

/// 0 為結尾標記
fn decode_move_list(packed: impl Iterator<Item = PackedMove>) -> Vec<Move> {
    packed
        .take_while(|&packed| packed != 0)
        .map(Move::decode)
        .collect()
}
