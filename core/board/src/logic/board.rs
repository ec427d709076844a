//! 棋盤快照
//!
//! 本地快照只在兩個時機變動：動畫步驟結束時提交，以及從引擎完整拉取狀態。

use crate::domain::constants::BOARD_SIZE;
use crate::domain::core_types::{Cell, Edge, Piece, PieceTag, Position};
use crate::error::{BoardError, Result};
use crate::logic::render::RenderState;
use bevy_ecs::prelude::Resource;
use std::collections::HashMap;

/// 9×9 棋盤，`cells[y][x]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Resource)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        pos.ensure_on_board()?;
        Ok(&self.cells[pos.y][pos.x])
    }

    pub fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell> {
        pos.ensure_on_board()?;
        Ok(&mut self.cells[pos.y][pos.x])
    }

    /// 棋盤外或空格回傳 None
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cell(pos).ok().and_then(|cell| cell.piece)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.piece_at(pos).is_some()
    }

    /// 放置棋子，覆蓋原有內容
    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<()> {
        self.cell_mut(pos)?.piece = Some(piece);
        Ok(())
    }

    /// 依 row-major 順序（與編碼順序相同）走訪所有格子
    pub fn iter_cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Position { x, y }, cell))
        })
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flatten()
    }

    /// 已佔據位置 → 棋子標籤，供路徑規劃 O(1) 查詢
    pub fn occupancy(&self) -> HashMap<Position, PieceTag> {
        self.iter_cells()
            .filter_map(|(pos, cell)| cell.piece.map(|piece| (pos, piece.tag())))
            .collect()
    }

    /// 由棋盤重新產生渲染清單
    pub fn render(&self) -> RenderState {
        RenderState::from_board(self)
    }

    // ------------------------------------------------------------------------
    // 動畫步驟提交
    // ------------------------------------------------------------------------

    /// 將棋子從 `from` 移到 `to`，回傳被覆蓋（吃掉）的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>> {
        to.ensure_on_board()?;
        let piece = self.take_piece(from)?;
        let captured = self.cell_mut(to)?.piece.replace(piece);
        Ok(captured)
    }

    /// 交換兩格的棋子（同陣營換位）
    pub fn swap_pieces(&mut self, a: Position, b: Position) -> Result<()> {
        b.ensure_on_board()?;
        let piece_a = self.take_piece(a)?;
        let piece_b = self.cell_mut(b)?.piece.replace(piece_a);
        self.cell_mut(a)?.piece = piece_b;
        Ok(())
    }

    pub fn set_regalia(&mut self, at: Position, regalia: bool) -> Result<()> {
        let piece = self
            .cell_mut(at)?
            .piece
            .as_mut()
            .ok_or(BoardError::EmptyCell { x: at.x, y: at.y })?;
        piece.regalia = regalia;
        Ok(())
    }

    /// 在邊上加鎖：記錄在座標較小的一格，位元由邊的軸向決定
    pub fn lock_edge(&mut self, edge: Edge) -> Result<()> {
        let [first, _] = edge.cells();
        self.cell_mut(first)?.locks.insert(edge.axis().lock());
        Ok(())
    }

    fn take_piece(&mut self, pos: Position) -> Result<Piece> {
        self.cell_mut(pos)?
            .piece
            .take()
            .ok_or_else(|| BoardError::EmptyCell { x: pos.x, y: pos.y }.into())
    }
}
