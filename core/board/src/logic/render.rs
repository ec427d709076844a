//! 渲染清單（棋子與裝飾）
//!
//! 清單順序即繪製順序，後面的畫在上面。

use crate::domain::core_types::{Axis, LockMask, PieceTag, Position, RenderPosition};
use crate::logic::board::Board;
use bevy_ecs::prelude::Resource;

/// 可渲染的棋子
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPiece {
    pub tag: PieceTag,
    pub position: RenderPosition,
    pub regalia: bool,
    /// 王冠圖層透明度（0..=1）
    pub crown_opacity: f32,
}

/// 裝飾種類：鎖定所在的軸向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// 左右兩格之間的鎖（畫在 x + 0.5）
    HorizontalLock,
    /// 上下兩格之間的鎖（畫在 y + 0.5）
    VerticalLock,
}

impl From<Axis> for DecorationKind {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => DecorationKind::HorizontalLock,
            Axis::Vertical => DecorationKind::VerticalLock,
        }
    }
}

/// 可渲染的裝飾
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderDecoration {
    pub kind: DecorationKind,
    pub position: RenderPosition,
    pub opacity: f32,
    /// 動畫期間的暫時裝飾，步驟結束時移除
    pub transient: bool,
}

/// 一幀要繪製的內容
#[derive(Debug, Clone, Default, PartialEq, Resource)]
pub struct RenderState {
    pub pieces: Vec<RenderPiece>,
    pub decorations: Vec<RenderDecoration>,
}

impl RenderState {
    /// 逐欄掃描棋盤產生棋子與鎖定裝飾
    pub fn from_board(board: &Board) -> Self {
        let mut sorted: Vec<_> = board.iter_cells().collect();
        sorted.sort_by_key(|(pos, _)| (pos.x, pos.y));

        let mut state = RenderState::default();
        for (pos, cell) in sorted {
            let Some(piece) = cell.piece else {
                continue;
            };
            state.pieces.push(RenderPiece {
                tag: piece.tag(),
                position: pos.into(),
                regalia: piece.regalia,
                crown_opacity: if piece.regalia { 1.0 } else { 0.0 },
            });

            for (lock, kind, offset) in [
                (LockMask::HORIZONTAL, DecorationKind::HorizontalLock, (0.5, 0.0)),
                (LockMask::VERTICAL, DecorationKind::VerticalLock, (0.0, 0.5)),
            ] {
                if cell.locks.contains(lock) {
                    state.decorations.push(RenderDecoration {
                        kind,
                        position: RenderPosition {
                            x: pos.x as f32 + offset.0,
                            y: pos.y as f32 + offset.1,
                        },
                        opacity: 1.0,
                        transient: false,
                    });
                }
            }
        }
        state
    }

    /// 停在該格子上的棋子索引
    pub fn piece_index_at(&self, pos: Position) -> Option<usize> {
        self.pieces.iter().position(|p| p.position.is_at(pos))
    }

    /// 將棋子移到繪製順序最上層，回傳新索引
    pub fn raise_to_top(&mut self, index: usize) -> usize {
        let piece = self.pieces.remove(index);
        self.pieces.push(piece);
        self.pieces.len() - 1
    }

    pub fn remove_transient(&mut self) {
        self.decorations.retain(|d| !d.transient);
    }

    /// 若該位置尚無同種裝飾則加入常駐裝飾
    pub fn ensure_decoration(&mut self, kind: DecorationKind, position: RenderPosition) {
        let exists = self
            .decorations
            .iter()
            .any(|d| !d.transient && d.kind == kind && d.position == position);
        if !exists {
            self.decorations.push(RenderDecoration {
                kind,
                position,
                opacity: 1.0,
                transient: false,
            });
        }
    }
}
