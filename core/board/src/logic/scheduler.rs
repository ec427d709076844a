//! 逐 tick 執行動畫程式的狀態機
//!
//! 一次只有一個步驟在執行。步驟進行中棋盤快照維持步驟前的狀態，
//! 直到最後一個 tick 才一次提交。

use crate::domain::alias::Tick;
use crate::domain::constants::DEFAULT_ATTACK_LUNGE;
use crate::domain::core_types::{Edge, Position, RenderPosition};
use crate::error::{AnimationError, Result};
use crate::logic::animation::{AnimationProgram, AnimationStep};
use crate::logic::board::Board;
use crate::logic::easing::{bump, ease_in, lerp_position, smooth};
use crate::logic::render::{DecorationKind, RenderDecoration, RenderState};
use bevy_ecs::prelude::Resource;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// 排程器狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// 佇列為空或下一步尚未開始
    Idle,
    /// 目前步驟已經過的 tick 數
    Running { tick: Tick },
}

/// 單一 tick 的進度資訊
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFrame {
    /// `tick / ticks_per_step`，落在 (0, 1]
    pub progress: f32,
    pub is_start: bool,
    pub is_end: bool,
}

/// tick 的結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// 沒有任何動畫
    Idle,
    /// 步驟仍在進行
    Animating { step: AnimationStep, progress: f32 },
    /// 步驟在這個 tick 完成並提交
    StepFinished {
        step: AnimationStep,
        remaining: usize,
    },
}

/// 動畫執行環境（取代全域的佇列、計數器與暫存圖層）
#[derive(Debug, Resource)]
pub struct AnimationEngine {
    queue: VecDeque<AnimationStep>,
    ticks_per_step: Tick,
    state: SchedulerState,
    attack_lunge: f32,
    /// 目前動畫中的棋子（已移到最上層）
    active: Option<usize>,
    /// 換位時的另一枚棋子
    partner: Option<usize>,
    /// 攻擊時要顯示的鎖定方向與位置
    lock: Option<(DecorationKind, RenderPosition)>,
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ATTACK_LUNGE)
    }
}

impl AnimationEngine {
    pub fn new(attack_lunge: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            ticks_per_step: 1,
            state: SchedulerState::Idle,
            attack_lunge,
            active: None,
            partner: None,
            lock: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn ticks_per_step(&self) -> Tick {
        self.ticks_per_step
    }

    /// 尚未完成的步驟（含目前步驟）
    pub fn pending_steps(&self) -> impl Iterator<Item = &AnimationStep> {
        self.queue.iter()
    }

    pub fn is_animating(&self) -> bool {
        !self.queue.is_empty() || self.state != SchedulerState::Idle
    }

    /// 載入新的動畫程式；前一個程式尚未播完時拒絕
    pub fn enqueue(&mut self, program: AnimationProgram) -> Result<()> {
        if self.is_animating() {
            return Err(AnimationError::Busy.into());
        }
        if program.ticks_per_step == 0 {
            return Err(AnimationError::ZeroTicks.into());
        }
        debug!(
            steps = program.steps.len(),
            ticks_per_step = program.ticks_per_step,
            "animation queued"
        );
        self.queue = program.steps;
        self.ticks_per_step = program.ticks_per_step;
        Ok(())
    }

    /// 推進一個 tick
    ///
    /// 閒置且佇列為空時直接返回；閒置但佇列有步驟時自動開始下一步。
    pub fn tick(&mut self, board: &mut Board, render: &mut RenderState) -> Result<TickOutcome> {
        let Some(step) = self.queue.front().copied() else {
            return Ok(TickOutcome::Idle);
        };

        let previous = match self.state {
            SchedulerState::Idle => 0,
            SchedulerState::Running { tick } => tick,
        };
        let current = previous + 1;
        self.state = SchedulerState::Running { tick: current };

        let frame = TickFrame {
            progress: current as f32 / self.ticks_per_step as f32,
            is_start: previous == 0,
            is_end: current >= self.ticks_per_step,
        };
        trace!(?step, tick = current, progress = frame.progress, "animation tick");

        if frame.is_start {
            self.begin_step(step, render)?;
        }
        self.animate(step, frame, render);

        if !frame.is_end {
            return Ok(TickOutcome::Animating {
                step,
                progress: frame.progress,
            });
        }

        self.finish_step(step, board, render)?;
        self.queue.pop_front();
        self.state = SchedulerState::Idle;
        debug!(?step, remaining = self.queue.len(), "animation step finished");
        Ok(TickOutcome::StepFinished {
            step,
            remaining: self.queue.len(),
        })
    }

    // ------------------------------------------------------------------------
    // 步驟開始：把相關棋子移到最上層
    // ------------------------------------------------------------------------

    fn begin_step(&mut self, step: AnimationStep, render: &mut RenderState) -> Result<()> {
        match step {
            AnimationStep::Move { from, .. }
            | AnimationStep::AddCrown(from)
            | AnimationStep::RemoveCrown(from) => {
                self.active = Some(raise_piece_at(render, from)?);
            }
            AnimationStep::Swap { from, to } => {
                raise_piece_at(render, to)?;
                let active = raise_piece_at(render, from)?;
                self.active = Some(active);
                self.partner = Some(active - 1);
            }
            AnimationStep::Attack { from, to } => {
                let edge = Edge::new(from, to)?;
                self.active = Some(raise_piece_at(render, from)?);
                self.lock = Some((edge.axis().into(), edge.midpoint()));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // 每個 tick 更新渲染狀態（不碰棋盤）
    // ------------------------------------------------------------------------

    fn animate(&mut self, step: AnimationStep, frame: TickFrame, render: &mut RenderState) {
        let progress = frame.progress;
        match step {
            AnimationStep::Move { from, to } => {
                if let Some(piece) = self.active.and_then(|i| render.pieces.get_mut(i)) {
                    piece.position = lerp_position(from.into(), to.into(), smooth(progress));
                }
            }
            AnimationStep::Swap { from, to } => {
                let eased = smooth(progress);
                if let Some(piece) = self.active.and_then(|i| render.pieces.get_mut(i)) {
                    piece.position = lerp_position(from.into(), to.into(), eased);
                }
                if let Some(piece) = self.partner.and_then(|i| render.pieces.get_mut(i)) {
                    piece.position = lerp_position(to.into(), from.into(), eased);
                }
            }
            AnimationStep::Attack { from, to } => {
                let lunge = self.attack_lunge * bump(progress);
                if let Some(piece) = self.active.and_then(|i| render.pieces.get_mut(i)) {
                    piece.position = lerp_position(from.into(), to.into(), lunge);
                }
                if progress > 0.5 {
                    let opacity = ease_in((progress - 0.5) * 2.0);
                    self.show_transient_lock(opacity, render);
                }
            }
            AnimationStep::AddCrown(_) => {
                if let Some(piece) = self.active.and_then(|i| render.pieces.get_mut(i)) {
                    piece.crown_opacity = ease_in(progress);
                }
            }
            AnimationStep::RemoveCrown(_) => {
                if let Some(piece) = self.active.and_then(|i| render.pieces.get_mut(i)) {
                    piece.crown_opacity = 1.0 - ease_in(progress);
                }
            }
        }
    }

    fn show_transient_lock(&self, opacity: f32, render: &mut RenderState) {
        let Some((kind, position)) = self.lock else {
            return;
        };
        match render.decorations.iter_mut().find(|d| d.transient) {
            Some(decoration) => decoration.opacity = opacity,
            None => render.decorations.push(RenderDecoration {
                kind,
                position,
                opacity,
                transient: true,
            }),
        }
    }

    // ------------------------------------------------------------------------
    // 步驟結束：提交棋盤、對齊座標、清除暫時裝飾
    // ------------------------------------------------------------------------

    fn finish_step(
        &mut self,
        step: AnimationStep,
        board: &mut Board,
        render: &mut RenderState,
    ) -> Result<()> {
        match step {
            AnimationStep::Move { from, to } => {
                board.move_piece(from, to)?;
                if let Some(active) = self.active {
                    snap(render, active, to);
                    remove_captured(render, active, to);
                }
            }
            AnimationStep::Swap { from, to } => {
                board.swap_pieces(from, to)?;
                if let Some(active) = self.active {
                    snap(render, active, to);
                }
                if let Some(partner) = self.partner {
                    snap(render, partner, from);
                }
            }
            AnimationStep::Attack { from, to } => {
                let edge = Edge::new(from, to)?;
                board.lock_edge(edge)?;
                if let Some(active) = self.active {
                    snap(render, active, from);
                }
                render.ensure_decoration(edge.axis().into(), edge.midpoint());
            }
            AnimationStep::AddCrown(at) | AnimationStep::RemoveCrown(at) => {
                let regalia = matches!(step, AnimationStep::AddCrown(_));
                board.set_regalia(at, regalia)?;
                if let Some(piece) = self.active.and_then(|i| render.pieces.get_mut(i)) {
                    piece.regalia = regalia;
                    piece.crown_opacity = if regalia { 1.0 } else { 0.0 };
                }
            }
        }

        render.remove_transient();
        self.active = None;
        self.partner = None;
        self.lock = None;
        Ok(())
    }
}

fn raise_piece_at(render: &mut RenderState, pos: Position) -> Result<usize> {
    let index = render
        .piece_index_at(pos)
        .ok_or(AnimationError::MissingRenderPiece { x: pos.x, y: pos.y })?;
    Ok(render.raise_to_top(index))
}

fn snap(render: &mut RenderState, index: usize, pos: Position) {
    if let Some(piece) = render.pieces.get_mut(index) {
        piece.position = pos.into();
    }
}

/// 移除停在 `pos` 上被吃掉的棋子
fn remove_captured(render: &mut RenderState, active: usize, pos: Position) {
    let mut index = 0;
    render.pieces.retain(|piece| {
        let keep = index == active || !piece.position.is_at(pos);
        index += 1;
        keep
    });
}

