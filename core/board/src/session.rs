//! 一局遊戲：引擎 handle、本地快照、渲染清單與動畫排程器

use crate::codec::move_codec::Move;
use crate::domain::core_types::Position;
use crate::engine::{EngineBackend, EngineBoard};
use crate::error::{AnimationError, Context, Result};
use crate::loader::parse_setup;
use crate::loader_schema::ClientConfig;
use crate::logic::animation::{MoveRequest, compile_animation};
use crate::logic::board::Board;
use crate::logic::render::RenderState;
use crate::logic::scheduler::{AnimationEngine, TickOutcome};
use tracing::{debug, info, warn};

/// 單一局面的客戶端狀態
///
/// 本地快照只在動畫步驟結束時更新；整段動畫播完後再從引擎拉取一次完整狀態，
/// 讓本地與引擎重新一致。
#[derive(Debug)]
pub struct GameSession<E: EngineBackend> {
    engine: EngineBoard<E>,
    board: Board,
    render: RenderState,
    animation: AnimationEngine,
    config: ClientConfig,
    pending_sync: bool,
}

impl<E: EngineBackend> GameSession<E> {
    /// 依設定的初始佈局建立棋盤並推送到引擎
    pub fn new(backend: E, config: ClientConfig) -> Result<Self> {
        let board = parse_setup(&config.setup).context("建立初始佈局")?;
        let mut engine = EngineBoard::new(backend);
        engine.push(&board);
        let render = board.render();
        info!(
            handle = engine.handle(),
            pieces = render.pieces.len(),
            "game session started"
        );
        Ok(Self {
            engine,
            board,
            render,
            animation: AnimationEngine::new(config.attack_lunge),
            config,
            pending_sync: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn animation(&self) -> &AnimationEngine {
        &self.animation
    }

    pub fn engine(&self) -> &EngineBoard<E> {
        &self.engine
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 動畫播完但還沒從引擎拉取
    pub fn is_sync_pending(&self) -> bool {
        self.pending_sync
    }

    pub fn legal_moves(&mut self, pos: Position) -> Result<Vec<Move>> {
        Ok(self.engine.legal_moves(pos.index()?))
    }

    pub fn all_moves(&mut self, pos: Position) -> Result<Vec<Move>> {
        Ok(self.engine.all_moves(pos.index()?))
    }

    /// 播放走法：編譯動畫、送交引擎、排入佇列
    ///
    /// 編譯在送交引擎前完成，編譯失敗時引擎狀態不變。
    pub fn play(&mut self, mv: &Move) -> Result<()> {
        if self.animation.is_animating() {
            warn!(?mv, "move rejected while animating");
            return Err(AnimationError::Busy.into());
        }
        let request = MoveRequest::from_move(mv).context("解析走法")?;
        let program = compile_animation(&self.board, &request, self.config.base_ticks_per_step)
            .context("編譯動畫")?;
        self.engine.apply_move(mv)?;
        self.animation.enqueue(program)?;
        self.pending_sync = true;
        Ok(())
    }

    /// 引擎選步並播放
    pub fn computer_move(&mut self) -> Result<Move> {
        let mv = self.engine.computer_move();
        debug!(?mv, "computer move");
        self.play(&mv)?;
        Ok(mv)
    }

    pub fn play_out(&mut self) -> i8 {
        self.engine.play_out()
    }

    /// 推進一個 tick；佇列清空後若有待同步的狀態就從引擎拉取
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let outcome = self.animation.tick(&mut self.board, &mut self.render)?;
        if self.pending_sync && !self.animation.is_animating() {
            self.engine.pull_into(&mut self.board)?;
            self.render = self.board.render();
            self.pending_sync = false;
            debug!(pieces = self.render.pieces.len(), "local snapshot resynchronised");
        }
        Ok(outcome)
    }
}
