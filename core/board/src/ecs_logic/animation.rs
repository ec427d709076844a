use super::take_resource;
use crate::ecs_logic::query::{get_board, get_client_config};
use crate::error::{Context, DataError, Result};
use crate::loader_schema::ClientConfig;
use crate::logic::animation::{MoveRequest, compile_animation};
use crate::logic::board::Board;
use crate::logic::render::RenderState;
use crate::logic::scheduler::{AnimationEngine, TickOutcome};
use bevy_ecs::prelude::World;
use tracing::debug;

/// 將棋盤、渲染清單、動畫排程器與設定放入 World
///
/// 已存在的同型 resource 會被覆蓋。
pub fn insert_game_state(world: &mut World, board: Board, config: &ClientConfig) {
    let render = board.render();
    debug!(pieces = render.pieces.len(), "insert game state");
    world.insert_resource(render);
    world.insert_resource(board);
    world.insert_resource(AnimationEngine::new(config.attack_lunge));
    world.insert_resource(config.clone());
}

/// 依 World 中的棋盤快照編譯動畫並排入佇列
pub fn queue_animation(world: &mut World, request: &MoveRequest) -> Result<()> {
    let board = get_board(world)?;
    let config = get_client_config(world)?;
    let program =
        compile_animation(&board, request, config.base_ticks_per_step).context("編譯動畫")?;
    let mut engine = world
        .get_resource_mut::<AnimationEngine>()
        .ok_or_else(|| DataError::ResourceNotFound {
            resource_name: "AnimationEngine".to_string(),
        })?;
    engine.enqueue(program)
}

/// 推進一個 tick
///
/// 需要同時修改三個 resource，先取出再放回；tick 失敗時仍會放回。
pub fn tick_animation(world: &mut World) -> Result<TickOutcome> {
    let mut engine = take_resource!(world, AnimationEngine);
    let board = world.remove_resource::<Board>();
    let render = world.remove_resource::<RenderState>();

    let result = match (board, render) {
        (Some(mut board), Some(mut render)) => {
            let outcome = engine.tick(&mut board, &mut render);
            world.insert_resource(board);
            world.insert_resource(render);
            outcome
        }
        (board, render) => {
            let missing = if board.is_none() { "Board" } else { "RenderState" };
            if let Some(board) = board {
                world.insert_resource(board);
            }
            if let Some(render) = render {
                world.insert_resource(render);
            }
            Err(DataError::ResourceNotFound {
                resource_name: missing.to_string(),
            }
            .into())
        }
    };
    world.insert_resource(engine);
    result
}
