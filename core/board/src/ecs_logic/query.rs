use crate::error::{DataError, Result};
use crate::loader_schema::ClientConfig;
use crate::logic::board::Board;
use crate::logic::render::RenderState;
use crate::logic::scheduler::AnimationEngine;
use bevy_ecs::prelude::World;

/// 取得本地棋盤快照
pub fn get_board(world: &World) -> Result<Board> {
    world.get_resource::<Board>().cloned().ok_or_else(|| {
        DataError::ResourceNotFound {
            resource_name: "Board".to_string(),
        }
        .into()
    })
}

/// 取得渲染清單
pub fn get_render_state(world: &World) -> Result<RenderState> {
    world.get_resource::<RenderState>().cloned().ok_or_else(|| {
        DataError::ResourceNotFound {
            resource_name: "RenderState".to_string(),
        }
        .into()
    })
}

/// 取得客戶端設定
pub fn get_client_config(world: &World) -> Result<ClientConfig> {
    world.get_resource::<ClientConfig>().cloned().ok_or_else(|| {
        DataError::ResourceNotFound {
            resource_name: "ClientConfig".to_string(),
        }
        .into()
    })
}

/// 是否仍有動畫在播放
pub fn is_animating(world: &World) -> Result<bool> {
    world
        .get_resource::<AnimationEngine>()
        .map(AnimationEngine::is_animating)
        .ok_or_else(|| {
            DataError::ResourceNotFound {
                resource_name: "AnimationEngine".to_string(),
            }
            .into()
        })
}
