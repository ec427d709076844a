//! Loader 相關的資料結構定義

use crate::domain::alias::Tick;
use crate::domain::constants::{
    DEFAULT_ATTACK_LUNGE, DEFAULT_BASE_TICKS, DEFAULT_SETUP, DEFAULT_TICK_RATE_HZ,
};
use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 客戶端設定（client.toml）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ClientConfig {
    /// 單段移動的基礎 tick 數（路徑越長會再縮短）
    pub base_ticks_per_step: Tick,
    /// 固定 tick 頻率
    pub tick_rate_hz: u32,
    /// 攻擊前衝距離（格）
    pub attack_lunge: f32,
    /// 初始佈局，每列一個字串
    pub setup: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_ticks_per_step: DEFAULT_BASE_TICKS,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            attack_lunge: DEFAULT_ATTACK_LUNGE,
            setup: DEFAULT_SETUP.iter().map(|row| row.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    /// 每個 tick 的時間長度
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }
}
