//! 動畫路徑規劃
//!
//! 從起點以 BFS 找到走法目標的最短正交路徑；目標若是邊，抵達的那一格是終點，
//! 另一格就是被攻擊的格子。

use crate::domain::core_types::{Direction, MoveTarget, PieceTag, Position};
use crate::error::{PathError, Result};
use crate::logic::board::Board;
use std::collections::{HashMap, HashSet, VecDeque};
use strum::IntoEnumIterator;
use tracing::trace;

/// 路徑規劃用的佔據查詢
pub trait Occupancy {
    fn is_occupied(&self, pos: Position) -> bool;
}

impl Occupancy for Board {
    fn is_occupied(&self, pos: Position) -> bool {
        Board::is_occupied(self, pos)
    }
}

impl Occupancy for HashMap<Position, PieceTag> {
    fn is_occupied(&self, pos: Position) -> bool {
        self.contains_key(&pos)
    }
}

/// 規劃結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPath {
    /// 只保留轉向點，第一個是起點、最後一個是終點
    pub waypoints: Vec<Position>,
    /// 邊目標中沒有被抵達的那一格
    pub attacked: Option<Position>,
}

impl PlannedPath {
    pub fn destination(&self) -> Position {
        // waypoints 至少包含起點
        self.waypoints[self.waypoints.len() - 1]
    }
}

/// BFS 節點：位置、進入方向、走過的 (位置, 方向)
#[derive(Debug)]
struct SearchNode {
    pos: Position,
    direction: Option<Direction>,
    trail: Vec<(Position, Direction)>,
}

/// 擴展順序：先沿原方向直走，再依 +x、+y、−x、−y
fn expansion_order(last: Option<Direction>) -> impl Iterator<Item = Direction> {
    last.into_iter()
        .chain(Direction::iter().filter(move |dir| Some(*dir) != last))
}

/// 計算從 `origin` 到 `target` 的路徑
///
/// # 通行規則
/// - 空格可通過
/// - 候選目標即使有棋子也可抵達，但只能作為終點
///
/// # 平手處理
/// 產生後繼時立即檢查是否為目標，第一個產生的目標勝出；因為直走方向最先入列，
/// 多條等長路徑中會偏好少轉彎的那條。
///
/// # Fail fast
/// 佇列清空仍找不到目標代表棋盤狀態不可能出現，回傳 `PathError::Unreachable`。
pub fn compute_path(
    occupancy: &impl Occupancy,
    origin: Position,
    target: MoveTarget,
) -> Result<PlannedPath> {
    origin.ensure_on_board()?;
    let candidates = target.candidates();
    for candidate in &candidates {
        candidate.ensure_on_board()?;
    }

    // 起點本身就是候選：不需移動（原地攻擊）
    if candidates.contains(&origin) {
        return Ok(PlannedPath {
            waypoints: vec![origin],
            attacked: candidates.into_iter().find(|c| *c != origin),
        });
    }

    let mut queue = VecDeque::from([SearchNode {
        pos: origin,
        direction: None,
        trail: Vec::new(),
    }]);
    let mut visited: HashSet<(Position, Direction)> = HashSet::new();
    let mut found: Option<Vec<(Position, Direction)>> = None;

    'search: while let Some(node) = queue.pop_front() {
        for direction in expansion_order(node.direction) {
            let Some(next) = node.pos.step(direction) else {
                continue;
            };
            let is_candidate = candidates.contains(&next);
            if occupancy.is_occupied(next) && !is_candidate {
                continue;
            }

            let mut trail = node.trail.clone();
            trail.push((next, direction));
            if is_candidate {
                found = Some(trail);
                break 'search;
            }
            // 相同 (位置, 方向) 較晚入列者展開結果必定排在後面，可直接略過
            if visited.insert((next, direction)) {
                queue.push_back(SearchNode {
                    pos: next,
                    direction: Some(direction),
                    trail,
                });
            }
        }
    }

    let Some(trail) = found else {
        return Err(PathError::Unreachable {
            x: origin.x,
            y: origin.y,
            candidates: candidates.iter().map(|c| (c.x, c.y)).collect(),
        }
        .into());
    };

    let waypoints = collapse_straight_runs(origin, &trail);
    let destination = waypoints[waypoints.len() - 1];
    let attacked = candidates.into_iter().find(|c| *c != destination);
    trace!(?origin, ?waypoints, ?attacked, "planned path");

    Ok(PlannedPath {
        waypoints,
        attacked,
    })
}

/// 連續同方向的格子只保留最後一格
fn collapse_straight_runs(origin: Position, trail: &[(Position, Direction)]) -> Vec<Position> {
    let mut waypoints = vec![origin];
    let mut last_direction = None;
    for &(pos, direction) in trail {
        if last_direction == Some(direction) {
            waypoints.pop();
        }
        waypoints.push(pos);
        last_direction = Some(direction);
    }
    waypoints
}
