//! # Search Agent Module
//!
//! Uniform-cost search from the environment's start cell to its goal cell,
//! with a simulated battery that pays for every admitted move.
//!
//! ## Cost and battery model
//!
//! - Moves leaving the start cell cost `first_step_cost` (0 by default),
//!   every other move costs `step_cost` (10 by default).
//! - A successor is admitted only if its move cost fits in the current
//!   battery level and its cell has never been generated before. Admission
//!   drains the battery by the move cost.
//! - Once all moves of an expanded node are processed, a battery sitting at
//!   exactly 0 is recharged to full and the recharge is counted. A level that
//!   is positive but below the move cost is never recharged and can starve
//!   the search.
//!
//! Cells are marked visited when generated, not when expanded, so a cheaper
//! route to an already generated cell is never considered.

use crate::config::SearchConfig;
use crate::environment::Environment;
use crate::error::ConfigError;
use crate::types::{Action, Coordinate, SearchStatus};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// One generated state. `parent` indexes into the agent's node pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub state: Coordinate,
    pub parent: Option<usize>,
    pub action: Option<Action>,
    pub path_cost: u64,
}

impl SearchNode {
    fn root(state: Coordinate) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            path_cost: 0,
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq)]
struct FrontierEntry {
    path_cost: u64,
    sequence: usize,
    node: usize,
}

// Reversed for a min-heap; earlier insertions win ties.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .path_cost
            .cmp(&self.path_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of node indices keyed on path cost, stable on ties.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path_cost: u64, node: usize) {
        self.heap.push(FrontierEntry {
            path_cost,
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;
    }

    /// Removes the cheapest node, returning `(path_cost, node)`.
    pub fn pop(&mut self) -> Option<(u64, usize)> {
        self.heap.pop().map(|entry| (entry.path_cost, entry.node))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// NOTE - Simulated battery, owned by one agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battery {
    pub level: u32,
    pub capacity: u32,
    pub recharges: u32,
}

impl Battery {
    pub fn new(capacity: u32) -> Self {
        Self {
            level: capacity,
            capacity,
            recharges: 0,
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.level
    }

    /// Callers check `can_afford` first; the level never goes below zero.
    pub fn drain(&mut self, cost: u32) {
        self.level = self.level.saturating_sub(cost);
    }

    pub fn is_depleted(&self) -> bool {
        self.level == 0
    }

    pub fn recharge(&mut self) {
        self.level = self.capacity;
        self.recharges += 1;
    }

    pub fn percentage(&self) -> f32 {
        (self.level as f32 / self.capacity as f32) * 100.0
    }
}

/// A battery reset triggered after expanding the node at `at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargeEvent {
    pub at: Coordinate,
    /// Number of nodes expanded when the battery ran out
    pub expansion: usize,
    /// Running recharge total including this one
    pub count: u32,
}

/// Result of one `Agent::search` call.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Start to goal inclusive; empty when no path was found
    pub path: Vec<Coordinate>,
    /// Accumulated cost of each path cell
    pub path_costs: Vec<u64>,
    /// Moves between consecutive path cells
    pub actions: Vec<Action>,
    pub total_cost: u64,
    pub battery: Battery,
    pub expanded: usize,
    pub recharges: Vec<RechargeEvent>,
    pub status: SearchStatus,
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::GoalFound
    }

    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn recharge_count(&self) -> u32 {
        self.battery.recharges
    }
}

pub struct Agent<'a> {
    env: &'a Environment,
    config: SearchConfig,
    battery: Battery,
    status: SearchStatus,
}

impl<'a> Agent<'a> {
    pub fn new(env: &'a Environment) -> Self {
        let config = SearchConfig::default();
        Self {
            env,
            battery: Battery::new(config.battery_capacity),
            config,
            status: SearchStatus::Initial,
        }
    }

    /// Validates the cost model against the grid: the dearest possible
    /// path, one move per cell, must fit in a `u64` path cost.
    pub fn with_config(env: &'a Environment, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cells = env.grid().rows() as u64 * env.grid().cols() as u64;
        let dearest = u64::from(config.step_cost.max(config.first_step_cost));
        if dearest.checked_mul(cells).is_none() {
            return Err(ConfigError::CostOverflow { cost: dearest, cells });
        }
        Ok(Self {
            env,
            battery: Battery::new(config.battery_capacity),
            config,
            status: SearchStatus::Initial,
        })
    }

    pub fn battery(&self) -> Battery {
        self.battery
    }

    pub fn recharge_count(&self) -> u32 {
        self.battery.recharges
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Free first move, flat cost afterwards.
    fn action_cost(&self, from: Coordinate) -> u32 {
        if from == self.env.start() {
            self.config.first_step_cost
        } else {
            self.config.step_cost
        }
    }

    /// Runs uniform-cost search to completion.
    ///
    /// Frontier and visited set are fresh on every call; battery level and
    /// recharge count carry over from earlier calls on the same agent.
    pub fn search(&mut self) -> SearchOutcome {
        let env = self.env;
        let start = env.start();
        self.status = SearchStatus::Running;

        let mut nodes = vec![SearchNode::root(start)];
        let mut frontier = Frontier::new();
        let mut visited = HashSet::from([start]);
        let mut recharges = Vec::new();
        let mut expanded = 0;

        frontier.push(0, 0);

        while let Some((path_cost, index)) = frontier.pop() {
            let node = nodes[index];

            if env.is_goal(node.state) {
                self.status = SearchStatus::GoalFound;
                let chain = reconstruct(&nodes, index);
                let outcome = self.finish(chain, path_cost, expanded, recharges);
                info!(
                    "Goal {} reached in {} steps, cost {}, battery {}%, {} recharge(s)",
                    node.state,
                    outcome.steps(),
                    outcome.total_cost,
                    outcome.battery.level,
                    outcome.battery.recharges
                );
                return outcome;
            }

            expanded += 1;
            debug!(
                "expanding {} (cost {}, battery {}, frontier {})",
                node.state,
                node.path_cost,
                self.battery.level,
                frontier.len()
            );

            for action in env.actions(node.state) {
                let Ok(next) = env.result(node.state, action) else {
                    continue;
                };
                if visited.contains(&next) {
                    continue;
                }

                let cost = self.action_cost(node.state);
                if !self.battery.can_afford(cost) {
                    warn!(
                        "battery at {} cannot pay {} for {} -> {}",
                        self.battery.level, cost, node.state, next
                    );
                    continue;
                }

                self.battery.drain(cost);
                let child_cost = node.path_cost + u64::from(cost);
                let child = nodes.len();
                nodes.push(SearchNode {
                    state: next,
                    parent: Some(index),
                    action: Some(action),
                    path_cost: child_cost,
                });
                frontier.push(child_cost, child);
                visited.insert(next);
            }

            if self.battery.is_depleted() {
                self.battery.recharge();
                let event = RechargeEvent {
                    at: node.state,
                    expansion: expanded,
                    count: self.battery.recharges,
                };
                info!(
                    "Battery depleted at {}, recharged to {} (recharge #{})",
                    event.at, self.battery.level, event.count
                );
                recharges.push(event);
            }
        }

        self.status = SearchStatus::Exhausted;
        info!(
            "No path from {} to {} after {} expansions",
            start,
            env.goal(),
            expanded
        );
        self.finish(Vec::new(), 0, expanded, recharges)
    }

    fn finish(
        &self,
        chain: Vec<SearchNode>,
        total_cost: u64,
        expanded: usize,
        recharges: Vec<RechargeEvent>,
    ) -> SearchOutcome {
        debug_assert!(self.status.is_terminal());
        SearchOutcome {
            path: chain.iter().map(|node| node.state).collect(),
            path_costs: chain.iter().map(|node| node.path_cost).collect(),
            actions: chain.iter().filter_map(|node| node.action).collect(),
            total_cost,
            battery: self.battery,
            expanded,
            recharges,
            status: self.status,
        }
    }
}

/// Follows parent links from `index` back to the root, root first.
fn reconstruct(nodes: &[SearchNode], index: usize) -> Vec<SearchNode> {
    let mut chain = Vec::new();
    let mut current = Some(index);

    while let Some(i) = current {
        chain.push(nodes[i]);
        current = nodes[i].parent;
    }

    chain.reverse();
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn env(markers: Vec<Vec<u8>>, start: (usize, usize), goal: (usize, usize)) -> Environment {
        let grid = Grid::from_markers(markers).unwrap();
        Environment::new(grid, start.into(), goal.into()).unwrap()
    }

    fn coords(cells: &[(usize, usize)]) -> Vec<Coordinate> {
        cells.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn frontier_pops_cheapest_then_oldest() {
        let mut frontier = Frontier::new();
        frontier.push(10, 0);
        frontier.push(0, 1);
        frontier.push(10, 2);
        frontier.push(0, 3);
        assert_eq!(frontier.len(), 4);
        assert_eq!(frontier.pop(), Some((0, 1)));
        assert_eq!(frontier.pop(), Some((0, 3)));
        assert_eq!(frontier.pop(), Some((10, 0)));
        assert_eq!(frontier.pop(), Some((10, 2)));
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn battery_recharges_to_capacity() {
        let mut battery = Battery::new(100);
        assert!(battery.can_afford(100));
        battery.drain(60);
        assert!(!battery.can_afford(50));
        battery.drain(40);
        assert!(battery.is_depleted());
        battery.recharge();
        assert_eq!(battery, Battery { level: 100, capacity: 100, recharges: 1 });
        assert_eq!(battery.percentage(), 100.0);
    }

    #[test]
    fn open_three_by_three() {
        let env = env(vec![vec![0; 3]; 3], (0, 0), (2, 2));
        let mut agent = Agent::new(&env);
        assert_eq!(agent.status(), SearchStatus::Initial);

        let outcome = agent.search();
        assert!(outcome.is_success());
        assert_eq!(outcome.path, coords(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]));
        assert_eq!(outcome.path_costs, vec![0, 0, 10, 20, 30]);
        assert_eq!(
            outcome.actions,
            vec![Action::Down, Action::Down, Action::Right, Action::Right]
        );
        assert_eq!(outcome.total_cost, 30);
        // every admitted successor is paid for, not only the ones on the path
        assert_eq!(outcome.battery.level, 40);
        assert_eq!(outcome.recharge_count(), 0);
        assert_eq!(outcome.expanded, 8);
        assert_eq!(agent.status(), SearchStatus::GoalFound);
    }

    #[test]
    fn start_is_goal() {
        let env = env(vec![vec![0]], (0, 0), (0, 0));
        let mut agent = Agent::new(&env);
        let outcome = agent.search();
        assert_eq!(outcome.path, coords(&[(0, 0)]));
        assert_eq!(outcome.total_cost, 0);
        assert_eq!(outcome.battery.level, 100);
        assert_eq!(outcome.expanded, 0);
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn corridor_first_move_is_free() {
        let env = env(vec![vec![0; 4]], (0, 0), (0, 3));
        let outcome = Agent::new(&env).search();
        assert_eq!(outcome.path_costs, vec![0, 0, 10, 20]);
        assert_eq!(outcome.battery.level, 80);
    }

    #[test]
    fn wall_blocks_the_goal() {
        let env = env(vec![vec![0, 1, 0]], (0, 0), (0, 2));
        let mut agent = Agent::new(&env);
        let outcome = agent.search();
        assert!(outcome.path.is_empty());
        assert!(outcome.path_costs.is_empty());
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert_eq!(outcome.battery.level, 100);
        assert_eq!(outcome.expanded, 1);
        assert_eq!(agent.status(), SearchStatus::Exhausted);
    }

    #[test]
    fn enclosed_goal_exhausts_with_recharge() {
        let mut markers = vec![vec![0; 5]; 5];
        for (r, c) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            markers[r][c] = 1;
        }
        let env = env(markers, (0, 0), (2, 2));
        let outcome = Agent::new(&env).search();
        assert!(!outcome.is_success());
        assert_eq!(outcome.expanded, 20);
        assert_eq!(outcome.battery.level, 30);
        assert_eq!(
            outcome.recharges,
            vec![RechargeEvent { at: Coordinate::new(4, 0), expansion: 9, count: 1 }]
        );
    }

    #[test]
    fn battery_runs_out_and_recharges() {
        let env = env(vec![vec![0; 6]; 6], (0, 0), (5, 5));
        let outcome = Agent::new(&env).search();
        assert_eq!(outcome.steps(), 10);
        assert_eq!(outcome.total_cost, 90);
        assert_eq!(outcome.battery.level, 70);
        assert_eq!(outcome.recharge_count(), 3);
        assert_eq!(outcome.expanded, 35);
        let at: Vec<_> = outcome.recharges.iter().map(|event| event.at).collect();
        assert_eq!(at, coords(&[(2, 1), (4, 1), (3, 4)]));
    }

    #[test]
    fn small_battery_recharges_every_expansion() {
        let env = env(vec![vec![0; 3]; 3], (0, 0), (2, 2));
        let config = SearchConfig {
            battery_capacity: 10,
            ..SearchConfig::default()
        };
        let outcome = Agent::with_config(&env, config).unwrap().search();
        assert_eq!(outcome.total_cost, 30);
        assert_eq!(outcome.recharge_count(), 6);
        assert_eq!(outcome.battery.level, 10);
        assert_eq!(outcome.expanded, 7);
    }

    #[test]
    fn leftover_charge_below_step_cost_starves() {
        let env = env(vec![vec![0; 4]], (0, 0), (0, 3));
        let config = SearchConfig {
            battery_capacity: 15,
            ..SearchConfig::default()
        };
        let outcome = Agent::with_config(&env, config).unwrap().search();
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.battery.level, 5);
        assert_eq!(outcome.recharge_count(), 0);
        assert_eq!(outcome.expanded, 3);
    }

    #[test]
    fn second_search_keeps_battery_state() {
        let env = env(vec![vec![0; 3]; 3], (0, 0), (2, 2));
        let mut agent = Agent::new(&env);
        agent.search();
        assert_eq!(agent.battery().level, 40);

        let outcome = agent.search();
        assert_eq!(outcome.total_cost, 30);
        assert_eq!(outcome.battery.level, 80);
        assert_eq!(agent.recharge_count(), 1);
        assert_eq!(outcome.recharges[0].at, Coordinate::new(2, 0));
    }

    #[test]
    fn maximal_costs_accumulate_without_wrapping() {
        let env = env(vec![vec![0; 4]], (0, 0), (0, 3));
        let config = SearchConfig {
            battery_capacity: u32::MAX,
            step_cost: u32::MAX,
            first_step_cost: u32::MAX,
        };
        assert!(config.validate().is_ok());

        let outcome = Agent::with_config(&env, config).unwrap().search();
        let step = u64::from(u32::MAX);
        assert!(outcome.is_success());
        assert_eq!(outcome.path_costs, vec![0, step, 2 * step, 3 * step]);
        assert_eq!(outcome.total_cost, 3 * step);
        // each admission empties the battery
        assert_eq!(outcome.recharge_count(), 3);
        assert_eq!(outcome.battery.level, u32::MAX);
    }

    #[test]
    fn rejects_invalid_config() {
        let env = env(vec![vec![0]], (0, 0), (0, 0));
        let config = SearchConfig {
            step_cost: 200,
            ..SearchConfig::default()
        };
        assert!(matches!(
            Agent::with_config(&env, config),
            Err(ConfigError::StepCostExceedsCapacity { cost: 200, capacity: 100 })
        ));
    }
}
