//! # Search Report Module
//!
//! Turns a search outcome into something a caller can print or ship:
//! human-readable status lines for the terminal and a serializable
//! summary for JSON output.
//!
//! ## Status lines
//!
//! The text summary reports, in order:
//! - every recharge event, where it happened and the running total
//! - the final path, or a notice that none exists
//! - the remaining battery percentage
//! - the total number of recharges

use serde::{Deserialize, Serialize};
use crate::agent::{RechargeEvent, SearchOutcome};
use crate::environment::Environment;
use crate::types::{Coordinate, SearchStatus};

/// Serializable summary of one search run.
///
/// # Examples
///
/// ```rust
/// use battery_ucs::{Agent, RunConfig};
/// use battery_ucs::report::create_search_report;
///
/// let env = RunConfig::default().build_environment().unwrap();
/// let outcome = Agent::new(&env).search();
/// let report = create_search_report(&env, &outcome);
///
/// assert_eq!(report.path.first(), Some(&env.start()));
/// println!("{}", report.to_json().unwrap());
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub start: Coordinate,
    pub goal: Coordinate,

    /// Terminal state of the search (`GoalFound` or `Exhausted`)
    pub status: SearchStatus,

    /// Cells from start to goal inclusive; empty when the goal was not reached
    pub path: Vec<Coordinate>,

    /// Moves along the path, `path.len() - 1` for a found path
    pub steps: usize,

    /// Accumulated cost of the goal node
    pub total_cost: u64,

    /// Remaining battery as a percentage of capacity (0-100)
    pub battery_percentage: f32,

    pub recharge_count: u32,

    /// Nodes taken off the frontier and expanded
    pub expanded: usize,

    pub recharges: Vec<RechargeEvent>,
}

impl SearchReport {
    /// Human-readable status lines, one per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .recharges
            .iter()
            .map(|event| {
                format!(
                    "Battery depleted at {} after {} expansions, recharged (total recharges: {})",
                    event.at, event.expansion, event.count
                )
            })
            .collect();

        if self.path.is_empty() {
            lines.push(format!("No path found from {} to {}", self.start, self.goal));
        } else {
            let cells: Vec<String> = self.path.iter().map(Coordinate::to_string).collect();
            lines.push(format!("Path found: {}", cells.join(" -> ")));
            lines.push(format!("Steps: {} | Cost: {}", self.steps, self.total_cost));
        }

        lines.push(format!("Remaining battery: {:.0}%", self.battery_percentage));
        lines.push(format!("Total recharges: {}", self.recharge_count));
        lines
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn create_search_report(env: &Environment, outcome: &SearchOutcome) -> SearchReport {
    SearchReport {
        start: env.start(),
        goal: env.goal(),
        status: outcome.status,
        path: outcome.path.clone(),
        steps: outcome.steps(),
        total_cost: outcome.total_cost,
        battery_percentage: outcome.battery.percentage(),
        recharge_count: outcome.recharge_count(),
        expanded: outcome.expanded,
        recharges: outcome.recharges.clone(),
    }
}
