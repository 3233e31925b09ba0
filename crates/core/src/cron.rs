//! Scheduled collection steps and the orchestrator's result shapes.

use serde::{Deserialize, Serialize};

pub const STEP_PROCESS_CONTENT: &str = "process-content";
pub const STEP_AGGREGATE_SIGNALS: &str = "aggregate-signals";
pub const STEP_MARKET_TRENDS: &str = "market-trends";

/// Steps run by the orchestrator, in execution order.
pub const CRON_STEPS: &[&str] = &[
    STEP_PROCESS_CONTENT,
    STEP_AGGREGATE_SIGNALS,
    STEP_MARKET_TRENDS,
];

/// Maximum raw-content rows processed per invocation.
pub const PROCESS_BATCH_SIZE: i64 = 500;

/// Default aggregation window for signals, in days.
pub const DEFAULT_SIGNAL_WINDOW_DAYS: i64 = 7;

/// Largest accepted aggregation window, in days.
pub const MAX_SIGNAL_WINDOW_DAYS: i64 = 90;

/// Result of one orchestrated step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: String,
    pub success: bool,
    /// HTTP status returned by the step, if a response arrived.
    pub status: Option<u16>,
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Result of a full orchestrated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub success: bool,
    pub steps: Vec<StepOutcome>,
}

impl RunSummary {
    /// Build a summary; the run succeeds only when every step did.
    pub fn from_steps(steps: Vec<StepOutcome>) -> Self {
        let success = steps.iter().all(|s| s.success);
        Self { success, steps }
    }
}

/// Clamp a requested aggregation window to `1..=MAX_SIGNAL_WINDOW_DAYS`.
pub fn clamp_window_days(days: Option<i64>) -> i64 {
    days.unwrap_or(DEFAULT_SIGNAL_WINDOW_DAYS)
        .clamp(1, MAX_SIGNAL_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(step: &str, success: bool) -> StepOutcome {
        StepOutcome {
            step: step.to_string(),
            success,
            status: Some(if success { 200 } else { 500 }),
            error: None,
            duration_ms: 1,
        }
    }

    #[test]
    fn summary_requires_every_step() {
        let ok = RunSummary::from_steps(vec![outcome("a", true), outcome("b", true)]);
        assert!(ok.success);
        let failed = RunSummary::from_steps(vec![outcome("a", true), outcome("b", false)]);
        assert!(!failed.success);
    }

    #[test]
    fn empty_run_is_successful() {
        assert!(RunSummary::from_steps(vec![]).success);
    }

    #[test]
    fn window_is_clamped() {
        assert_eq!(clamp_window_days(None), DEFAULT_SIGNAL_WINDOW_DAYS);
        assert_eq!(clamp_window_days(Some(0)), 1);
        assert_eq!(clamp_window_days(Some(365)), MAX_SIGNAL_WINDOW_DAYS);
        assert_eq!(clamp_window_days(Some(14)), 14);
    }
}
