use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::steps::Step;

const STEP_COUNT: usize = Step::ALL.len();

/// Sink for per-step check outcomes.
///
/// Implementations are shared by every virtual user, so recording takes
/// `&self`.
pub trait CheckRecorder: Send + Sync {
    fn record(&self, step: Step, passed: bool);
}

/// Lock-free pass/fail counters per check.
#[derive(Debug, Default)]
pub struct CheckTally {
    passes: [AtomicU64; STEP_COUNT],
    fails: [AtomicU64; STEP_COUNT],
}

impl CheckTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn summary(&self) -> CheckSummary {
        let checks = Step::ALL
            .iter()
            .map(|step| CheckCount {
                step: *step,
                name: step.check_name(),
                passes: load(&self.passes, *step),
                fails: load(&self.fails, *step),
            })
            .collect();
        CheckSummary { checks }
    }
}

impl CheckRecorder for CheckTally {
    fn record(&self, step: Step, passed: bool) {
        let counters = if passed { &self.passes } else { &self.fails };
        if let Some(counter) = counters.get(step.slot()) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn load(counters: &[AtomicU64; STEP_COUNT], step: Step) -> u64 {
    counters
        .get(step.slot())
        .map_or(0, |counter| counter.load(Ordering::Relaxed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckCount {
    pub step: Step,
    pub name: &'static str,
    pub passes: u64,
    pub fails: u64,
}

impl CheckCount {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.passes.saturating_add(self.fails)
    }

    /// Pass rate in hundredths of a percent (`10_000` is 100%).
    #[must_use]
    pub fn pass_rate_x100(&self) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let scaled = u128::from(self.passes)
            .saturating_mul(10_000)
            .checked_div(u128::from(total))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub checks: Vec<CheckCount>,
}

impl CheckSummary {
    #[must_use]
    pub fn get(&self, step: Step) -> Option<&CheckCount> {
        self.checks.iter().find(|check| check.step == step)
    }

    #[must_use]
    pub fn total_passes(&self) -> u64 {
        self.checks
            .iter()
            .fold(0u64, |acc, check| acc.saturating_add(check.passes))
    }

    #[must_use]
    pub fn total_fails(&self) -> u64 {
        self.checks
            .iter()
            .fold(0u64, |acc, check| acc.saturating_add(check.fails))
    }
}
