use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::{
    args::OutputFormat,
    error::AppResult,
    scenario::{CheckCount, Step},
};

use super::worker::RunOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub step: Step,
    pub name: &'static str,
    pub passes: u64,
    pub fails: u64,
    pub pass_rate_x100: u64,
}

impl From<&CheckCount> for CheckReport {
    fn from(count: &CheckCount) -> Self {
        Self {
            step: count.step,
            name: count.name,
            passes: count.passes,
            fails: count.fails,
            pass_rate_x100: count.pass_rate_x100(),
        }
    }
}

/// End-of-run summary, printed as text or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub base_url: String,
    pub vus: usize,
    pub elapsed_ms: u64,
    pub iterations: u64,
    pub short_circuited: u64,
    pub checks_passed: u64,
    pub checks_failed: u64,
    pub checks: Vec<CheckReport>,
}

impl RunReport {
    #[must_use]
    pub fn new(
        started_at: DateTime<Utc>,
        base_url: &str,
        vus: usize,
        outcome: &RunOutcome,
    ) -> Self {
        Self {
            started_at: started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            base_url: base_url.to_owned(),
            vus,
            elapsed_ms: u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
            iterations: outcome.iterations,
            short_circuited: outcome.short_circuited,
            checks_passed: outcome.checks.total_passes(),
            checks_failed: outcome.checks.total_fails(),
            checks: outcome.checks.checks.iter().map(CheckReport::from).collect(),
        }
    }

    /// # Errors
    ///
    /// Returns an error when JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    #[must_use]
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            format!("Started: {}", self.started_at),
            format!("Target: {}", self.base_url),
            format!("Virtual Users: {}", self.vus),
            format!("Duration: {}ms", self.elapsed_ms),
            format!("Iterations: {}", self.iterations),
            format!("Stopped After Auth: {}", self.short_circuited),
            format!(
                "Checks: {} passed / {} failed",
                self.checks_passed, self.checks_failed
            ),
        ];
        for check in &self.checks {
            lines.push(format!(
                "  {} {}: {} passed / {} failed ({})",
                if check.fails == 0 { "✓" } else { "✗" },
                check.name,
                check.passes,
                check.fails,
                format_percent_x100(check.pass_rate_x100)
            ));
        }
        lines.join("\n")
    }
}

fn format_percent_x100(value: u64) -> String {
    format!("{}.{:02}%", value / 100, value % 100)
}
