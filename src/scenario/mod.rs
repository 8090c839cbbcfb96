//! The per-virtual-user workflow against the coin service.
//!
//! One iteration runs register, authenticate, profile, transfer and purchase
//! in order and records one check per executed step. The HTTP client and the
//! check recorder are injected, so the workflow runs the same against the
//! real service and against scripted test doubles.
mod checks;
mod client;
mod identity;
mod steps;
mod workflow;

#[cfg(test)]
pub(crate) mod test_support;

pub use checks::{CheckCount, CheckRecorder, CheckSummary, CheckTally};
pub use client::{ApiRequest, ApiResponse, HttpMethod, ScenarioClient};
pub use identity::{USERNAME_PREFIX, VirtualUser};
pub use steps::Step;
pub use workflow::{IterationResult, Scenario, ScenarioSettings, StopReason};
