//! Drives virtual users through the scenario and reports the result.
mod summary;
mod worker;


pub use summary::{CheckReport, RunReport};
pub use worker::{RunOutcome, RunSettings, run_load};
