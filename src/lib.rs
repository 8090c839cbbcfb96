//! Virtual-user load scenario for coin-transfer merch store APIs.
//!
//! Each virtual user registers, authenticates, reads its profile, sends
//! coins and buys an item, recording a pass/fail check per step. The
//! `merchload` binary drives many users concurrently and prints a per-check
//! summary; the library exposes the workflow so it can run against any
//! [`scenario::ScenarioClient`].
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod runner;
pub mod scenario;
pub mod shutdown;

mod entry;
mod logger;

pub use entry::run;
