//! HTTP transport for the scenario.
mod client;


pub use client::HttpScenarioClient;
