use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_AMOUNT, DEFAULT_BASE_URL, DEFAULT_DURATION, DEFAULT_ITEM, DEFAULT_PACE,
    DEFAULT_PASSWORD, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TRANSFER_RECIPIENT, DEFAULT_VUS,
};
use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_item_name, parse_non_empty, parse_positive_u64,
    parse_positive_usize,
};
use super::types::{OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Virtual-user load scenario for coin-transfer merch store APIs: each user registers, authenticates, reads its balance, sends a coin, and buys an item, with pass/fail checks per step."
)]
pub struct LoadArgs {
    /// Base URL of the target API (endpoints are resolved below it)
    #[arg(long = "base-url", short = 'u', default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of concurrent virtual users
    #[arg(
        long = "vus",
        short = 'c',
        alias = "concurrency",
        default_value = DEFAULT_VUS,
        value_parser = parse_positive_usize
    )]
    pub vus: PositiveUsize,

    /// Test duration (supports ms/s/m/h, bare numbers are seconds)
    #[arg(
        long = "duration",
        short = 't',
        default_value = DEFAULT_DURATION,
        value_parser = parse_duration_arg
    )]
    pub duration: Duration,

    /// Pause between iterations of one virtual user (supports ms/s/m/h)
    #[arg(long = "pace", default_value = DEFAULT_PACE, value_parser = parse_duration_arg)]
    pub pace: Duration,

    /// Stop each virtual user after this many iterations
    #[arg(long = "iterations", short = 'i', value_parser = parse_positive_u64)]
    pub iterations: Option<PositiveU64>,

    /// Password used for every generated test user
    #[arg(long, default_value = DEFAULT_PASSWORD, value_parser = parse_non_empty)]
    pub password: String,

    /// Recipient of the coin transfer step
    #[arg(long = "transfer-to", default_value = DEFAULT_TRANSFER_RECIPIENT, value_parser = parse_non_empty)]
    pub transfer_to: String,

    /// Coins sent per transfer
    #[arg(long = "transfer-amount", default_value = DEFAULT_AMOUNT, value_parser = parse_positive_u64)]
    pub transfer_amount: PositiveU64,

    /// Item bought in the purchase step
    #[arg(long, default_value = DEFAULT_ITEM, value_parser = parse_item_name)]
    pub item: String,

    /// Quantity bought per purchase
    #[arg(long = "purchase-amount", default_value = DEFAULT_AMOUNT, value_parser = parse_positive_u64)]
    pub purchase_amount: PositiveU64,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Summary output format
    #[arg(long = "output-format", value_enum, default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Path to config file (TOML/JSON). Defaults to ./merchload.toml or ./merchload.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by MERCHLOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
