//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use cli::LoadArgs;
pub use defaults::{
    DEFAULT_BASE_URL, DEFAULT_ITEM, DEFAULT_PASSWORD, DEFAULT_TRANSFER_RECIPIENT,
    DEFAULT_USER_AGENT,
};
pub use types::{OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use parsers::{parse_duration_arg, validate_item_name};
#[cfg(test)]
pub(crate) use test_support::parse_test_args;
