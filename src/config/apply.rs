use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LoadArgs, PositiveU64, PositiveUsize, validate_item_name};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given explicitly on the command line win over the config file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "base_url")
        && let Some(base_url) = config.base_url.as_ref()
    {
        args.base_url = non_empty(base_url, "base_url")?;
    }

    if !is_cli(matches, "vus")
        && let Some(vus) = config.vus
    {
        args.vus = ensure_positive_usize(vus, "vus")?;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = duration.to_duration()?;
    }

    if !is_cli(matches, "pace")
        && let Some(pace) = config.pace.as_ref()
    {
        args.pace = pace.to_duration()?;
    }

    if !is_cli(matches, "iterations")
        && let Some(iterations) = config.iterations
    {
        args.iterations = Some(ensure_positive_u64(iterations, "iterations")?);
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration()?;
    }

    if !is_cli(matches, "password")
        && let Some(password) = config.password.as_ref()
    {
        args.password = non_empty(password, "password")?;
    }

    if !is_cli(matches, "transfer_to")
        && let Some(transfer_to) = config.transfer_to.as_ref()
    {
        args.transfer_to = non_empty(transfer_to, "transfer_to")?;
    }

    if !is_cli(matches, "transfer_amount")
        && let Some(amount) = config.transfer_amount
    {
        args.transfer_amount = ensure_positive_u64(amount, "transfer_amount")?;
    }

    if !is_cli(matches, "item")
        && let Some(item) = config.item.as_ref()
    {
        args.item = validate_item_name(item).map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "item",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "purchase_amount")
        && let Some(amount) = config.purchase_amount
    {
        args.purchase_amount = ensure_positive_u64(amount, "purchase_amount")?;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn non_empty(value: &str, field: &'static str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::config(ConfigError::InvalidField {
            field,
            source: ValidationError::EmptyValue,
        }));
    }
    Ok(trimmed.to_owned())
}
