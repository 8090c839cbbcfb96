use super::parsers::{parse_bool_env, parse_duration_arg, validate_item_name};
use super::*;
use crate::error::{AppError, AppResult};
use std::time::Duration;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["merchload"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (args.base_url == DEFAULT_BASE_URL, "Unexpected base_url"),
        (args.vus.get() == 100, "Unexpected vus"),
        (
            args.duration == Duration::from_secs(30),
            "Unexpected duration",
        ),
        (args.pace == Duration::from_secs(1), "Unexpected pace"),
        (args.iterations.is_none(), "Expected iterations to be None"),
        (args.password == "password123", "Unexpected password"),
        (args.transfer_to == "admin", "Unexpected transfer_to"),
        (args.transfer_amount.get() == 1, "Unexpected transfer_amount"),
        (args.item == "pen", "Unexpected item"),
        (args.purchase_amount.get() == 1, "Unexpected purchase_amount"),
        (
            args.request_timeout == Duration::from_secs(30),
            "Unexpected request_timeout",
        ),
        (
            matches!(args.output_format, OutputFormat::Text),
            "Expected OutputFormat::Text",
        ),
        (args.config.is_none(), "Expected config to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_overrides() -> AppResult<()> {
    let args = parse_test_args([
        "merchload",
        "-u",
        "http://127.0.0.1:9000/api",
        "--concurrency",
        "5",
        "-t",
        "2m",
        "--pace",
        "250ms",
        "--iterations",
        "3",
        "--item",
        "t-shirt",
        "--transfer-to",
        "bob",
        "--transfer-amount",
        "7",
        "--output-format",
        "JSON",
    ])?;

    if args.base_url != "http://127.0.0.1:9000/api" {
        return Err(AppError::validation(format!(
            "Unexpected base_url: {}",
            args.base_url
        )));
    }
    if args.vus.get() != 5 {
        return Err(AppError::validation("Expected --concurrency alias to set vus"));
    }
    if args.duration != Duration::from_secs(120) {
        return Err(AppError::validation("Unexpected duration"));
    }
    if args.pace != Duration::from_millis(250) {
        return Err(AppError::validation("Unexpected pace"));
    }
    if args.iterations.map(PositiveU64::get) != Some(3) {
        return Err(AppError::validation("Unexpected iterations"));
    }
    if args.item != "t-shirt" || args.transfer_to != "bob" || args.transfer_amount.get() != 7 {
        return Err(AppError::validation("Unexpected scenario overrides"));
    }
    if !matches!(args.output_format, OutputFormat::Json) {
        return Err(AppError::validation("Expected OutputFormat::Json"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_vus() -> AppResult<()> {
    if parse_test_args(["merchload", "--vus", "0"]).is_ok() {
        return Err(AppError::validation("Expected error for zero vus"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_bad_item() -> AppResult<()> {
    if parse_test_args(["merchload", "--item", "pen/../admin"]).is_ok() {
        return Err(AppError::validation("Expected error for item with slash"));
    }
    if parse_test_args(["merchload", "--password", "  "]).is_ok() {
        return Err(AppError::validation("Expected error for blank password"));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> AppResult<()> {
    let cases = [
        ("15", Duration::from_secs(15)),
        ("500ms", Duration::from_millis(500)),
        ("3s", Duration::from_secs(3)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }

    for input in ["", "0s", "abc", "5d"] {
        if parse_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected error for duration '{}'",
                input
            )));
        }
    }
    Ok(())
}

#[test]
fn item_names_are_single_segments() -> AppResult<()> {
    for item in ["pen", "pink-hoody", "t_shirt", "cup2"] {
        validate_item_name(item)?;
    }
    for item in ["", "a b", "buy/pen", "%2F"] {
        if validate_item_name(item).is_ok() {
            return Err(AppError::validation(format!(
                "Expected error for item '{}'",
                item
            )));
        }
    }
    Ok(())
}
