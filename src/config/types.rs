use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_duration_arg};
use crate::error::{AppError, AppResult, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    #[serde(alias = "concurrency")]
    pub vus: Option<usize>,
    pub duration: Option<DurationValue>,
    pub pace: Option<DurationValue>,
    pub iterations: Option<u64>,
    pub timeout: Option<DurationValue>,
    pub password: Option<String>,
    pub transfer_to: Option<String>,
    pub transfer_amount: Option<u64>,
    pub item: Option<String>,
    pub purchase_amount: Option<u64>,
    pub output_format: Option<OutputFormat>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// Either a whole number of seconds or a duration string such as `"500ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(AppError::validation(ValidationError::DurationZero))
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
