use chrono::{FixedOffset, NaiveTime};
use std::{env, time::Duration};

use crate::error::ConfigError;
use crate::util::{
    HOST, PORT, VAR_BASE_API_URL, VAR_DISPLAY_UTC_OFFSET_HOURS, VAR_HTTP_TIMEOUT_SECS,
    VAR_PAYMENT_TARGET, VAR_PAYMENT_TIME_1, VAR_PAYMENT_TIME_2, VAR_REMIND_INTERVAL_MINUTES,
};

const DEFAULT_REMIND_INTERVAL_MINUTES: u64 = 30;
const DEFAULT_PAYMENT_TIME_1: &str = "00:00";
const DEFAULT_PAYMENT_TIME_2: &str = "06:00";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Who receives the payment reminder for an appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentTarget {
    /// Resolve the patient's relative through the patient service.
    Relatives,
    /// Notify the patient account directly.
    Patient,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub base_api_url: String,
    pub remind_interval: Duration,
    pub payment_times: [NaiveTime; 2],
    pub payment_target: PaymentTarget,
    /// Offset used to print the visit start time in attendance messages.
    pub display_offset: Option<FixedOffset>,
    pub http_timeout: Duration,
    pub host: String,
    pub port: String,
    /// Fallbacks applied while loading, logged once logging is up.
    pub notices: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut notices = Vec::new();

        let base_api_url = var(VAR_BASE_API_URL)
            .ok_or(ConfigError::Missing(VAR_BASE_API_URL))?
            .trim_end_matches('/')
            .to_string();

        let remind_minutes = match var(VAR_REMIND_INTERVAL_MINUTES) {
            None => DEFAULT_REMIND_INTERVAL_MINUTES,
            Some(raw) => match raw.parse::<u64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    notices.push(format!(
                        "{VAR_REMIND_INTERVAL_MINUTES}={raw:?} is not a positive number, using {DEFAULT_REMIND_INTERVAL_MINUTES}"
                    ));
                    DEFAULT_REMIND_INTERVAL_MINUTES
                }
            },
        };

        let payment_times = [
            parse_fire_time(VAR_PAYMENT_TIME_1, var(VAR_PAYMENT_TIME_1), DEFAULT_PAYMENT_TIME_1)?,
            parse_fire_time(VAR_PAYMENT_TIME_2, var(VAR_PAYMENT_TIME_2), DEFAULT_PAYMENT_TIME_2)?,
        ];

        let payment_target = match var(VAR_PAYMENT_TARGET).as_deref() {
            None | Some("relatives") => PaymentTarget::Relatives,
            Some("patient") => PaymentTarget::Patient,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: VAR_PAYMENT_TARGET,
                    value: other.to_string(),
                })
            }
        };

        let display_offset = match var(VAR_DISPLAY_UTC_OFFSET_HOURS) {
            None => None,
            Some(raw) => {
                let offset = raw
                    .parse::<i32>()
                    .ok()
                    .and_then(|hours| hours.checked_mul(3600))
                    .and_then(FixedOffset::east_opt);
                match offset {
                    Some(offset) => Some(offset),
                    None => {
                        return Err(ConfigError::Invalid {
                            var: VAR_DISPLAY_UTC_OFFSET_HOURS,
                            value: raw,
                        })
                    }
                }
            }
        };

        let http_timeout_secs = match var(VAR_HTTP_TIMEOUT_SECS) {
            None => DEFAULT_HTTP_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: VAR_HTTP_TIMEOUT_SECS,
                        value: raw,
                    })
                }
            },
        };

        Ok(Config {
            base_api_url,
            remind_interval: Duration::from_secs(remind_minutes * 60),
            payment_times,
            payment_target,
            display_offset,
            http_timeout: Duration::from_secs(http_timeout_secs),
            host: var(HOST).unwrap_or(String::from("127.0.0.1")),
            port: var(PORT).unwrap_or(String::from("9898")),
            notices,
        })
    }
}

/// Extra startup hint for errors caused by an unset variable.
pub fn missing_vars_hint(err: &ConfigError) -> Option<String> {
    match err {
        ConfigError::Missing(_) => Some(format!("Required environment variables: {VAR_BASE_API_URL}")),
        ConfigError::Invalid { .. } => None,
    }
}

fn parse_fire_time(
    var: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<NaiveTime, ConfigError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M").map_err(|_| ConfigError::Invalid { var, value: raw })
}
