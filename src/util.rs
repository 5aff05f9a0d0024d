use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use crate::LOG_CONFIG_PATH;

pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";

pub const VAR_BASE_API_URL: &str = "BASE_API_URL";
pub const VAR_REMIND_INTERVAL_MINUTES: &str = "REMIND_INTERVAL_MINUTES";
pub const VAR_PAYMENT_TIME_1: &str = "PAYMENT_TIME_1";
pub const VAR_PAYMENT_TIME_2: &str = "PAYMENT_TIME_2";
pub const VAR_PAYMENT_TARGET: &str = "PAYMENT_TARGET";
pub const VAR_DISPLAY_UTC_OFFSET_HOURS: &str = "DISPLAY_UTC_OFFSET_HOURS";
pub const VAR_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Loads `log4rs.yaml` when present, otherwise logs to stdout at info.
pub fn init_logging() {
    if log4rs::init_file(LOG_CONFIG_PATH, Default::default()).is_ok() {
        return;
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Failed to initialise logging: {e}");
            }
        }
        Err(e) => eprintln!("Invalid logging config: {e}"),
    }
}

/// Last few characters of an identifier, enough to correlate log lines.
pub fn get_short_id(id: &str) -> &str {
    let start = id.len().saturating_sub(8);
    id.get(start..).unwrap_or(id)
}
