//! Logging - tracing-subscriber to stderr
//!
//! `RUST_LOG` filters (default `info`). `DIGIDOCK_LOG_JSON=1` switches to JSON
//! lines for log shippers.

use tracing_subscriber::{fmt, EnvFilter};

use crate::core::paths::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(env::LOG_JSON).ok().as_deref())
    }

    fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(str::trim) {
            Some("1") | Some("true") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

pub fn init_logging() {
    init_logging_with(LogFormat::from_env());
}

/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_logging_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::Subscriber::builder().with_env_filter(filter).with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_selects_json() {
        assert_eq!(LogFormat::from_flag(Some("1")), LogFormat::Json);
        assert_eq!(LogFormat::from_flag(Some("true")), LogFormat::Json);
        assert_eq!(LogFormat::from_flag(Some("0")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_flag(None), LogFormat::Pretty);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging_with(LogFormat::Pretty);
        init_logging_with(LogFormat::Json);
    }
}
