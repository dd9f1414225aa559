//! Observability utilities.

mod logging;

pub use logging::{build_env_filter, init_logging, LogFormat, LoggingConfig, LOG_ENV};
