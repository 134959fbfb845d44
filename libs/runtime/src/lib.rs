//! Process bootstrap shared by the phonebook binaries: layered configuration,
//! logging sinks and shutdown signals.

pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
