pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;

use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Open a pooled connection to the configured database.
///
/// In-memory SQLite is pinned to a single connection: every pooled
/// connection to `:memory:` would otherwise see its own empty database.
pub async fn connect(url: &str, max_conns: Option<u32>) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(url.to_owned());
    let max_conns = if url.contains(":memory:") {
        1
    } else {
        max_conns.unwrap_or(10)
    };
    opts.max_connections(max_conns)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database ({})", redact(url)))
}

/// Hide the password part of a connection URL for log/error output.
pub fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let creds = &url[scheme_end + 3..at];
            match creds.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &creds[..colon],
                    &url[at..]
                ),
                None => url.to_owned(),
            }
        }
        _ => url.to_owned(),
    }
}
