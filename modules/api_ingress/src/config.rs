use std::path::PathBuf;

use runtime::ServerConfig;
use serde::{Deserialize, Serialize};

/// 1 MiB, enough for any phonebook payload
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// HTTP host configuration, derived from the `server` section of the app config.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    /// Directory for static assets; `None` disables static serving.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Permissive CORS, on unless switched off.
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
    /// Handler timeout in seconds, 0 disables it.
    #[serde(default)]
    pub timeout_sec: u64,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_cors_enabled() -> bool {
    true
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".to_string(),
            static_dir: None,
            cors_enabled: true,
            timeout_sec: 30,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl From<&ServerConfig> for ApiIngressConfig {
    fn from(server: &ServerConfig) -> Self {
        let static_dir = server.static_dir.trim();
        Self {
            bind_addr: format!("{}:{}", server.host, server.port),
            static_dir: (!static_dir.is_empty()).then(|| PathBuf::from(static_dir)),
            cors_enabled: server.cors_enabled,
            timeout_sec: server.timeout_sec,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}
