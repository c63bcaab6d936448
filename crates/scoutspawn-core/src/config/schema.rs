//! Configuration structs grouped by concern, loaded from the environment.

use super::env_keys::{ament as ament_keys, observability as obv_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// ament install prefixes, in search order.
#[derive(Debug, Clone, Default)]
pub struct AmentConfig {
    pub prefixes: Vec<PathBuf>,
}

impl AmentConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let prefixes = env_optional(ament_keys::AMENT_PREFIX_PATH, &[])
            .map(|raw| Self::split_prefix_path(&raw))
            .unwrap_or_default();
        Self { prefixes }
    }

    /// Split a `PATH`-style list, dropping empty entries.
    pub fn split_prefix_path(raw: &str) -> Vec<PathBuf> {
        std::env::split_paths(raw)
            .filter(|p| !p.as_os_str().is_empty())
            .collect()
    }
}

/// Logging and audit settings.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::SCOUTSPAWN_QUIET, &[], false),
                log_level: env_or(
                    obv_keys::SCOUTSPAWN_LOG_LEVEL,
                    obv_keys::LOG_LEVEL_ALIASES,
                    || "scoutspawn=info".to_string(),
                ),
                log_json: env_bool(obv_keys::SCOUTSPAWN_LOG_JSON, &[], false),
                audit_log: env_optional(obv_keys::SCOUTSPAWN_AUDIT_LOG, &[]),
            }
        })
    }
}
