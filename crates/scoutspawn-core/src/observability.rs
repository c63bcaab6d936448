//! Observability: tracing init and the JSONL audit log.
//!
//! Uses config::ObservabilityConfig for SCOUTSPAWN_QUIET, LOG_LEVEL, LOG_JSON, AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call once at process startup; later calls are no-ops.
/// `RUST_LOG` takes precedence over SCOUTSPAWN_LOG_LEVEL.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "scoutspawn=warn".to_string()
    } else {
        cfg.log_level.clone()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}

fn audit_path() -> Option<String> {
    crate::config::ObservabilityConfig::from_env()
        .audit_log
        .clone()
}

/// Append one JSON record per line, creating parent directories as needed.
pub fn append_jsonl(path: &Path, record: &serde_json::Value) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(f, "{}", record)
}

fn audit(record: serde_json::Value) {
    if let Some(path) = audit_path() {
        if let Err(e) = append_jsonl(Path::new(&path), &record) {
            tracing::warn!(path = %path, error = %e, "Failed to write audit record");
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Audit: execution_started (right before spawn)
pub fn audit_execution_started(entity: &str, cmd: &str, args: &[String]) {
    audit(json!({
        "ts": now(),
        "event": "execution_started",
        "entity": entity,
        "cmd": cmd,
        "args": args,
    }));
}

/// Audit: execution_completed
pub fn audit_execution_completed(entity: &str, exit_code: i32, duration_ms: u64) {
    audit(json!({
        "ts": now(),
        "event": "execution_completed",
        "entity": entity,
        "exit_code": exit_code,
        "duration_ms": duration_ms,
        "success": exit_code == 0,
    }));
}
