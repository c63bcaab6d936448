//! Environment variable keys and their aliases.
//!
//! Primary keys use the `SCOUTSPAWN_*` prefix.

/// ament / ROS environment
pub mod ament {
    /// Install prefixes searched for packages, separated like `PATH`.
    pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";
}

/// Defaults for the declared launch arguments
pub mod launch {
    pub const SCOUTSPAWN_NAMESPACE: &str = "SCOUTSPAWN_NAMESPACE";
    pub const SCOUTSPAWN_X_POSE: &str = "SCOUTSPAWN_X_POSE";
    pub const SCOUTSPAWN_Y_POSE: &str = "SCOUTSPAWN_Y_POSE";
    pub const SCOUTSPAWN_YAW_POSE: &str = "SCOUTSPAWN_YAW_POSE";
}

/// Logging and audit
pub mod observability {
    pub const SCOUTSPAWN_QUIET: &str = "SCOUTSPAWN_QUIET";

    pub const SCOUTSPAWN_LOG_LEVEL: &str = "SCOUTSPAWN_LOG_LEVEL";
    pub const LOG_LEVEL_ALIASES: &[&str] = &["SCOUTSPAWN_LOG"];

    pub const SCOUTSPAWN_LOG_JSON: &str = "SCOUTSPAWN_LOG_JSON";

    pub const SCOUTSPAWN_AUDIT_LOG: &str = "SCOUTSPAWN_AUDIT_LOG";
}
