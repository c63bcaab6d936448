//! Locate a package executable the way `ros2 run` does.

use std::path::{Path, PathBuf};

use scoutspawn_core::ament::PackageIndex;
use scoutspawn_core::LaunchError;

/// `<prefix>/lib/<package>/<executable>` first, then `PATH`.
pub fn resolve_executable<I: PackageIndex + ?Sized>(
    index: &I,
    package: &str,
    executable: &str,
) -> Result<PathBuf, LaunchError> {
    match index.lib_directory(package) {
        Ok(lib_dir) => {
            let candidate = lib_dir.join(executable);
            if is_executable(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(
                candidate = %candidate.display(),
                "Executable not in package lib directory, searching PATH"
            );
        }
        Err(e) => {
            tracing::debug!(package, error = %e, "Package not indexed, searching PATH");
        }
    }

    which::which(executable).map_err(|_| LaunchError::ExecutableNotFound {
        package: package.to_string(),
        executable: executable.to_string(),
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
