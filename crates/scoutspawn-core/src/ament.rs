//! ament resource index lookups.
//!
//! A package `pkg` is installed under prefix `P` when the marker file
//! `P/share/ament_index/resource_index/packages/pkg` exists. Its data files
//! live in `P/share/pkg` and its executables in `P/lib/pkg`.

use std::path::{Path, PathBuf};

use crate::config::AmentConfig;
use crate::error::{LaunchError, Result};

const PACKAGES_RESOURCE_DIR: &str = "share/ament_index/resource_index/packages";

/// Lookup seam for installed packages.
pub trait PackageIndex {
    /// Install prefix holding `package`.
    fn prefix(&self, package: &str) -> Result<PathBuf>;

    /// `<prefix>/share/<package>`
    fn share_directory(&self, package: &str) -> Result<PathBuf> {
        Ok(self.prefix(package)?.join("share").join(package))
    }

    /// `<prefix>/lib/<package>`
    fn lib_directory(&self, package: &str) -> Result<PathBuf> {
        Ok(self.prefix(package)?.join("lib").join(package))
    }
}

/// Index over an ordered list of install prefixes. First match wins.
#[derive(Debug, Clone, Default)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
}

impl AmentIndex {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Build from `AMENT_PREFIX_PATH`.
    pub fn from_env() -> Self {
        Self::new(AmentConfig::from_env().prefixes)
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Every package registered under any prefix, sorted and deduplicated.
    pub fn packages(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .prefixes
            .iter()
            .filter_map(|p| std::fs::read_dir(p.join(PACKAGES_RESOURCE_DIR)).ok())
            .flat_map(|entries| entries.filter_map(|e| e.ok()))
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn has_marker(prefix: &Path, package: &str) -> bool {
        prefix.join(PACKAGES_RESOURCE_DIR).join(package).is_file()
    }
}

impl PackageIndex for AmentIndex {
    fn prefix(&self, package: &str) -> Result<PathBuf> {
        // Names with separators would escape the resource directory.
        if package.is_empty() || package.contains(|c: char| c == '/' || c == '\\') || package == ".." {
            return Err(LaunchError::PackageNotFound {
                package: package.to_string(),
            });
        }
        let found = self
            .prefixes
            .iter()
            .find(|p| Self::has_marker(p, package))
            .cloned();
        match found {
            Some(prefix) => {
                tracing::debug!(package, prefix = %prefix.display(), "Resolved ament package");
                Ok(prefix)
            }
            None => Err(LaunchError::PackageNotFound {
                package: package.to_string(),
            }),
        }
    }
}

/// Create the marker and share directory for `package` under `prefix`.
/// Used by tests and by tooling that stages a fake install tree.
pub fn register_package(prefix: &Path, package: &str) -> std::io::Result<PathBuf> {
    let marker_dir = prefix.join(PACKAGES_RESOURCE_DIR);
    std::fs::create_dir_all(&marker_dir)?;
    std::fs::write(marker_dir.join(package), "")?;
    let share = prefix.join("share").join(package);
    std::fs::create_dir_all(&share)?;
    Ok(share)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_directory_found() {
        let tmp = tempfile::tempdir().unwrap();
        register_package(tmp.path(), "scout_gazebo_sim").unwrap();
        let index = AmentIndex::new(vec![tmp.path().to_path_buf()]);
        assert_eq!(
            index.share_directory("scout_gazebo_sim").unwrap(),
            tmp.path().join("share").join("scout_gazebo_sim")
        );
        assert_eq!(
            index.lib_directory("scout_gazebo_sim").unwrap(),
            tmp.path().join("lib").join("scout_gazebo_sim")
        );
    }

    #[test]
    fn test_share_directory_without_marker_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        // share dir alone is not enough
        std::fs::create_dir_all(tmp.path().join("share/scout_gazebo_sim")).unwrap();
        let index = AmentIndex::new(vec![tmp.path().to_path_buf()]);
        let err = index.share_directory("scout_gazebo_sim").unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, LaunchError::PackageNotFound { ref package } if package == "scout_gazebo_sim"));
    }

    #[test]
    fn test_first_prefix_wins() {
        let overlay = tempfile::tempdir().unwrap();
        let underlay = tempfile::tempdir().unwrap();
        register_package(overlay.path(), "gazebo_ros").unwrap();
        register_package(underlay.path(), "gazebo_ros").unwrap();
        let index = AmentIndex::new(vec![
            overlay.path().to_path_buf(),
            underlay.path().to_path_buf(),
        ]);
        assert_eq!(index.prefix("gazebo_ros").unwrap(), overlay.path());
    }

    #[test]
    fn test_empty_index_and_bad_names() {
        let index = AmentIndex::default();
        assert!(index.prefix("gazebo_ros").is_err());
        assert!(index.prefix("../etc").is_err());
        assert!(index.prefix("").is_err());
    }

    #[test]
    fn test_packages_lists_all_prefixes() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        register_package(a.path(), "scout_gazebo_sim").unwrap();
        register_package(b.path(), "gazebo_ros").unwrap();
        register_package(b.path(), "scout_gazebo_sim").unwrap();
        let index = AmentIndex::new(vec![a.path().to_path_buf(), b.path().to_path_buf()]);
        assert_eq!(index.packages(), vec!["gazebo_ros", "scout_gazebo_sim"]);
    }
}
