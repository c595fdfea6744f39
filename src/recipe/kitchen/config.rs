// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen

use crate::recipe::info::PackageInfo;
use std::path::PathBuf;

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Directory the source is cloned into and built in
    pub work_dir: PathBuf,
    /// Install prefix; `<work_dir>/package` when unset
    pub package_dir: Option<PathBuf>,
    /// Number of parallel compile jobs
    pub jobs: u32,
    /// CMake generator (`-G`); CMake picks one when unset
    pub generator: Option<String>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            work_dir: PathBuf::from("."),
            package_dir: None,
            jobs,
            generator: None,
        }
    }
}

impl KitchenConfig {
    /// Configuration rooted at `work_dir`
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }

    /// Where the package is installed
    pub fn package_folder(&self) -> PathBuf {
        self.package_dir
            .clone()
            .unwrap_or_else(|| self.work_dir.join("package"))
    }
}

/// Result of cooking the recipe
#[derive(Debug)]
pub struct CookResult {
    /// Install prefix holding the package
    pub package_folder: PathBuf,
    /// Exported metadata
    pub info: PackageInfo,
    /// Output of every tool that ran
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitchen_config_default() {
        let config = KitchenConfig::default();
        assert!(config.jobs > 0);
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert!(config.generator.is_none());
    }

    #[test]
    fn test_package_folder() {
        let mut config = KitchenConfig::in_dir("/tmp/cook");
        assert_eq!(config.package_folder(), PathBuf::from("/tmp/cook/package"));

        config.package_dir = Some(PathBuf::from("/opt/cn-cbor"));
        assert_eq!(config.package_folder(), PathBuf::from("/opt/cn-cbor"));
    }
}
