// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is a TOML document with `[package]`, `[source]` and `[options]`
//! sections. Every field falls back to the built-in cn-cbor recipe, so an
//! empty document is a valid recipe.

use serde::{Deserialize, Serialize};

/// Name of the directory the fetched source is renamed to
pub const SOURCE_SUBFOLDER: &str = "source_subfolder";

/// Name of the CMake build directory
pub const BUILD_SUBFOLDER: &str = "build_subfolder";

/// A complete recipe for building a package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    #[serde(default)]
    pub package: PackageSection,

    /// Where the source comes from
    #[serde(default)]
    pub source: SourceSection,

    /// Consumer-facing options
    #[serde(default)]
    pub options: RecipeOptions,
}

impl Recipe {
    /// The built-in cn-cbor recipe
    pub fn cn_cbor() -> Self {
        Self::default()
    }

    /// `name-version` label used in log lines
    pub fn label(&self) -> String {
        format!("{}-{}", self.package.name, self.package.version)
    }
}

/// Package metadata section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version (date stamp of the upstream snapshot)
    pub version: String,

    /// License identifier
    pub license: Option<String>,

    /// Homepage URL
    pub url: Option<String>,

    /// Short description
    pub description: Option<String>,

    /// Topic tags
    pub topics: Vec<String>,
}

impl Default for PackageSection {
    fn default() -> Self {
        Self {
            name: "cn-cbor".to_string(),
            version: "20200227".to_string(),
            license: Some("BSD".to_string()),
            url: Some("https://github.com/cose-wg/cn-cbor".to_string()),
            description: Some("A constrained node implementation of CBOR in C".to_string()),
            topics: vec!["cn-cbor".to_string()],
        }
    }
}

/// Git source section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Repository to clone
    pub git: String,

    /// Branch to check out
    pub branch: String,

    /// Directory name `git clone` creates, renamed to [`SOURCE_SUBFOLDER`]
    pub clone_dir: String,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            git: "https://github.com/jimsch/cn-cbor.git".to_string(),
            branch: "complete".to_string(),
            clone_dir: "cn-cbor".to_string(),
        }
    }
}

impl SourceSection {
    /// Whether the repository is fetched over SSH (needs credentials)
    pub fn is_ssh(&self) -> bool {
        self.git.starts_with("git@") || self.git.starts_with("ssh://")
    }
}

/// Options a consumer may set
///
/// Only `shared` is exposed. The fixed CMake flags live in
/// [`crate::recipe::CMakeConfig`] and cannot be changed from here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeOptions {
    /// Build a shared library instead of a static one
    pub shared: bool,
}
