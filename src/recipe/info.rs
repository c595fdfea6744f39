// src/recipe/info.rs

//! Package metadata exported to downstream consumers

use crate::error::{Error, Result};
use crate::recipe::format::{Recipe, RecipeOptions};
use crate::recipe::settings::{system_libs, Settings};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extensions that mark a linkable library
pub const LIB_EXTENSIONS: [&str; 5] = ["so", "lib", "a", "dylib", "bc"];

/// File name of the exported metadata inside the package folder
pub const PACKAGE_INFO_FILE: &str = "package-info.json";

/// What a consumer needs to link against the package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub license: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub topics: Vec<String>,
    /// Link names found in the package's `lib` directory
    pub libs: Vec<String>,
    /// Libraries the platform must provide (`m` on Linux)
    pub system_libs: Vec<String>,
    pub include_dirs: Vec<String>,
    pub lib_dirs: Vec<String>,
    /// Rebuild key, see [`package_id`]
    pub package_id: String,
}

impl PackageInfo {
    /// Scan `package_folder` and assemble the metadata
    ///
    /// Never fails: an absent or empty `lib` directory yields no libs.
    pub fn collect(
        recipe: &Recipe,
        options: &RecipeOptions,
        settings: &Settings,
        package_folder: &Path,
    ) -> Self {
        let libs = collect_libs(&package_folder.join("lib"));
        if libs.is_empty() {
            warn!(
                "No libraries found in {}/lib",
                package_folder.display()
            );
        }

        Self {
            name: recipe.package.name.clone(),
            version: recipe.package.version.clone(),
            license: recipe.package.license.clone(),
            url: recipe.package.url.clone(),
            description: recipe.package.description.clone(),
            topics: recipe.package.topics.clone(),
            libs,
            system_libs: system_libs(settings.os),
            include_dirs: vec!["include".to_string()],
            lib_dirs: vec!["lib".to_string()],
            package_id: package_id(recipe, options, settings),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::ParseError(format!("Failed to serialize package info: {}", e)))
    }

    /// Write as JSON to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|e| {
            Error::IoError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::ParseError(format!("Invalid package info: {}", e)))
    }
}

/// Link names of the libraries directly inside `lib_dir`
///
/// `libcn-cbor.a` and `libcn-cbor.so` both give `cn-cbor`; `.lib` files
/// keep their full stem. Versioned sonames (`libx.so.1`) are skipped, the
/// unversioned link is what a consumer links against. Sorted, no duplicates.
pub fn collect_libs(lib_dir: &Path) -> Vec<String> {
    let mut libs = BTreeSet::new();

    for entry in WalkDir::new(lib_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let (Some(stem), Some(ext)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.extension().and_then(|e| e.to_str()),
        ) else {
            continue;
        };

        if !LIB_EXTENSIONS.contains(&ext) {
            continue;
        }

        let name = match stem.strip_prefix("lib") {
            Some(stripped) if ext != "lib" && !stripped.is_empty() => stripped,
            _ => stem,
        };
        debug!("Found library {} ({})", name, path.display());
        libs.insert(name.to_string());
    }

    libs.into_iter().collect()
}

/// SHA-256 over the recipe identity, options and settings
///
/// Pass settings after [`Settings::configure_for_c`] so C++ sub-settings
/// do not change the id.
pub fn package_id(recipe: &Recipe, options: &RecipeOptions, settings: &Settings) -> String {
    let mut data = String::new();

    data.push_str(&format!(
        "name:{}\nversion:{}\n",
        recipe.package.name, recipe.package.version
    ));
    data.push_str(&format!("shared:{}\n", options.shared));
    data.push_str(&format!(
        "os:{}\narch:{}\nbuild_type:{}\ncompiler:{}\n",
        settings.os, settings.arch, settings.build_type, settings.compiler.name
    ));

    if let Some(ref v) = settings.compiler.version {
        data.push_str("compiler.version:");
        data.push_str(v);
        data.push('\n');
    }
    if let Some(ref v) = settings.compiler.libcxx {
        data.push_str("compiler.libcxx:");
        data.push_str(v);
        data.push('\n');
    }
    if let Some(ref v) = settings.compiler.cppstd {
        data.push_str("compiler.cppstd:");
        data.push_str(v);
        data.push('\n');
    }

    hex::encode(Sha256::digest(data.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::settings::{Arch, BuildType, Compiler, Os};

    fn settings(os: Os) -> Settings {
        Settings {
            os,
            arch: Arch::X86_64,
            build_type: BuildType::Release,
            compiler: Compiler::default(),
        }
    }

    #[test]
    fn test_collect_libs_link_names() {
        let dir = tempfile::tempdir().unwrap();
        for file in ["libcn-cbor.a", "libcn-cbor.so", "cn-cbor.lib", "libextra.dylib", "README"] {
            fs::write(dir.path().join(file), b"").unwrap();
        }
        fs::create_dir(dir.path().join("cmake")).unwrap();

        let libs = collect_libs(dir.path());
        assert_eq!(libs, vec!["cn-cbor", "extra"]);
    }

    #[test]
    fn test_collect_libs_skips_versioned_soname() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("libcn-cbor.so.1"), b"").unwrap();
        assert!(collect_libs(dir.path()).is_empty());
    }

    #[test]
    fn test_collect_libs_missing_dir() {
        assert!(collect_libs(Path::new("/nonexistent/package/lib")).is_empty());
    }

    #[test]
    fn test_collect_metadata_linux() {
        let dir = tempfile::tempdir().unwrap();
        let info = PackageInfo::collect(
            &Recipe::cn_cbor(),
            &RecipeOptions::default(),
            &settings(Os::Linux),
            dir.path(),
        );
        assert_eq!(info.name, "cn-cbor");
        assert_eq!(info.system_libs, vec!["m"]);
        assert!(info.libs.is_empty());
        assert_eq!(info.package_id.len(), 64);
    }

    #[test]
    fn test_collect_metadata_macos() {
        let dir = tempfile::tempdir().unwrap();
        let info = PackageInfo::collect(
            &Recipe::cn_cbor(),
            &RecipeOptions::default(),
            &settings(Os::Macos),
            dir.path(),
        );
        assert!(info.system_libs.is_empty());
    }

    #[test]
    fn test_package_id_ignores_cxx_after_configure() {
        let recipe = Recipe::cn_cbor();
        let options = RecipeOptions::default();

        let mut a = settings(Os::Linux);
        a.compiler.cppstd = Some("17".to_string());
        a.compiler.libcxx = Some("libstdc++11".to_string());
        let mut b = settings(Os::Linux);
        b.compiler.cppstd = Some("20".to_string());
        b.compiler.libcxx = Some("libc++".to_string());

        assert_ne!(package_id(&recipe, &options, &a), package_id(&recipe, &options, &b));

        a.configure_for_c();
        b.configure_for_c();
        assert_eq!(package_id(&recipe, &options, &a), package_id(&recipe, &options, &b));
    }

    #[test]
    fn test_package_id_depends_on_shared() {
        let recipe = Recipe::cn_cbor();
        let s = settings(Os::Linux);
        assert_ne!(
            package_id(&recipe, &RecipeOptions { shared: false }, &s),
            package_id(&recipe, &RecipeOptions { shared: true }, &s)
        );
    }

    #[test]
    fn test_write_and_read_package_info() {
        let dir = tempfile::tempdir().unwrap();
        let info = PackageInfo::collect(
            &Recipe::cn_cbor(),
            &RecipeOptions::default(),
            &settings(Os::Linux),
            dir.path(),
        );
        let path = dir.path().join(PACKAGE_INFO_FILE);
        info.write_to(&path).unwrap();
        assert_eq!(PackageInfo::read_from(&path).unwrap(), info);
    }
}
