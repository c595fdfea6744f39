// src/recipe/mod.rs

//! Recipe for building and packaging cn-cbor from source
//!
//! The recipe says where the source lives, which options a consumer may
//! set, and what metadata the finished package carries. The build itself
//! is delegated to git and CMake.
//!
//! # Culinary Terminology
//!
//! - **Recipe**: the build specification
//! - **Kitchen**: runs recipes with a given set of tools
//! - **Cook**: one run of the recipe through the Kitchen
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "cn-cbor"
//! version = "20200227"
//! license = "BSD"
//!
//! [source]
//! git = "https://github.com/jimsch/cn-cbor.git"
//! branch = "complete"
//!
//! [options]
//! shared = false
//! ```

mod format;
pub mod info;
mod kitchen;
pub mod parser;
pub mod settings;

pub use format::{
    PackageSection, Recipe, RecipeOptions, SourceSection, BUILD_SUBFOLDER, SOURCE_SUBFOLDER,
};
pub use info::{collect_libs, package_id, PackageInfo, PACKAGE_INFO_FILE};
pub use kitchen::{
    clone_args, BuildTool, CMake, CMakeConfig, Cook, CookResult, GitFetcher, Kitchen,
    KitchenConfig, SourceFetcher, ToolOutput, FIXED_FLAGS, toolchain_definitions,
};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};
pub use settings::{system_libs, Arch, BuildType, Compiler, Os, Settings};
