// src/lib.rs

//! cn-cbor package recipe
//!
//! Fetches the cn-cbor C library, builds it with CMake and packages the
//! result together with the metadata a consumer needs to link it.
//!
//! # Architecture
//!
//! - Recipe: immutable package metadata, git source and the `shared` option
//! - Settings: target os/arch/build type/compiler, supplied by the harness
//! - Kitchen: runs source -> configure -> build -> package -> export
//! - Tools: `git` and `cmake` behind the `SourceFetcher`/`BuildTool` traits

mod error;
pub mod recipe;

pub use error::{Error, Result};
pub use recipe::{Cook, CookResult, Kitchen, KitchenConfig, PackageInfo, Recipe, RecipeOptions, Settings};
