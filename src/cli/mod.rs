// src/cli/mod.rs
//! CLI definitions for the cn-cbor recipe
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `cook` - source, configure, build, package and export in one go
//! - `source` - only fetch the source
//! - `info` - report the metadata of an installed package folder
//! - `recipe` - validate and print the effective recipe
//! - `completions` - shell completions

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "cn-cbor-recipe")]
#[command(author = "cn-cbor-recipe Contributors")]
#[command(version)]
#[command(about = "Fetch, build and package the cn-cbor C library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the recipe comes from
#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    /// Recipe file (TOML); the built-in cn-cbor recipe when omitted
    #[arg(long)]
    pub recipe: Option<String>,

    /// Clone from this repository instead of the recipe's
    #[arg(long)]
    pub git_url: Option<String>,
}

/// What the package is built for
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Settings profile (TOML with a [settings] table); host settings when omitted
    #[arg(long)]
    pub profile: Option<String>,

    /// Target operating system (Linux, Macos, Windows, FreeBSD, Android)
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture (x86_64, x86, armv7, armv8)
    #[arg(long)]
    pub arch: Option<String>,

    /// Build type (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(long)]
    pub build_type: Option<String>,

    /// Compiler name
    #[arg(long)]
    pub compiler: Option<String>,

    /// Compiler version
    #[arg(long)]
    pub compiler_version: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, configure, build and package cn-cbor
    Cook {
        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Build a shared library instead of a static one
        #[arg(long)]
        shared: bool,

        /// Directory to clone and build in
        #[arg(short, long, default_value = ".")]
        work_dir: String,

        /// Install prefix (default: <work-dir>/package)
        #[arg(short, long)]
        package_dir: Option<String>,

        /// Number of parallel build jobs (default: available CPUs)
        #[arg(short, long)]
        jobs: Option<u32>,

        /// CMake generator
        #[arg(short = 'G', long)]
        generator: Option<String>,
    },

    /// Only fetch the source into <work-dir>/source_subfolder
    Source {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Directory to clone into
        #[arg(short, long, default_value = ".")]
        work_dir: String,
    },

    /// Print the metadata of an installed package folder as JSON
    Info {
        /// Package folder to scan
        package_dir: String,

        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// The package was built as a shared library
        #[arg(long)]
        shared: bool,
    },

    /// Validate the recipe and print it as TOML
    Recipe {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cook() {
        let cli = Cli::try_parse_from([
            "cn-cbor-recipe",
            "cook",
            "--shared",
            "--os",
            "Linux",
            "-w",
            "/tmp/cn",
            "-G",
            "Ninja",
        ])
        .unwrap();

        match cli.command {
            Commands::Cook {
                shared,
                target,
                work_dir,
                generator,
                ..
            } => {
                assert!(shared);
                assert_eq!(target.os.as_deref(), Some("Linux"));
                assert_eq!(work_dir, "/tmp/cn");
                assert_eq!(generator.as_deref(), Some("Ninja"));
            }
            _ => panic!("expected cook"),
        }
    }
}
