// src/commands/mod.rs
//! Command handlers for the cn-cbor recipe CLI

mod cook;
mod info;
mod recipe;

pub use cook::{cmd_cook, cmd_source};
pub use info::cmd_info;
pub use recipe::cmd_recipe;

use crate::cli::{RecipeArgs, TargetArgs};
use anyhow::{Context, Result};
use cn_cbor_recipe::recipe::{parse_recipe_file, validate_recipe, Recipe, Settings};
use std::path::Path;
use tracing::warn;

/// Load the recipe (built-in or from file), apply overrides and validate it
pub(crate) fn load_recipe(args: &RecipeArgs) -> Result<Recipe> {
    let mut recipe = match &args.recipe {
        Some(path) => parse_recipe_file(Path::new(path))
            .with_context(|| format!("Failed to parse recipe: {}", path))?,
        None => Recipe::cn_cbor(),
    };

    if let Some(url) = &args.git_url {
        recipe.source.git = url.clone();
    }

    let warnings = validate_recipe(&recipe).context("Recipe validation failed")?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok(recipe)
}

/// Settings from the profile (or the host), then per-field overrides
pub(crate) fn resolve_settings(args: &TargetArgs) -> Result<Settings> {
    let mut settings = match &args.profile {
        Some(path) => Settings::from_profile_file(Path::new(path))
            .with_context(|| format!("Failed to load profile: {}", path))?,
        None => Settings::host().context("Failed to detect host settings")?,
    };

    if let Some(os) = &args.os {
        settings.os = os.parse()?;
    }
    if let Some(arch) = &args.arch {
        settings.arch = arch.parse()?;
    }
    if let Some(build_type) = &args.build_type {
        settings.build_type = build_type.parse()?;
    }
    if let Some(compiler) = &args.compiler {
        settings.compiler.name = compiler.clone();
    }
    if let Some(version) = &args.compiler_version {
        settings.compiler.version = Some(version.clone());
    }

    Ok(settings)
}
