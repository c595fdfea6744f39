// src/commands/info.rs

//! Info command - report package metadata

use super::{load_recipe, resolve_settings};
use crate::cli::{RecipeArgs, TargetArgs};
use anyhow::{Context, Result};
use cn_cbor_recipe::recipe::{Kitchen, KitchenConfig, RecipeOptions};
use std::path::{Path, PathBuf};

/// Scan an installed package folder and print its metadata as JSON
pub fn cmd_info(
    package_dir: &str,
    recipe_args: &RecipeArgs,
    target: &TargetArgs,
    shared: bool,
) -> Result<()> {
    if !Path::new(package_dir).is_dir() {
        anyhow::bail!("Package folder not found: {}", package_dir);
    }

    let recipe = load_recipe(recipe_args)?;
    let settings = resolve_settings(target)?;
    let options = RecipeOptions {
        shared: shared || recipe.options.shared,
    };

    let kitchen = Kitchen::new(KitchenConfig {
        package_dir: Some(PathBuf::from(package_dir)),
        ..Default::default()
    });
    let cook = kitchen.prepare(&recipe, options, &settings)?;
    let info = cook.export_metadata();

    println!("{}", info.to_json().context("Failed to render package info")?);
    Ok(())
}
