// src/commands/cook.rs

//! Cook command - build and package cn-cbor

use super::{load_recipe, resolve_settings};
use crate::cli::{RecipeArgs, TargetArgs};
use anyhow::{Context, Result};
use cn_cbor_recipe::recipe::{Kitchen, KitchenConfig, RecipeOptions, Settings, PACKAGE_INFO_FILE};
use std::path::PathBuf;
use tracing::info;

/// Cook the recipe and write `package-info.json` into the package folder
///
/// # Arguments
/// * `recipe_args` - Recipe file and source overrides
/// * `target` - Settings profile and overrides
/// * `shared` - Build a shared library
/// * `work_dir` - Directory to clone and build in
/// * `package_dir` - Install prefix (None = `<work_dir>/package`)
/// * `jobs` - Number of parallel build jobs (None = auto)
/// * `generator` - CMake generator (None = CMake default)
pub fn cmd_cook(
    recipe_args: &RecipeArgs,
    target: &TargetArgs,
    shared: bool,
    work_dir: &str,
    package_dir: Option<&str>,
    jobs: Option<u32>,
    generator: Option<&str>,
) -> Result<()> {
    let recipe = load_recipe(recipe_args)?;
    let settings = resolve_settings(target)?;
    let options = RecipeOptions {
        shared: shared || recipe.options.shared,
    };

    println!("Recipe: {} version {}", recipe.package.name, recipe.package.version);
    print_settings(&settings, &options);

    let mut config = KitchenConfig {
        work_dir: PathBuf::from(work_dir),
        package_dir: package_dir.map(PathBuf::from),
        generator: generator.map(str::to_string),
        ..Default::default()
    };
    if let Some(j) = jobs {
        config.jobs = j;
    }

    println!("Cooking with {} parallel jobs...", config.jobs);
    let kitchen = Kitchen::new(config);
    let result = kitchen
        .cook(&recipe, options, &settings)
        .with_context(|| format!("Failed to cook {}", recipe.package.name))?;

    let info_path = result.package_folder.join(PACKAGE_INFO_FILE);
    result
        .info
        .write_to(&info_path)
        .context("Failed to export package metadata")?;

    println!("\n[COMPLETE] Cooked: {}", result.package_folder.display());
    println!("  libs:        {}", result.info.libs.join(", "));
    if !result.info.system_libs.is_empty() {
        println!("  system libs: {}", result.info.system_libs.join(", "));
    }
    println!("  package id:  {}", result.info.package_id);
    println!("  metadata:    {}", info_path.display());

    if result.info.libs.is_empty() {
        println!("\n[WARNING] No libraries were installed - check the build log");
    }

    info!(
        "Successfully cooked {} to {}",
        recipe.package.name,
        result.package_folder.display()
    );

    Ok(())
}

/// Fetch the source only
pub fn cmd_source(recipe_args: &RecipeArgs, work_dir: &str) -> Result<()> {
    let recipe = load_recipe(recipe_args)?;
    let settings = Settings::host().context("Failed to detect host settings")?;

    let kitchen = Kitchen::new(KitchenConfig::in_dir(work_dir));
    let cook = kitchen.prepare(&recipe, recipe.options, &settings)?;
    cook.acquire_source()
        .with_context(|| format!("Failed to fetch source for {}", recipe.package.name))?;

    println!("[COMPLETE] Source in {}", cook.source_folder().display());
    Ok(())
}

fn print_settings(settings: &Settings, options: &RecipeOptions) {
    println!(
        "Settings: os={} arch={} build_type={} compiler={}{}",
        settings.os,
        settings.arch,
        settings.build_type,
        settings.compiler.name,
        settings
            .compiler
            .version
            .as_deref()
            .map(|v| format!(" {}", v))
            .unwrap_or_default()
    );
    println!("Options: shared={}", options.shared);
}
