// src/commands/recipe.rs

//! Recipe command - validate and show the effective recipe

use super::load_recipe;
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};

/// Print the recipe after file loading and overrides
pub fn cmd_recipe(recipe_args: &RecipeArgs) -> Result<()> {
    let recipe = load_recipe(recipe_args)?;
    let rendered = toml::to_string_pretty(&recipe).context("Failed to render recipe")?;

    print!("{}", rendered);
    Ok(())
}
