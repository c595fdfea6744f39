// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use chrono::NaiveDate;
use std::path::{Component, Path};

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file: {}", e)))?;

    parse_recipe(&content)
}

/// Whether `dir` names one directory directly inside the work directory
fn is_single_component(dir: &str) -> bool {
    // Backslash separates paths on Windows only; reject it everywhere
    if dir.contains('\\') {
        return false;
    }
    let mut components = Path::new(dir).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Validate a recipe for completeness and correctness
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    if recipe.package.version.is_empty() {
        return Err(Error::ParseError("Recipe package version cannot be empty".to_string()));
    }
    if recipe.source.git.is_empty() {
        return Err(Error::ParseError("Recipe source git url cannot be empty".to_string()));
    }
    if recipe.source.branch.is_empty() {
        return Err(Error::ParseError("Recipe source branch cannot be empty".to_string()));
    }
    if !is_single_component(&recipe.source.clone_dir) {
        return Err(Error::ParseError(format!(
            "Invalid clone directory: '{}'",
            recipe.source.clone_dir
        )));
    }

    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }

    if recipe.source.is_ssh() {
        warnings.push(format!(
            "Source {} is fetched over SSH and needs credentials",
            recipe.source.git
        ));
    }

    // Snapshots of an unreleased branch are versioned by date
    if NaiveDate::parse_from_str(&recipe.package.version, "%Y%m%d").is_err() {
        warnings.push(format!(
            "Version '{}' is not a YYYYMMDD date stamp",
            recipe.package.version
        ));
    }

    Ok(warnings)
}
