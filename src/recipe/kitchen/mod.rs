// src/recipe/kitchen/mod.rs

//! Kitchen: drives the recipe through git and CMake
//!
//! The Kitchen runs one strictly linear workflow:
//! 1. **Source**: clone the branch and rename it to `source_subfolder`
//! 2. **Configure**: build the CMake configuration (once per cook)
//! 3. **Build**: compile
//! 4. **Package**: install into the package folder
//! 5. **Export**: scan the package and report its metadata
//!
//! The first failing step aborts the rest. Nothing is retried.

mod cmake;
mod config;
mod cook;
mod git;
mod tools;

pub use cmake::{toolchain_definitions, CMake, CMakeConfig, FIXED_FLAGS};
pub use config::{CookResult, KitchenConfig};
pub use cook::Cook;
pub use git::{clone_args, GitFetcher};
pub use tools::{BuildTool, SourceFetcher, ToolOutput};

use crate::error::Result;
use crate::recipe::format::{Recipe, RecipeOptions};
use crate::recipe::settings::Settings;
use std::sync::Arc;
use tracing::info;

/// The Kitchen: where the recipe is cooked
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
    fetcher: Arc<dyn SourceFetcher>,
    build_tool: Arc<dyn BuildTool>,
}

impl Kitchen {
    /// Create a Kitchen that uses `git` and `cmake` from PATH
    pub fn new(config: KitchenConfig) -> Self {
        Self::with_tools(config, Arc::new(GitFetcher::new()), Arc::new(CMake::new()))
    }

    /// Create a Kitchen with explicit tool implementations
    pub fn with_tools(
        config: KitchenConfig,
        fetcher: Arc<dyn SourceFetcher>,
        build_tool: Arc<dyn BuildTool>,
    ) -> Self {
        Self {
            config,
            fetcher,
            build_tool,
        }
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Start a cook without running any step
    ///
    /// The harness drives the steps itself; see [`Kitchen::cook`] for the
    /// whole sequence.
    pub fn prepare<'a>(
        &'a self,
        recipe: &'a Recipe,
        options: RecipeOptions,
        settings: &Settings,
    ) -> Result<Cook<'a>> {
        Cook::new(self, recipe, options, settings)
    }

    /// Cook the recipe: source, configure, build, package, export
    pub fn cook(
        &self,
        recipe: &Recipe,
        options: RecipeOptions,
        settings: &Settings,
    ) -> Result<CookResult> {
        info!(
            "Cooking {} version {}",
            recipe.package.name, recipe.package.version
        );

        let cook = self.prepare(recipe, options, settings)?;

        cook.acquire_source()?;
        let config = cook.build_configuration()?;
        cook.build(config)?;
        cook.package(config)?;
        let info = cook.export_metadata();

        info!(
            "Cooked {} ({} libs) into {}",
            recipe.label(),
            info.libs.len(),
            cook.package_folder().display()
        );

        Ok(CookResult {
            package_folder: cook.package_folder().to_path_buf(),
            info,
            log: cook.log(),
        })
    }
}
