// src/recipe/kitchen/cook.rs

//! Cook: one run of the recipe workflow
//!
//! A `Cook` owns the per-run state: resolved folders, the C-configured
//! settings and the CMake configuration. The configuration is created by
//! the first [`Cook::build_configuration`] call and handed to `build` and
//! `package` explicitly.

use crate::error::{Error, Result};
use crate::recipe::format::{Recipe, RecipeOptions, BUILD_SUBFOLDER, SOURCE_SUBFOLDER};
use crate::recipe::info::PackageInfo;
use crate::recipe::settings::Settings;
use std::cell::{OnceCell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::cmake::CMakeConfig;
use super::tools::ToolOutput;
use super::Kitchen;

/// A single cook operation
pub struct Cook<'a> {
    kitchen: &'a Kitchen,
    recipe: &'a Recipe,
    options: RecipeOptions,
    /// Settings with the C++ compiler fields removed
    settings: Settings,
    work_dir: PathBuf,
    source_folder: PathBuf,
    build_folder: PathBuf,
    package_folder: PathBuf,
    configuration: OnceCell<CMakeConfig>,
    log: RefCell<String>,
}

impl<'a> Cook<'a> {
    pub(super) fn new(
        kitchen: &'a Kitchen,
        recipe: &'a Recipe,
        options: RecipeOptions,
        settings: &Settings,
    ) -> Result<Self> {
        let mut settings = settings.clone();
        settings.configure_for_c();

        // CMake needs absolute paths for the install prefix
        let work_dir = std::path::absolute(&kitchen.config.work_dir)?;
        let package_folder = std::path::absolute(kitchen.config.package_folder())?;

        Ok(Self {
            kitchen,
            recipe,
            options,
            settings,
            source_folder: work_dir.join(SOURCE_SUBFOLDER),
            build_folder: work_dir.join(BUILD_SUBFOLDER),
            work_dir,
            package_folder,
            configuration: OnceCell::new(),
            log: RefCell::new(String::new()),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn options(&self) -> &RecipeOptions {
        &self.options
    }

    pub fn source_folder(&self) -> &Path {
        &self.source_folder
    }

    pub fn build_folder(&self) -> &Path {
        &self.build_folder
    }

    pub fn package_folder(&self) -> &Path {
        &self.package_folder
    }

    /// Step 1: clone the source and rename it to `source_subfolder`
    pub fn acquire_source(&self) -> Result<()> {
        let source = &self.recipe.source;
        let clone_path = self.work_dir.join(&source.clone_dir);

        if self.source_folder.exists() {
            return Err(Error::AcquisitionError(format!(
                "{} already exists; remove it to fetch again",
                self.source_folder.display()
            )));
        }
        if clone_path.exists() {
            return Err(Error::AcquisitionError(format!(
                "{} already exists and would collide with the clone",
                clone_path.display()
            )));
        }

        fs::create_dir_all(&self.work_dir).map_err(|e| {
            Error::AcquisitionError(format!(
                "Failed to create work directory {}: {}",
                self.work_dir.display(),
                e
            ))
        })?;

        info!("Cloning {} (branch {})", source.git, source.branch);
        let output = self
            .kitchen
            .fetcher
            .fetch(source, &self.work_dir)
            .map_err(|e| Error::AcquisitionError(format!("Failed to run git: {}", e)))?;
        self.log_tool_output("source", &output);

        if !output.succeeded() {
            return Err(Error::AcquisitionError(output.failure_message()));
        }

        fs::rename(&clone_path, &self.source_folder).map_err(|e| {
            Error::AcquisitionError(format!(
                "Failed to move {} to {}: {}",
                clone_path.display(),
                self.source_folder.display(),
                e
            ))
        })?;
        debug!("Source directory: {}", self.source_folder.display());

        Ok(())
    }

    /// Step 2: the CMake configuration, configured on first use
    ///
    /// Later calls return the same instance without running configure
    /// again.
    pub fn build_configuration(&self) -> Result<&CMakeConfig> {
        if let Some(config) = self.configuration.get() {
            debug!("Reusing CMake configuration");
            return Ok(config);
        }

        let config = CMakeConfig::new(
            &self.source_folder,
            &self.build_folder,
            &self.package_folder,
            &self.settings,
            &self.options,
        )
        .with_generator(self.kitchen.config.generator.clone())
        .with_jobs(self.kitchen.config.jobs);

        fs::create_dir_all(&self.build_folder).map_err(|e| {
            Error::ConfigurationError(format!(
                "Failed to create build directory {}: {}",
                self.build_folder.display(),
                e
            ))
        })?;

        info!(
            "Configuring {} for {}/{} with {} (shared={}, build_type={})",
            self.recipe.label(),
            self.settings.os,
            self.settings.arch,
            self.settings.compiler.name,
            self.options.shared,
            self.settings.build_type
        );
        let output = self
            .kitchen
            .build_tool
            .configure(&config)
            .map_err(|e| Error::ConfigurationError(format!("Failed to run build tool: {}", e)))?;
        self.log_tool_output("configure", &output);

        if !output.succeeded() {
            return Err(Error::ConfigurationError(output.failure_message()));
        }

        Ok(self.configuration.get_or_init(|| config))
    }

    /// Step 3: compile
    pub fn build(&self, config: &CMakeConfig) -> Result<()> {
        info!("Building {} with {} jobs", self.recipe.label(), config.jobs);
        let output = self
            .kitchen
            .build_tool
            .build(config)
            .map_err(|e| Error::BuildError(format!("Failed to run build tool: {}", e)))?;
        self.log_tool_output("build", &output);

        if !output.succeeded() {
            return Err(Error::BuildError(output.failure_message()));
        }
        Ok(())
    }

    /// Step 4: install into the package folder
    pub fn package(&self, config: &CMakeConfig) -> Result<()> {
        info!("Installing into {}", config.install_prefix.display());
        let output = self
            .kitchen
            .build_tool
            .install(config)
            .map_err(|e| Error::PackagingError(format!("Failed to run build tool: {}", e)))?;
        self.log_tool_output("install", &output);

        if !output.succeeded() {
            return Err(Error::PackagingError(output.failure_message()));
        }
        Ok(())
    }

    /// Step 5: describe what ended up in the package folder
    pub fn export_metadata(&self) -> PackageInfo {
        PackageInfo::collect(self.recipe, &self.options, &self.settings, &self.package_folder)
    }

    /// Tool output collected so far
    pub fn log(&self) -> String {
        self.log.borrow().clone()
    }

    fn log_tool_output(&self, phase: &str, output: &ToolOutput) {
        let mut log = self.log.borrow_mut();
        log.push_str(&format!("=== {} ===\n$ {}\n", phase, output.command));
        if !output.stdout.is_empty() {
            log.push_str(&output.stdout);
            log.push('\n');
        }
        if !output.stderr.is_empty() {
            log.push_str(&output.stderr);
            log.push('\n');
        }
    }
}
