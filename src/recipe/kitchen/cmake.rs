// src/recipe/kitchen/cmake.rs

//! CMake configuration object and the CMake build tool

use super::tools::{locate, run_command, BuildTool, ToolOutput};
use crate::recipe::format::RecipeOptions;
use crate::recipe::settings::{Arch, BuildType, Os, Settings};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project flags that are always off, whatever the consumer asks for
pub const FIXED_FLAGS: [&str; 3] = ["build_tests", "build_docs", "coveralls"];

/// Everything CMake needs to configure, build and install the source
///
/// Built once per cook and passed to every later step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CMakeConfig {
    pub source_folder: PathBuf,
    pub build_folder: PathBuf,
    /// `CMAKE_INSTALL_PREFIX`, the package folder
    pub install_prefix: PathBuf,
    pub build_type: BuildType,
    /// `-G` generator; CMake's default when unset
    pub generator: Option<String>,
    /// Parallel compile jobs
    pub jobs: u32,
    /// `-A` platform for Visual Studio generators (msvc only)
    pub platform: Option<String>,
    definitions: BTreeMap<String, String>,
}

fn cmake_bool(value: bool) -> String {
    let value = if value { "ON" } else { "OFF" };
    value.to_string()
}

/// C compiler executable for a compiler setting
fn c_compiler(name: &str) -> &str {
    match name {
        "clang" | "apple-clang" => "clang",
        "msvc" | "Visual Studio" => "cl",
        other => other,
    }
}

/// `CMAKE_SYSTEM_NAME` for a target OS
fn system_name(os: Os) -> &'static str {
    match os {
        Os::Linux => "Linux",
        Os::Macos => "Darwin",
        Os::Windows => "Windows",
        Os::FreeBsd => "FreeBSD",
        Os::Android => "Android",
    }
}

/// `CMAKE_SYSTEM_PROCESSOR` for a target architecture
fn system_processor(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x86_64",
        Arch::X86 => "i686",
        Arch::Armv7 => "armv7-a",
        Arch::Armv8 => "aarch64",
    }
}

fn osx_architecture(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x86_64",
        Arch::X86 => "i386",
        Arch::Armv7 => "armv7",
        Arch::Armv8 => "arm64",
    }
}

fn msvc_platform(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x64",
        Arch::X86 => "Win32",
        Arch::Armv7 => "ARM",
        Arch::Armv8 => "ARM64",
    }
}

fn is_msvc(compiler: &str) -> bool {
    matches!(compiler, "msvc" | "Visual Studio")
}

/// Cache definitions that select the compiler and target for `settings`
///
/// `host_os` and `host_arch` describe the machine running CMake. A target
/// OS other than the host turns on cross compilation.
pub fn toolchain_definitions(
    settings: &Settings,
    host_os: Option<Os>,
    host_arch: Option<Arch>,
) -> BTreeMap<String, String> {
    let mut definitions = BTreeMap::new();
    let compiler = settings.compiler.name.as_str();

    definitions.insert("CMAKE_C_COMPILER".to_string(), c_compiler(compiler).to_string());

    if host_os != Some(settings.os) {
        definitions.insert("CMAKE_SYSTEM_NAME".to_string(), system_name(settings.os).to_string());
        definitions.insert(
            "CMAKE_SYSTEM_PROCESSOR".to_string(),
            system_processor(settings.arch).to_string(),
        );
    }

    if settings.os == Os::Macos {
        definitions.insert(
            "CMAKE_OSX_ARCHITECTURES".to_string(),
            osx_architecture(settings.arch).to_string(),
        );
    } else if settings.arch == Arch::X86 && host_arch == Some(Arch::X86_64) && !is_msvc(compiler) {
        definitions.insert("CMAKE_C_FLAGS".to_string(), "-m32".to_string());
    }

    definitions
}

impl CMakeConfig {
    /// Configuration for the host this process runs on
    pub fn new(
        source_folder: impl Into<PathBuf>,
        build_folder: impl Into<PathBuf>,
        install_prefix: impl Into<PathBuf>,
        settings: &Settings,
        options: &RecipeOptions,
    ) -> Self {
        Self::for_host(
            source_folder,
            build_folder,
            install_prefix,
            settings,
            options,
            Os::host(),
            Arch::host(),
        )
    }

    /// Configuration built on `host_os`/`host_arch`
    pub fn for_host(
        source_folder: impl Into<PathBuf>,
        build_folder: impl Into<PathBuf>,
        install_prefix: impl Into<PathBuf>,
        settings: &Settings,
        options: &RecipeOptions,
        host_os: Option<Os>,
        host_arch: Option<Arch>,
    ) -> Self {
        let install_prefix = install_prefix.into();
        let build_type = settings.build_type;
        let mut definitions = toolchain_definitions(settings, host_os, host_arch);

        for flag in FIXED_FLAGS {
            definitions.insert(flag.to_string(), cmake_bool(false));
        }
        definitions.insert("BUILD_SHARED_LIBS".to_string(), cmake_bool(options.shared));
        definitions.insert("CMAKE_BUILD_TYPE".to_string(), build_type.as_str().to_string());
        definitions.insert(
            "CMAKE_INSTALL_PREFIX".to_string(),
            install_prefix.to_string_lossy().into_owned(),
        );
        // Keep the layout export_metadata scans independent of GNUInstallDirs
        definitions.insert("CMAKE_INSTALL_LIBDIR".to_string(), "lib".to_string());
        definitions.insert("CMAKE_INSTALL_INCLUDEDIR".to_string(), "include".to_string());

        let platform = is_msvc(&settings.compiler.name)
            .then(|| msvc_platform(settings.arch).to_string());

        Self {
            source_folder: source_folder.into(),
            build_folder: build_folder.into(),
            install_prefix,
            build_type,
            generator: None,
            jobs: 1,
            platform,
            definitions,
        }
    }

    pub fn with_generator(mut self, generator: Option<String>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_jobs(mut self, jobs: u32) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// All `-D` cache definitions, sorted by name
    pub fn definitions(&self) -> &BTreeMap<String, String> {
        &self.definitions
    }

    pub fn definition(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(String::as_str)
    }

    /// Read a definition as a CMake boolean
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.definition(name)
            .map(|v| matches!(v.to_uppercase().as_str(), "ON" | "TRUE" | "YES" | "1"))
    }

    pub fn shared(&self) -> bool {
        self.flag("BUILD_SHARED_LIBS").unwrap_or(false)
    }

    /// `cmake -S <src> -B <build> [-G <gen>] [-A <platform>] -D...`
    pub fn configure_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-S".into(),
            self.source_folder.clone().into(),
            "-B".into(),
            self.build_folder.clone().into(),
        ];
        if let Some(generator) = &self.generator {
            args.push("-G".into());
            args.push(generator.into());
        }
        // Only Visual Studio generators accept a platform
        let visual_studio = self
            .generator
            .as_deref()
            .is_none_or(|g| g.starts_with("Visual Studio"));
        if let (Some(platform), true) = (&self.platform, visual_studio) {
            args.push("-A".into());
            args.push(platform.into());
        }
        for (name, value) in &self.definitions {
            args.push(format!("-D{}={}", name, value).into());
        }
        args
    }

    /// `cmake --build <build> --config <type> --parallel <jobs>`
    pub fn build_args(&self) -> Vec<OsString> {
        vec![
            "--build".into(),
            self.build_folder.clone().into(),
            "--config".into(),
            self.build_type.as_str().into(),
            "--parallel".into(),
            self.jobs.to_string().into(),
        ]
    }

    /// `cmake --build <build> --target install --config <type>`
    pub fn install_args(&self) -> Vec<OsString> {
        vec![
            "--build".into(),
            self.build_folder.clone().into(),
            "--target".into(),
            "install".into(),
            "--config".into(),
            self.build_type.as_str().into(),
        ]
    }
}

/// The `cmake` command-line tool
#[derive(Debug, Clone, Default)]
pub struct CMake {
    /// Explicit cmake binary; looked up on PATH when unset
    program: Option<PathBuf>,
}

impl CMake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn program(&self) -> io::Result<PathBuf> {
        match &self.program {
            Some(p) => Ok(p.clone()),
            None => locate("cmake"),
        }
    }

    fn run(&self, args: Vec<OsString>, cwd: &Path) -> io::Result<ToolOutput> {
        let cmake = self.program()?;
        debug!("Using cmake at {}", cmake.display());
        run_command(&cmake, args, Some(cwd), &[])
    }
}

impl BuildTool for CMake {
    fn configure(&self, config: &CMakeConfig) -> io::Result<ToolOutput> {
        self.run(config.configure_args(), &config.build_folder)
    }

    fn build(&self, config: &CMakeConfig) -> io::Result<ToolOutput> {
        self.run(config.build_args(), &config.build_folder)
    }

    fn install(&self, config: &CMakeConfig) -> io::Result<ToolOutput> {
        self.run(config.install_args(), &config.build_folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::settings::Compiler;

    fn gcc_linux(arch: Arch) -> Settings {
        Settings {
            os: Os::Linux,
            arch,
            build_type: BuildType::Release,
            compiler: Compiler {
                name: "gcc".to_string(),
                version: Some("13".to_string()),
                libcxx: None,
                cppstd: None,
            },
        }
    }

    fn config(shared: bool) -> CMakeConfig {
        CMakeConfig::for_host(
            "/work/source_subfolder",
            "/work/build_subfolder",
            "/work/package",
            &gcc_linux(Arch::X86_64),
            &RecipeOptions { shared },
            Some(Os::Linux),
            Some(Arch::X86_64),
        )
    }

    #[test]
    fn test_fixed_flags_always_off() {
        for shared in [false, true] {
            let config = config(shared);
            for flag in FIXED_FLAGS {
                assert_eq!(config.flag(flag), Some(false), "{} must be off", flag);
            }
        }
    }

    #[test]
    fn test_shared_option() {
        assert!(!config(false).shared());
        assert!(config(true).shared());
        assert_eq!(config(true).definition("BUILD_SHARED_LIBS"), Some("ON"));
    }

    #[test]
    fn test_install_layout_definitions() {
        let config = config(false);
        assert_eq!(config.definition("CMAKE_INSTALL_PREFIX"), Some("/work/package"));
        assert_eq!(config.definition("CMAKE_INSTALL_LIBDIR"), Some("lib"));
        assert_eq!(config.definition("CMAKE_BUILD_TYPE"), Some("Release"));
    }

    #[test]
    fn test_configure_args() {
        let config = config(false).with_generator(Some("Ninja".to_string()));
        let args: Vec<String> = config
            .configure_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(&args[..6], ["-S", "/work/source_subfolder", "-B", "/work/build_subfolder", "-G", "Ninja"]);
        assert!(args.contains(&"-Dbuild_tests=OFF".to_string()));
        assert!(args.contains(&"-Dbuild_docs=OFF".to_string()));
        assert!(args.contains(&"-Dcoveralls=OFF".to_string()));
        assert!(args.contains(&"-DBUILD_SHARED_LIBS=OFF".to_string()));
    }

    #[test]
    fn test_build_and_install_args() {
        let config = config(false).with_jobs(0);
        assert_eq!(config.jobs, 1);

        let build: Vec<String> = config
            .build_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(build, ["--build", "/work/build_subfolder", "--config", "Release", "--parallel", "1"]);

        let install: Vec<String> = config
            .install_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(install, ["--build", "/work/build_subfolder", "--target", "install", "--config", "Release"]);
    }

    #[test]
    fn test_native_build_only_selects_compiler() {
        let defs = toolchain_definitions(&gcc_linux(Arch::X86_64), Some(Os::Linux), Some(Arch::X86_64));
        assert_eq!(defs.get("CMAKE_C_COMPILER").map(String::as_str), Some("gcc"));
        assert!(!defs.contains_key("CMAKE_SYSTEM_NAME"));
        assert!(!defs.contains_key("CMAKE_C_FLAGS"));
        assert!(!defs.contains_key("CMAKE_OSX_ARCHITECTURES"));
    }

    #[test]
    fn test_x86_on_x86_64_host_builds_32_bit() {
        let defs = toolchain_definitions(&gcc_linux(Arch::X86), Some(Os::Linux), Some(Arch::X86_64));
        assert_eq!(defs.get("CMAKE_C_FLAGS").map(String::as_str), Some("-m32"));

        let native = toolchain_definitions(&gcc_linux(Arch::X86), Some(Os::Linux), Some(Arch::X86));
        assert!(!native.contains_key("CMAKE_C_FLAGS"));
    }

    #[test]
    fn test_macos_target_sets_osx_architectures() {
        let mut settings = gcc_linux(Arch::Armv8);
        settings.os = Os::Macos;
        settings.compiler.name = "apple-clang".to_string();

        let defs = toolchain_definitions(&settings, Some(Os::Macos), Some(Arch::X86_64));
        assert_eq!(defs.get("CMAKE_C_COMPILER").map(String::as_str), Some("clang"));
        assert_eq!(defs.get("CMAKE_OSX_ARCHITECTURES").map(String::as_str), Some("arm64"));
        assert!(!defs.contains_key("CMAKE_SYSTEM_NAME"));
        assert!(!defs.contains_key("CMAKE_C_FLAGS"));
    }

    #[test]
    fn test_foreign_os_is_cross_compiled() {
        let mut settings = gcc_linux(Arch::Armv7);
        settings.os = Os::Android;
        settings.compiler.name = "clang".to_string();

        let config = CMakeConfig::for_host(
            "/s",
            "/b",
            "/p",
            &settings,
            &RecipeOptions::default(),
            Some(Os::Linux),
            Some(Arch::X86_64),
        );
        assert_eq!(config.definition("CMAKE_SYSTEM_NAME"), Some("Android"));
        assert_eq!(config.definition("CMAKE_SYSTEM_PROCESSOR"), Some("armv7-a"));
        assert_eq!(config.definition("CMAKE_C_COMPILER"), Some("clang"));
        assert_eq!(config.platform, None);
    }

    #[test]
    fn test_msvc_selects_platform() {
        let mut settings = gcc_linux(Arch::X86);
        settings.os = Os::Windows;
        settings.compiler.name = "msvc".to_string();

        let config = CMakeConfig::for_host(
            "/s",
            "/b",
            "/p",
            &settings,
            &RecipeOptions::default(),
            Some(Os::Windows),
            Some(Arch::X86_64),
        );
        assert_eq!(config.definition("CMAKE_C_COMPILER"), Some("cl"));
        assert_eq!(config.definition("CMAKE_C_FLAGS"), None);
        assert_eq!(config.platform.as_deref(), Some("Win32"));

        let args: Vec<String> = config
            .configure_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(&args[4..6], ["-A", "Win32"]);

        let ninja = config.with_generator(Some("Ninja".to_string()));
        assert!(!ninja.configure_args().iter().any(|a| a == "-A"));
    }
}
