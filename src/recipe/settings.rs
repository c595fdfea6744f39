// src/recipe/settings.rs

//! Target platform settings supplied by the harness
//!
//! Settings describe what the package is built for: operating system,
//! architecture, build type and compiler. They come from host detection,
//! a TOML profile, or individual command-line overrides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Os {
    Linux,
    Macos,
    Windows,
    FreeBsd,
    Android,
}

impl Os {
    /// Operating system of the running process, if it is one we package for
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::Macos),
            "windows" => Some(Self::Windows),
            "freebsd" => Some(Self::FreeBsd),
            "android" => Some(Self::Android),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::Windows => "Windows",
            Self::FreeBsd => "FreeBSD",
            Self::Android => "Android",
        }
    }
}

impl FromStr for Os {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            "freebsd" => Ok(Self::FreeBsd),
            "android" => Ok(Self::Android),
            _ => Err(Error::ParseError(format!("Unknown operating system: {}", s))),
        }
    }
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Arch {
    X86_64,
    X86,
    Armv7,
    Armv8,
}

impl Arch {
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Some(Self::X86_64),
            "x86" => Some(Self::X86),
            "arm" => Some(Self::Armv7),
            "aarch64" => Some(Self::Armv8),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::X86 => "x86",
            Self::Armv7 => "armv7",
            Self::Armv8 => "armv8",
        }
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Ok(Self::X86_64),
            "x86" | "i686" => Ok(Self::X86),
            "armv7" | "arm" => Ok(Self::Armv7),
            "armv8" | "aarch64" | "arm64" => Ok(Self::Armv8),
            _ => Err(Error::ParseError(format!("Unknown architecture: {}", s))),
        }
    }
}

/// CMake build type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// Value for `CMAKE_BUILD_TYPE` and `--config`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl FromStr for BuildType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            _ => Err(Error::ParseError(format!("Unknown build type: {}", s))),
        }
    }
}

macro_rules! string_setting {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_string()
            }
        }
    )*};
}

string_setting!(Os, Arch, BuildType);

/// Compiler setting with its sub-settings
///
/// Every field may be left out of a profile; the name defaults to gcc.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Compiler {
    /// Compiler name (gcc, clang, apple-clang, msvc)
    pub name: String,
    pub version: Option<String>,
    /// C++ standard library
    pub libcxx: Option<String>,
    /// C++ language standard
    pub cppstd: Option<String>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            name: "gcc".to_string(),
            version: None,
            libcxx: None,
            cppstd: None,
        }
    }
}

/// Settings the recipe is built for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub arch: Arch,
    #[serde(default)]
    pub build_type: BuildType,
    #[serde(default)]
    pub compiler: Compiler,
}

#[derive(Deserialize)]
struct Profile {
    settings: Settings,
}

impl Settings {
    /// Settings for the machine we are running on
    pub fn host() -> Result<Self> {
        let os = Os::host().ok_or_else(|| {
            Error::ParseError(format!("Unsupported host OS: {}", std::env::consts::OS))
        })?;
        let arch = Arch::host().ok_or_else(|| {
            Error::ParseError(format!(
                "Unsupported host architecture: {}",
                std::env::consts::ARCH
            ))
        })?;

        let compiler = match os {
            Os::Macos => Compiler {
                name: "apple-clang".to_string(),
                ..Compiler::default()
            },
            Os::Windows => Compiler {
                name: "msvc".to_string(),
                ..Compiler::default()
            },
            _ => Compiler::default(),
        };

        Ok(Self {
            os,
            arch,
            build_type: BuildType::default(),
            compiler,
        })
    }

    /// Parse settings from a TOML profile with a `[settings]` table
    pub fn from_profile(content: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(content)
            .map_err(|e| Error::ParseError(format!("Invalid profile: {}", e)))?;
        Ok(profile.settings)
    }

    /// Read settings from a TOML profile file
    pub fn from_profile_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::IoError(format!("Failed to read profile {}: {}", path.display(), e)))?;
        Self::from_profile(&content)
    }

    /// Drop the C++ sub-settings of the compiler
    ///
    /// cn-cbor is plain C, so the C++ standard library and language
    /// standard do not affect the binary and must not enter the package id.
    pub fn configure_for_c(&mut self) {
        self.compiler.libcxx = None;
        self.compiler.cppstd = None;
    }
}

/// System libraries a consumer must link on the given OS
pub fn system_libs(os: Os) -> Vec<String> {
    match os {
        // cn-cbor uses libm for half/double float conversion
        Os::Linux => vec!["m".to_string()],
        _ => Vec::new(),
    }
}
