// tests/common/mod.rs

//! Shared test utilities: mock git and CMake implementations.

use cn_cbor_recipe::recipe::{
    Arch, BuildTool, BuildType, CMakeConfig, Compiler, Os, Settings, SourceFetcher,
    SourceSection, ToolOutput,
};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Ordered record of every tool invocation, shared by the mocks.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// How a mocked tool fails when it is told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Exits 1 with a one-line message on stderr
    Exit,
    /// Exits 1 with the compiler error on stdout, as Ninja does
    CompilerOnStdout,
    /// Cannot be started at all
    Spawn,
}

fn not_found(tool: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not found on PATH", tool))
}

/// Mock git client: creates the clone directory, exits with `exit_code`,
/// or fails to start when `spawn_fails` is set.
pub struct MockGit {
    pub exit_code: i32,
    pub spawn_fails: bool,
    pub calls: CallLog,
}

impl SourceFetcher for MockGit {
    fn fetch(&self, source: &SourceSection, work_dir: &Path) -> io::Result<ToolOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("clone {} {}", source.branch, source.git));

        if self.spawn_fails {
            return Err(not_found("git"));
        }
        if self.exit_code != 0 {
            return Ok(ToolOutput::failure(
                "git clone",
                self.exit_code,
                "fatal: Remote branch complete not found in upstream origin",
            ));
        }

        let clone = work_dir.join(&source.clone_dir);
        fs::create_dir_all(clone.join("src"))?;
        fs::write(clone.join("CMakeLists.txt"), "project(cn-cbor C)\n")?;
        Ok(ToolOutput::success("git clone"))
    }
}

/// Which mocked CMake step should fail, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nothing,
    Configure,
    Build,
    Install,
}

/// Mock CMake: records calls and installs `libs` into `<prefix>/lib`.
pub struct MockCMake {
    pub libs: Vec<String>,
    pub fail_at: FailAt,
    pub failure: Failure,
    pub calls: CallLog,
}

impl MockCMake {
    fn step(&self, name: &str, fail: FailAt) -> io::Result<ToolOutput> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.fail_at != fail {
            return Ok(ToolOutput::success(format!("cmake {}", name)));
        }

        let command = format!("cmake {}", name);
        match self.failure {
            Failure::Exit => Ok(ToolOutput::failure(command, 1, format!("{} exploded", name))),
            Failure::CompilerOnStdout => {
                let mut output =
                    ToolOutput::failure(command, 1, "ninja: build stopped: subcommand failed.\n");
                output.stdout = format!(
                    "FAILED: {name}/cn-cbor.c.o\ncn-cbor.c:40:5: error: expected ';' before 'return'\n"
                );
                Ok(output)
            }
            Failure::Spawn => Err(not_found("cmake")),
        }
    }
}

impl BuildTool for MockCMake {
    fn configure(&self, _config: &CMakeConfig) -> io::Result<ToolOutput> {
        self.step("configure", FailAt::Configure)
    }

    fn build(&self, _config: &CMakeConfig) -> io::Result<ToolOutput> {
        self.step("build", FailAt::Build)
    }

    fn install(&self, config: &CMakeConfig) -> io::Result<ToolOutput> {
        let output = self.step("install", FailAt::Install)?;
        if output.succeeded() {
            let lib_dir = config.install_prefix.join("lib");
            let include_dir = config.install_prefix.join("include").join("cn-cbor");
            fs::create_dir_all(&lib_dir)?;
            fs::create_dir_all(&include_dir)?;
            fs::write(include_dir.join("cn-cbor.h"), "")?;
            for lib in &self.libs {
                fs::write(lib_dir.join(lib), b"")?;
            }
        }
        Ok(output)
    }
}

pub fn settings(os: Os) -> Settings {
    Settings {
        os,
        arch: Arch::X86_64,
        build_type: BuildType::Release,
        compiler: Compiler {
            name: "gcc".to_string(),
            version: Some("13".to_string()),
            libcxx: Some("libstdc++11".to_string()),
            cppstd: Some("17".to_string()),
        },
    }
}
