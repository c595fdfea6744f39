// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common arguments: recipe file and git url override
fn recipe_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("recipe")
            .long("recipe")
            .value_name("FILE")
            .help("Recipe file (TOML); the built-in cn-cbor recipe when omitted"),
    )
    .arg(
        Arg::new("git_url")
            .long("git-url")
            .value_name("URL")
            .help("Clone from this repository instead of the recipe's"),
    )
}

/// Common arguments: target settings
fn target_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("profile").long("profile").value_name("FILE").help("Settings profile (TOML)"))
        .arg(Arg::new("os").long("os").help("Target operating system"))
        .arg(Arg::new("arch").long("arch").help("Target architecture"))
        .arg(Arg::new("build_type").long("build-type").help("Build type"))
        .arg(Arg::new("compiler").long("compiler").help("Compiler name"))
        .arg(Arg::new("compiler_version").long("compiler-version").help("Compiler version"))
}

fn shared_arg() -> Arg {
    Arg::new("shared")
        .long("shared")
        .action(ArgAction::SetTrue)
        .help("Build a shared library instead of a static one")
}

fn work_dir_arg() -> Arg {
    Arg::new("work_dir")
        .short('w')
        .long("work-dir")
        .default_value(".")
        .help("Directory to clone and build in")
}

fn build_cli() -> Command {
    Command::new("cn-cbor-recipe")
        .version(env!("CARGO_PKG_VERSION"))
        .author("cn-cbor-recipe Contributors")
        .about("Fetch, build and package the cn-cbor C library")
        .subcommand_required(true)
        .subcommand(target_args(recipe_args(
            Command::new("cook")
                .about("Fetch, configure, build and package cn-cbor")
                .arg(shared_arg())
                .arg(work_dir_arg())
                .arg(Arg::new("package_dir").short('p').long("package-dir").help("Install prefix"))
                .arg(Arg::new("jobs").short('j').long("jobs").help("Number of parallel build jobs"))
                .arg(Arg::new("generator").short('G').long("generator").help("CMake generator")),
        )))
        .subcommand(recipe_args(
            Command::new("source")
                .about("Only fetch the source into <work-dir>/source_subfolder")
                .arg(work_dir_arg()),
        ))
        .subcommand(target_args(recipe_args(
            Command::new("info")
                .about("Print the metadata of an installed package folder as JSON")
                .arg(Arg::new("package_dir").required(true).help("Package folder to scan"))
                .arg(shared_arg()),
        )))
        .subcommand(recipe_args(
            Command::new("recipe").about("Validate the recipe and print it as TOML"),
        ))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Shell to generate completions for")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("cn-cbor-recipe.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
