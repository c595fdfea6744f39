// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so `info` and `recipe` output can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cook {
            recipe,
            target,
            shared,
            work_dir,
            package_dir,
            jobs,
            generator,
        } => commands::cmd_cook(
            &recipe,
            &target,
            shared,
            &work_dir,
            package_dir.as_deref(),
            jobs,
            generator.as_deref(),
        ),
        Commands::Source { recipe, work_dir } => commands::cmd_source(&recipe, &work_dir),
        Commands::Info {
            package_dir,
            recipe,
            target,
            shared,
        } => commands::cmd_info(&package_dir, &recipe, &target, shared),
        Commands::Recipe { recipe } => commands::cmd_recipe(&recipe),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cn-cbor-recipe", &mut std::io::stdout());
            Ok(())
        }
    }
}
