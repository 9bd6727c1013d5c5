mod cli;
mod commands;
mod config;
mod defaults;
mod engine;
mod paths;
mod registry;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use defaults::SystemDefaults;
use registry::Registry;
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let registry = Registry::builtin();
    let backend = SystemDefaults;

    match cli.command {
        Command::Apply(args) => commands::declarative::apply(
            &ctx,
            &registry,
            &backend,
            args.config.as_deref(),
            args.dry_run,
        ),
        Command::Diff(args) => {
            commands::declarative::diff(&ctx, &registry, &backend, args.config.as_deref())
        }
        Command::Export(args) => commands::declarative::export(
            &ctx,
            &registry,
            &backend,
            args.output.as_deref(),
            args.save,
        ),
        Command::Settings => commands::declarative::settings(&registry),
        Command::Init => commands::declarative::init(&ctx),
        Command::Dock(cmd) => commands::dock::run(&backend, cmd),
        Command::Finder(cmd) => commands::finder::run(&backend, cmd),
        Command::Keyboard(cmd) => commands::keyboard::run(&backend, cmd),
        Command::Screenshot(cmd) => commands::screenshot::run(&backend, cmd),
        Command::System(cmd) => commands::system::run(cmd),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "mct", &mut io::stdout());
            Ok(())
        }
    }
}
