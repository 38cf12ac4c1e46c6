//! Command-line interface
//!
//! With no arguments the standard pipeline runs against the workspace the
//! binary lives in. Everything else is optional:
//!
//! - `--config FILE` YAML overrides for commands, shell and strictness
//! - `--definition FILE` anchor on this file instead of the executable
//! - `--dry-run` print the plan and exit
//! - `completions SHELL` generate shell completions

pub mod completions;

use anyhow::{Context, Result};
use ci_pipeline::{
    Config, ExecutionContext, GENERIC_FAILURE_CODE, LocalExecutor, OutputMode, PipelineError,
    PipelineExecutor, ShellConfig, ShellRunner, definition_location, init_logging,
    level_for_verbosity, resolve_anchor, standard_pipeline,
};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

pub const BIN_NAME: &str = "ci-pipeline";

/// CLI arguments for ci-pipeline
#[derive(Parser, Debug)]
#[command(name = "ci-pipeline")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML configuration overriding the built-in defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pipeline definition to anchor on (defaults to this executable)
    #[arg(long, value_name = "FILE")]
    definition: Option<PathBuf>,

    /// Print the stages and commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Explicit log level, overrides -v and the config file
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    execute(Args::parse())
}

/// Executes already-parsed arguments
pub fn execute(args: Args) -> Result<()> {
    if let Some(Command::Completions { shell, output }) = args.command {
        return run_completions(shell, output);
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| level_for_verbosity(args.verbose, &config.log_level));
    init_logging(&level);

    let definition = definition_location(args.definition.as_deref())?;
    let anchor = resolve_anchor(&definition)?;

    let pipeline = standard_pipeline(&config.toolchains);
    let executor = LocalExecutor::with_runner(ShellRunner::new(ShellConfig {
        shell: config.shell.clone(),
        output: OutputMode::Inherit,
    }));

    if args.dry_run {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "# base directory: {}", anchor.display())
            .context("Failed to write plan")?;
        executor.dry_run(&pipeline, &mut out)?;
        return Ok(());
    }

    let mut context = ExecutionContext::new(anchor).with_options(config.options);
    executor.execute(&pipeline, &mut context)?;

    Ok(())
}

fn run_completions(shell: ShellArg, output: Option<PathBuf>) -> Result<()> {
    use clap_complete::Shell;

    let shell_enum = match shell {
        ShellArg::Bash => Shell::Bash,
        ShellArg::Zsh => Shell::Zsh,
        ShellArg::Fish => Shell::Fish,
        ShellArg::PowerShell => Shell::PowerShell,
    };

    let completions = completions::generate_completions(shell_enum)?;

    if let Some(output_path) = output {
        completions::save_completions(&completions, &output_path)?;
    } else {
        println!("{completions}");
    }

    Ok(())
}

/// Process exit status for a failed run
///
/// The first [`PipelineError`] in the chain decides; anything else exits 1.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<PipelineError>())
        .map_or(GENERIC_FAILURE_CODE, PipelineError::exit_code);

    u8::try_from(code)
        .ok()
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
