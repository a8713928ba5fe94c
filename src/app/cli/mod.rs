//! CLI Adapter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::app::Overrides;
use crate::domain::AppError;
use crate::domain::plan::names;
use crate::{ExecutionReport, Invocation, StepOutcome};

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(version)]
#[command(
    about = "Build, test, format, run, and package a project as a graph of steps",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    /// Step to execute (defaults to install)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Target triple, e.g. x86_64-linux-gnu or wasm32-emscripten (default: native)
    #[arg(long, global = true)]
    target: Option<String>,
    /// Optimize mode: debug, release-safe, release-fast, release-small
    #[arg(short = 'O', long, global = true)]
    optimize: Option<String>,
    /// Output root for installed artifacts
    #[arg(long, global = true)]
    prefix: Option<PathBuf>,
    /// Project root (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Configuration file (default: <root>/stepwise.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and install the artifact for the selected target
    #[clap(visible_alias = "i")]
    Install,
    /// Build, install, and run the application
    #[clap(visible_alias = "r")]
    Run {
        /// Arguments passed to the application
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run unit tests on the host
    #[clap(visible_alias = "t")]
    Test,
    /// Reformat source files in place
    Fmt,
    /// Verify source formatting without modifying files
    FmtCheck,
    /// Check formatting, build, and run tests
    Ci,
    /// Package a versioned release with a checksum sidecar (native targets only)
    #[clap(visible_alias = "p")]
    Package {
        /// Release version (default: read from the manifest, falling back to "dev")
        #[arg(long)]
        release_version: Option<String>,
        /// Destination root (default: the install prefix)
        #[arg(short = 'd', long)]
        destination: Option<PathBuf>,
    },
    /// List available steps
    Steps {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let mut invocation = Invocation {
        root: cli.global.root,
        config: cli.global.config,
        overrides: Overrides {
            target: cli.global.target,
            optimize: cli.global.optimize,
            prefix: cli.global.prefix,
        },
        ..Default::default()
    };

    let result: Result<i32, AppError> = match cli.command.unwrap_or(Commands::Install) {
        Commands::Install => run_step(&invocation, names::INSTALL),
        Commands::Run { args } => {
            invocation.run_args = args;
            run_step(&invocation, names::RUN)
        }
        Commands::Test => run_step(&invocation, names::TEST),
        Commands::Fmt => run_step(&invocation, names::FMT),
        Commands::FmtCheck => run_step(&invocation, names::FMT_CHECK),
        Commands::Ci => run_step(&invocation, names::CI),
        Commands::Package { release_version, destination } => {
            invocation.release_version = release_version;
            invocation.destination = destination;
            run_step(&invocation, names::PACKAGE)
        }
        Commands::Steps { format } => run_list(&invocation, format).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "stepwise=debug" } else { "stepwise=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn run_step(invocation: &Invocation, step: &str) -> Result<i32, AppError> {
    let report = crate::execute(invocation, step)?;
    print_report(&report);
    Ok(if report.succeeded() { 0 } else { 1 })
}

fn print_report(report: &ExecutionReport) {
    if report.succeeded() {
        println!("✅ {} succeeded ({} steps)", report.requested, report.steps.len());
        return;
    }

    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Succeeded => {}
            StepOutcome::Failed(err) => eprintln!("❌ {}", err),
            StepOutcome::Skipped { blocked_by } => {
                eprintln!("⏭️  {} skipped (blocked by {})", step.name, blocked_by.join(", "))
            }
        }
    }
    eprintln!("Error: step '{}' failed", report.requested);
}

fn run_list(invocation: &Invocation, format: OutputFormat) -> Result<(), AppError> {
    let steps = crate::list_steps(invocation)?;
    match format {
        OutputFormat::Text => {
            let width = steps.iter().map(|s| s.name.len()).max().unwrap_or(0);
            for step in &steps {
                println!("  {:width$}  {}", step.name, step.description, width = width);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&steps).map_err(|e| {
                AppError::config_error(format!("Failed to serialize steps: {}", e))
            })?;
            println!("{}", json);
        }
    }
    Ok(())
}
