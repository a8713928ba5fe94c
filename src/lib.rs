//! stepwise: wire compile, test, format, run, and package steps into a dependency graph.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;

use serde::Serialize;

use adapters::{CommandChecksum, EmscriptenSdk, Sha256Checksum, ZigToolchain};
use app::{CONFIG_FILE, Executor, Overrides, ProjectConfig, build_context, load_config, package_request};
use domain::{BuildContext, BuildOptions, BuildPlan, build_graph};
use ports::ChecksumPort;

pub use app::{ExecutionReport, StepOutcome, StepReport};
pub use domain::AppError;

/// Everything one invocation needs to construct its step graph.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Project root; defaults to the current directory.
    pub root: Option<PathBuf>,
    /// Configuration file; defaults to `<root>/stepwise.toml`.
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    /// Arguments forwarded by `run`.
    pub run_args: Vec<String>,
    /// Version used by `package` instead of the manifest's.
    pub release_version: Option<String>,
    /// Destination root for `package`; defaults to the install prefix.
    pub destination: Option<PathBuf>,
}

/// A user-facing step as listed by `steps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub name: String,
    pub description: String,
}

struct Session {
    config: ProjectConfig,
    ctx: BuildContext,
    web: EmscriptenSdk,
}

impl Session {
    fn load(invocation: &Invocation) -> Result<Self, AppError> {
        let root = match &invocation.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let config_path = invocation.config.clone().unwrap_or_else(|| root.join(CONFIG_FILE));
        let config = load_config(&config_path)?;
        let ctx = build_context(&root, &config, &invocation.overrides)?;
        let web = EmscriptenSdk::new(
            config.web.compiler.clone(),
            config.web.launcher.clone(),
            config.web.shell_file.as_ref().map(|shell| ctx.project().resolve(shell)),
            root,
        );
        Ok(Self { config, ctx, web })
    }

    fn plan(&self, invocation: &Invocation) -> Result<BuildPlan, AppError> {
        let options = BuildOptions {
            run_args: invocation.run_args.clone(),
            package: package_request(
                &self.ctx,
                invocation.release_version.as_deref(),
                invocation.destination.as_deref(),
            ),
        };
        build_graph(&self.ctx, &options, &self.web)
    }
}

/// Build the step graph for `invocation` and run `step` with the real tools.
pub fn execute(invocation: &Invocation, step: &str) -> Result<ExecutionReport, AppError> {
    let session = Session::load(invocation)?;
    let plan = session.plan(invocation)?;
    plan.graph.require(step)?;

    let root = session.ctx.project().root.clone();
    let toolchain = ZigToolchain::new(session.config.tools.compiler.clone(), root.clone());
    let checksum: Box<dyn ChecksumPort> = if session.config.tools.builtin_checksum() {
        Box::new(Sha256Checksum)
    } else {
        Box::new(CommandChecksum::new(session.config.tools.checksum.clone(), root))
    };

    tracing::info!(
        step,
        target = %session.ctx.target(),
        optimize = %session.ctx.optimize(),
        branch = plan.branch.label(),
        "executing"
    );
    Executor::new(&toolchain, &session.web, checksum.as_ref()).execute(&plan.graph, step)
}

/// List the user-facing steps available for `invocation`'s target.
pub fn list_steps(invocation: &Invocation) -> Result<Vec<StepSummary>, AppError> {
    let session = Session::load(invocation)?;
    let plan = session.plan(invocation)?;
    Ok(plan
        .graph
        .top_level()
        .into_iter()
        .map(|step| StepSummary { name: step.name.clone(), description: step.description.clone() })
        .collect())
}
