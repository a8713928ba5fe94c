//! Runs a requested step and its dependency closure.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::domain::{Action, AppError, Artifact, Step, StepGraph};
use crate::ports::{ChecksumPort, ToolchainPort, WebSdkPort};

/// Final state of one step in an execution pass.
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded,
    Failed(AppError),
    /// Not run because these dependencies did not succeed.
    Skipped { blocked_by: Vec<String> },
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }
}

#[derive(Debug)]
pub struct StepReport {
    pub name: String,
    pub outcome: StepOutcome,
}

/// Outcomes of every step in the requested closure, in execution order.
#[derive(Debug)]
pub struct ExecutionReport {
    pub requested: String,
    pub steps: Vec<StepReport>,
}

impl ExecutionReport {
    /// True when the requested step (and hence its whole closure) succeeded.
    pub fn succeeded(&self) -> bool {
        self.outcome(&self.requested).is_some_and(StepOutcome::is_success)
    }

    pub fn outcome(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|report| report.name == name).map(|report| &report.outcome)
    }

    /// Steps whose own action failed.
    pub fn failures(&self) -> Vec<(&str, &AppError)> {
        self.steps
            .iter()
            .filter_map(|report| match &report.outcome {
                StepOutcome::Failed(err) => Some((report.name.as_str(), err)),
                _ => None,
            })
            .collect()
    }

    /// Names of steps that actually ran, successful or not.
    pub fn executed(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|report| !matches!(report.outcome, StepOutcome::Skipped { .. }))
            .map(|report| report.name.as_str())
            .collect()
    }
}

enum StepOutput {
    Nothing,
    Artifact(Artifact),
    Captured(String),
}

/// Executes steps against the external collaborators.
pub struct Executor<'a, T, W, C>
where
    T: ToolchainPort + ?Sized,
    W: WebSdkPort + ?Sized,
    C: ChecksumPort + ?Sized,
{
    toolchain: &'a T,
    web: &'a W,
    checksum: &'a C,
}

impl<'a, T, W, C> Executor<'a, T, W, C>
where
    T: ToolchainPort + ?Sized,
    W: WebSdkPort + ?Sized,
    C: ChecksumPort + ?Sized,
{
    pub fn new(toolchain: &'a T, web: &'a W, checksum: &'a C) -> Self {
        Self { toolchain, web, checksum }
    }

    /// Run `name` after its dependencies, in a dependency-first order.
    ///
    /// A failing step only blocks the steps that depend on it; independent
    /// steps in the closure still run and keep their results.
    pub fn execute(&self, graph: &StepGraph, name: &str) -> Result<ExecutionReport, AppError> {
        let order = graph.execution_order(name)?;
        let mut outcomes: BTreeMap<&str, bool> = BTreeMap::new();
        let mut outputs: BTreeMap<String, StepOutput> = BTreeMap::new();
        let mut reports = Vec::with_capacity(order.len());

        for step in order {
            let blocked_by: Vec<String> = step
                .dependencies
                .iter()
                .filter(|dep| !outcomes.get(dep.as_str()).copied().unwrap_or(false))
                .cloned()
                .collect();

            let outcome = if !blocked_by.is_empty() {
                tracing::warn!(step = %step.name, blocked_by = ?blocked_by, "skipped");
                StepOutcome::Skipped { blocked_by }
            } else {
                tracing::info!(step = %step.name, "running");
                match self.perform(step, &outputs) {
                    Ok(output) => {
                        outputs.insert(step.name.clone(), output);
                        tracing::info!(step = %step.name, "succeeded");
                        StepOutcome::Succeeded
                    }
                    Err(err) => {
                        let err = AppError::step_failure(&step.name, &err);
                        tracing::error!(step = %step.name, error = %err, "failed");
                        StepOutcome::Failed(err)
                    }
                }
            };

            outcomes.insert(step.name.as_str(), outcome.is_success());
            reports.push(StepReport { name: step.name.clone(), outcome });
        }

        Ok(ExecutionReport { requested: name.to_string(), steps: reports })
    }

    fn perform(
        &self,
        step: &Step,
        outputs: &BTreeMap<String, StepOutput>,
    ) -> Result<StepOutput, AppError> {
        match &step.action {
            Action::Group => Ok(StepOutput::Nothing),
            Action::Compile { unit, kind, out_dir } => {
                fs::create_dir_all(out_dir)?;
                self.toolchain.compile(unit, *kind, out_dir).map(StepOutput::Artifact)
            }
            Action::InstallArtifact { from, dest } => {
                let artifact = artifact_of(outputs, from)?;
                ensure_parent(dest)?;
                fs::copy(&artifact.path, dest)?;
                Ok(StepOutput::Artifact(Artifact { path: dest.clone(), ..artifact.clone() }))
            }
            Action::RunArtifact { from, args } => {
                self.toolchain.run(artifact_of(outputs, from)?, args)?;
                Ok(StepOutput::Nothing)
            }
            Action::Format { paths, check } => {
                self.toolchain.format(paths, *check)?;
                Ok(StepOutput::Nothing)
            }
            Action::EmitBundle { from, link, flags, resource_dir, output } => {
                let library = artifact_of(outputs, from)?;
                self.web
                    .emit_bundle(library, link, flags, resource_dir, output)
                    .map(StepOutput::Artifact)
            }
            Action::LaunchBrowser { from, args } => {
                self.web.launch(artifact_of(outputs, from)?, args)?;
                Ok(StepOutput::Nothing)
            }
            Action::Checksum { from } => {
                let artifact = artifact_of(outputs, from)?;
                self.checksum.checksum(&artifact.path).map(StepOutput::Captured)
            }
            Action::WriteCapture { from, dest } => {
                let text = match outputs.get(from) {
                    Some(StepOutput::Captured(text)) => text,
                    _ => return Err(missing_output(from, "captured output")),
                };
                ensure_parent(dest)?;
                fs::write(dest, text)?;
                Ok(StepOutput::Nothing)
            }
        }
    }
}

fn artifact_of<'o>(
    outputs: &'o BTreeMap<String, StepOutput>,
    from: &str,
) -> Result<&'o Artifact, AppError> {
    match outputs.get(from) {
        Some(StepOutput::Artifact(artifact)) => Ok(artifact),
        _ => Err(missing_output(from, "an artifact")),
    }
}

fn missing_output(from: &str, what: &str) -> AppError {
    AppError::config_error(format!("step '{}' did not produce {}", from, what))
}

fn ensure_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
