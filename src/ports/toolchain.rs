use std::path::{Path, PathBuf};

use crate::domain::{AppError, Artifact, ArtifactKind, CompileUnit};

/// Compiler, test runner, and formatter for the project's source language.
pub trait ToolchainPort {
    /// Build `unit` as an artifact of `kind`, writing output under `out_dir`.
    fn compile(
        &self,
        unit: &CompileUnit,
        kind: ArtifactKind,
        out_dir: &Path,
    ) -> Result<Artifact, AppError>;

    /// Execute a built or installed artifact, passing `args` through.
    fn run(&self, artifact: &Artifact, args: &[String]) -> Result<(), AppError>;

    /// Reformat `paths` in place, or only verify formatting when `check` is set.
    fn format(&self, paths: &[PathBuf], check: bool) -> Result<(), AppError>;
}
