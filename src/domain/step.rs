//! Steps and the actions they carry.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::{CompileUnit, TargetPlatform};

/// Kind of output a compile step produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Executable,
    Library,
    TestRunner,
    Bundle,
}

/// A build output bound to one resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub target: TargetPlatform,
}

/// Work performed by a step. Actions referring to `from` read the output of
/// that step, which must also be one of its dependencies.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No work of its own; succeeds once every dependency has.
    Group,
    /// Build `unit` into `out_dir`.
    Compile { unit: CompileUnit, kind: ArtifactKind, out_dir: PathBuf },
    /// Copy the artifact produced by `from` to `dest`.
    InstallArtifact { from: String, dest: PathBuf },
    /// Execute the artifact produced by `from`.
    RunArtifact { from: String, args: Vec<String> },
    Format { paths: Vec<PathBuf>, check: bool },
    /// Hand the library produced by `from` (plus `link` inputs) to the web SDK.
    EmitBundle {
        from: String,
        link: Vec<PathBuf>,
        flags: Vec<String>,
        resource_dir: PathBuf,
        output: PathBuf,
    },
    LaunchBrowser { from: String, args: Vec<String> },
    /// Checksum the artifact produced by `from`, capturing the tool output.
    Checksum { from: String },
    /// Write text captured by `from` to `dest`.
    WriteCapture { from: String, dest: PathBuf },
}

impl Action {
    /// Step whose output this action consumes, if any.
    pub fn input(&self) -> Option<&str> {
        match self {
            Action::InstallArtifact { from, .. }
            | Action::RunArtifact { from, .. }
            | Action::EmitBundle { from, .. }
            | Action::LaunchBrowser { from, .. }
            | Action::Checksum { from }
            | Action::WriteCapture { from, .. } => Some(from),
            Action::Group | Action::Compile { .. } | Action::Format { .. } => None,
        }
    }
}

/// A named unit of work with its predecessor steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,
    pub description: String,
    pub dependencies: BTreeSet<String>,
    pub action: Action,
    /// Exposed as a verb on the command line.
    pub top_level: bool,
}

impl Step {
    pub fn new(name: &str, description: &str, action: Action) -> Self {
        let mut dependencies = BTreeSet::new();
        if let Some(input) = action.input() {
            dependencies.insert(input.to_string());
        }
        Self {
            name: name.to_string(),
            description: description.to_string(),
            dependencies,
            action,
            top_level: false,
        }
    }

    /// A user-facing step.
    pub fn top_level(name: &str, description: &str, action: Action) -> Self {
        Self { top_level: true, ..Self::new(name, description, action) }
    }
}
