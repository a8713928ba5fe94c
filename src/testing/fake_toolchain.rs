use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{AppError, Artifact, ArtifactKind, CompileUnit};
use crate::ports::ToolchainPort;

/// Records every call; fails any call whose description contains a registered pattern.
#[derive(Default)]
pub struct FakeToolchain {
    calls: Mutex<Vec<String>>,
    failing: Mutex<Vec<String>>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, pattern: &str) {
        self.failing.lock().unwrap().push(pattern.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failing.lock().unwrap().iter().any(|pattern| call.contains(pattern)) {
            return Err(AppError::ToolFailed { command: call, details: "exit status: 1".into() });
        }
        Ok(())
    }
}

impl ToolchainPort for FakeToolchain {
    fn compile(
        &self,
        unit: &CompileUnit,
        kind: ArtifactKind,
        out_dir: &Path,
    ) -> Result<Artifact, AppError> {
        let (label, file) = match kind {
            ArtifactKind::Library => ("lib", format!("lib{}.a", unit.name)),
            ArtifactKind::TestRunner => ("test", format!("{}-test", unit.name)),
            _ => ("exe", unit.name.clone()),
        };
        self.record(format!("compile {} {}", label, unit.name))?;

        let path = out_dir.join(file);
        fs::write(&path, b"\x7fELF")?;
        Ok(Artifact { kind, path, target: unit.target.clone() })
    }

    fn run(&self, artifact: &Artifact, args: &[String]) -> Result<(), AppError> {
        let args: String = args.iter().map(|a| format!(" {}", a)).collect();
        self.record(format!("run {}{}", artifact.path.display(), args))
    }

    fn format(&self, paths: &[PathBuf], check: bool) -> Result<(), AppError> {
        let paths: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
        let flag = if check { " --check" } else { "" };
        self.record(format!("fmt{} {}", flag, paths.join(" ")))
    }
}
