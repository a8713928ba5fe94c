use std::path::{Path, PathBuf};
use std::process::Command;

use super::process::stream;
use crate::domain::{AppError, Artifact, ArtifactKind, CompileUnit, Os};
use crate::ports::ToolchainPort;

/// Toolchain backed by the `zig` compiler driver.
#[derive(Debug, Clone)]
pub struct ZigToolchain {
    program: String,
    root: PathBuf,
}

impl ZigToolchain {
    pub fn new(program: impl Into<String>, root: PathBuf) -> Self {
        Self { program: program.into(), root }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.current_dir(&self.root);
        command
    }

    /// Arguments for building `unit` as `kind` into `output`.
    pub fn compile_args(unit: &CompileUnit, kind: ArtifactKind, output: &Path) -> Vec<String> {
        let subcommand = match kind {
            ArtifactKind::Library => "build-lib",
            ArtifactKind::TestRunner => "test",
            _ => "build-exe",
        };

        let mut args = vec![
            subcommand.to_string(),
            "-target".to_string(),
            unit.target.triplet(),
            "-O".to_string(),
            unit.optimize.compiler_flag().to_string(),
            "--dep".to_string(),
            unit.import.name.clone(),
            format!("-Mroot={}", unit.root_source.display()),
            format!("-M{}={}", unit.import.name, unit.import.source.display()),
        ];
        if let Some(library) = &unit.link_library {
            args.push(library.display().to_string());
        }
        args.push("--name".to_string());
        args.push(unit.name.clone());
        args.push(format!("-femit-bin={}", output.display()));
        if kind == ArtifactKind::TestRunner {
            args.push("--test-no-exec".to_string());
        }
        args
    }

    fn output_path(unit: &CompileUnit, kind: ArtifactKind, out_dir: &Path) -> PathBuf {
        let file = match kind {
            ArtifactKind::Library => format!("lib{}.a", unit.name),
            ArtifactKind::TestRunner => format!("{}-test", unit.name),
            _ if *unit.target.os() == Os::Windows => format!("{}.exe", unit.name),
            _ => unit.name.clone(),
        };
        out_dir.join(unit.target.triplet()).join(file)
    }
}

impl ToolchainPort for ZigToolchain {
    fn compile(
        &self,
        unit: &CompileUnit,
        kind: ArtifactKind,
        out_dir: &Path,
    ) -> Result<Artifact, AppError> {
        let path = Self::output_path(unit, kind, out_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        stream(self.command().args(Self::compile_args(unit, kind, &path)))?;
        Ok(Artifact { kind, path, target: unit.target.clone() })
    }

    fn run(&self, artifact: &Artifact, args: &[String]) -> Result<(), AppError> {
        let mut command = Command::new(&artifact.path);
        command.args(args).current_dir(&self.root);
        stream(&mut command)
    }

    fn format(&self, paths: &[PathBuf], check: bool) -> Result<(), AppError> {
        let mut command = self.command();
        command.arg("fmt");
        if check {
            command.arg("--check");
        }
        command.args(paths);
        stream(&mut command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::create_module;
    use crate::testing::context_for;

    #[test]
    fn exe_args_carry_target_mode_and_import() {
        let unit = create_module(&context_for("x86_64-linux-gnu"));
        let args = ZigToolchain::compile_args(&unit, ArtifactKind::Executable, Path::new("out/waybg"));

        assert_eq!(args[0], "build-exe");
        assert!(args.windows(2).any(|w| w == ["-target", "x86_64-linux-gnu"]));
        assert!(args.windows(2).any(|w| w == ["-O", "Debug"]));
        assert!(args.windows(2).any(|w| w == ["--dep", "raylib"]));
        assert!(args.iter().any(|a| a.starts_with("-Mraylib=")));
        assert_eq!(args.last().unwrap(), "-femit-bin=out/waybg");
    }

    #[test]
    fn test_runner_is_built_without_executing() {
        let unit = create_module(&context_for("x86_64-linux-gnu"));
        let args = ZigToolchain::compile_args(&unit, ArtifactKind::TestRunner, Path::new("t"));

        assert_eq!(args[0], "test");
        assert_eq!(args.last().unwrap(), "--test-no-exec");
    }

    #[test]
    fn library_output_is_archive_per_target() {
        let unit = create_module(&context_for("wasm32-emscripten"));
        let path = ZigToolchain::output_path(&unit, ArtifactKind::Library, Path::new("cache"));
        assert_eq!(path, PathBuf::from("cache/wasm32-emscripten/libwaybg.a"));
    }
}
