use std::path::{Path, PathBuf};
use std::process::Command;

use super::process::stream;
use crate::domain::{AppError, Artifact, ArtifactKind, OptimizeMode, TargetPlatform};
use crate::ports::WebSdkPort;

/// Mount point of embedded resources inside the bundle's virtual filesystem.
const RESOURCE_MOUNT: &str = "resources";

/// Web SDK backed by the Emscripten `emcc` linker and `emrun` launcher.
#[derive(Debug, Clone)]
pub struct EmscriptenSdk {
    emcc: String,
    emrun: String,
    shell_file: Option<PathBuf>,
    root: PathBuf,
}

impl EmscriptenSdk {
    pub fn new(
        emcc: impl Into<String>,
        emrun: impl Into<String>,
        shell_file: Option<PathBuf>,
        root: PathBuf,
    ) -> Self {
        Self { emcc: emcc.into(), emrun: emrun.into(), shell_file, root }
    }

    pub fn bundle_args(
        &self,
        library: &Artifact,
        link: &[PathBuf],
        flags: &[String],
        resource_dir: &Path,
        output: &Path,
    ) -> Vec<String> {
        let mut args = vec![library.path.display().to_string()];
        args.extend(link.iter().map(|path| path.display().to_string()));
        args.extend(flags.iter().cloned());
        args.push("--embed-file".to_string());
        args.push(format!("{}@{}", resource_dir.display(), RESOURCE_MOUNT));
        if let Some(shell) = &self.shell_file {
            args.push("--shell-file".to_string());
            args.push(shell.display().to_string());
        }
        args.push("-o".to_string());
        args.push(output.display().to_string());
        args
    }
}

impl WebSdkPort for EmscriptenSdk {
    fn default_flags(&self, _target: &TargetPlatform, optimize: OptimizeMode) -> Vec<String> {
        let level = match optimize {
            OptimizeMode::Debug => "-O0",
            OptimizeMode::ReleaseSafe => "-O2",
            OptimizeMode::ReleaseFast => "-O3",
            OptimizeMode::ReleaseSmall => "-Oz",
        };
        let mut flags: Vec<String> =
            [level, "-sUSE_GLFW=3", "-sASYNCIFY", "-sALLOW_MEMORY_GROWTH=1"]
                .iter()
                .map(|s| s.to_string())
                .collect();
        if matches!(optimize, OptimizeMode::Debug | OptimizeMode::ReleaseSafe) {
            flags.push("-sASSERTIONS=1".to_string());
        }
        flags
    }

    fn emit_bundle(
        &self,
        library: &Artifact,
        link: &[PathBuf],
        flags: &[String],
        resource_dir: &Path,
        output: &Path,
    ) -> Result<Artifact, AppError> {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut command = Command::new(&self.emcc);
        command.args(self.bundle_args(library, link, flags, resource_dir, output));
        command.current_dir(&self.root);
        stream(&mut command)?;

        Ok(Artifact {
            kind: ArtifactKind::Bundle,
            path: output.to_path_buf(),
            target: library.target.clone(),
        })
    }

    fn launch(&self, bundle: &Artifact, args: &[String]) -> Result<(), AppError> {
        let mut command = Command::new(&self.emrun);
        command.arg(&bundle.path).args(args).current_dir(&self.root);
        stream(&mut command)
    }
}
