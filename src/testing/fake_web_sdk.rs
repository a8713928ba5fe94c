use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{AppError, Artifact, ArtifactKind, OptimizeMode, TargetPlatform};
use crate::ports::WebSdkPort;

/// Web SDK stand-in that records calls instead of invoking emcc.
#[derive(Default)]
pub struct FakeWebSdk {
    calls: Mutex<Vec<String>>,
}

impl FakeWebSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl WebSdkPort for FakeWebSdk {
    fn default_flags(&self, target: &TargetPlatform, optimize: OptimizeMode) -> Vec<String> {
        self.calls.lock().unwrap().push(format!("default_flags {}", target));
        vec![format!("-sFAKE={}", optimize.compiler_flag())]
    }

    fn emit_bundle(
        &self,
        library: &Artifact,
        _link: &[PathBuf],
        flags: &[String],
        resource_dir: &Path,
        output: &Path,
    ) -> Result<Artifact, AppError> {
        self.calls.lock().unwrap().push(format!(
            "emit_bundle {} {} {} -> {}",
            library.path.display(),
            flags.join(" "),
            resource_dir.display(),
            output.display()
        ));
        Ok(Artifact {
            kind: ArtifactKind::Bundle,
            path: output.to_path_buf(),
            target: library.target.clone(),
        })
    }

    fn launch(&self, bundle: &Artifact, args: &[String]) -> Result<(), AppError> {
        let args: String = args.iter().map(|a| format!(" {}", a)).collect();
        self.calls.lock().unwrap().push(format!("launch {}{}", bundle.path.display(), args));
        Ok(())
    }
}
