use std::path::{Path, PathBuf};

use crate::domain::{AppError, Artifact, OptimizeMode, TargetPlatform};

/// Web-export SDK: flag derivation, bundling, and browser launch.
pub trait WebSdkPort {
    /// Linker flags the SDK recommends for this target and mode.
    fn default_flags(&self, target: &TargetPlatform, optimize: OptimizeMode) -> Vec<String>;

    /// Link `library` and `link` into a browser bundle at `output`, embedding `resource_dir`.
    fn emit_bundle(
        &self,
        library: &Artifact,
        link: &[PathBuf],
        flags: &[String],
        resource_dir: &Path,
        output: &Path,
    ) -> Result<Artifact, AppError>;

    /// Serve the bundle and open it in a browser.
    fn launch(&self, bundle: &Artifact, args: &[String]) -> Result<(), AppError>;
}
