//! Release packaging of the native executable.

use std::path::PathBuf;

use crate::domain::plan::names;
use crate::domain::{
    Action, AppError, NativeTarget, Step, StepGraph, TargetPlatform, VersionString,
};

/// Sidecar file holding the checksum tool's output.
pub const CHECKSUM_FILE: &str = "SHA256SUMS.txt";

/// Where and under which version the release is packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub version: VersionString,
    pub output_root: PathBuf,
}

/// Release artifact name: `<app>-<version>-<triplet>-elf`.
pub fn artifact_name(app: &str, version: &VersionString, target: &TargetPlatform) -> String {
    format!("{}-{}-{}-elf", app, version, target.triplet())
}

/// Add the install, checksum, and sidecar steps behind `package`.
pub fn wire(
    graph: &mut StepGraph,
    native: &NativeTarget,
    request: &PackageRequest,
) -> Result<(), AppError> {
    let name = artifact_name(&native.unit.name, &request.version, &native.unit.target);

    graph.add_step(Step::new(
        names::PACKAGE_INSTALL,
        "Install the executable under its release name",
        Action::InstallArtifact {
            from: names::COMPILE_EXE.to_string(),
            dest: request.output_root.join(&name),
        },
    ))?;
    graph.add_step(Step::new(
        names::PACKAGE_CHECKSUM,
        "Checksum the release artifact",
        Action::Checksum { from: names::PACKAGE_INSTALL.to_string() },
    ))?;
    graph.add_step(Step::new(
        names::PACKAGE_SUMS,
        "Install the checksum sidecar",
        Action::WriteCapture {
            from: names::PACKAGE_CHECKSUM.to_string(),
            dest: request.output_root.join(CHECKSUM_FILE),
        },
    ))?;
    graph.add_step(Step::top_level(
        names::PACKAGE,
        "Package a versioned release with checksums",
        Action::Group,
    ))?;
    graph.depend_on(names::PACKAGE, names::PACKAGE_SUMS)?;
    Ok(())
}
