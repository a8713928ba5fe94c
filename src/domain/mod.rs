pub mod context;
pub mod error;
pub mod graph;
pub mod module;
pub mod package;
pub mod plan;
pub mod step;
pub mod target;
pub mod target_selector;
pub mod version;

pub use context::{BuildContext, DependencyHandle, ProjectLayout};
pub use error::AppError;
pub use graph::StepGraph;
pub use module::{CompileUnit, Import, create_host_module, create_module};
pub use package::{CHECKSUM_FILE, PackageRequest, artifact_name};
pub use plan::{BuildOptions, BuildPlan, build_graph};
pub use step::{Action, Artifact, ArtifactKind, Step};
pub use target::{OptimizeMode, Os, OsClass, TargetPlatform};
pub use target_selector::{ArtifactBranch, NativeTarget, WebTarget};
pub use version::{
    FALLBACK_VERSION, MAX_MANIFEST_BYTES, VersionString, parse_version, read_manifest,
    resolve_version, resolve_version_or,
};
