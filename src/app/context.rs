use std::path::{Path, PathBuf};

use crate::app::config::ProjectConfig;
use crate::domain::{
    AppError, BuildContext, DependencyHandle, FALLBACK_VERSION, OptimizeMode, PackageRequest,
    ProjectLayout, TargetPlatform, VersionString, resolve_version_or,
};

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<String>,
    pub optimize: Option<String>,
    pub prefix: Option<PathBuf>,
}

/// Build the per-invocation context for the project rooted at `root`.
pub fn build_context(
    root: &Path,
    config: &ProjectConfig,
    overrides: &Overrides,
) -> Result<BuildContext, AppError> {
    let target: TargetPlatform =
        overrides.target.as_deref().unwrap_or(&config.build.target).parse()?;
    let optimize: OptimizeMode =
        overrides.optimize.as_deref().unwrap_or(&config.build.optimize).parse()?;
    let prefix = overrides.prefix.clone().unwrap_or_else(|| config.build.prefix.clone());

    let project = &config.project;
    let layout = ProjectLayout {
        name: project.name.clone(),
        root: root.to_path_buf(),
        root_source: project.root_source.clone(),
        test_source: project.test_source.clone().unwrap_or_else(|| project.root_source.clone()),
        manifest: project.manifest.clone(),
        source_dirs: project.source_dirs.clone(),
        resource_dir: config.web.resource_dir.clone(),
        prefix: if prefix.is_absolute() { prefix } else { root.join(prefix) },
        cache_dir: config.build.cache_dir.clone(),
    };
    let dependency = DependencyHandle {
        import_name: config.dependency.name.clone(),
        module_path: config.dependency.module.clone(),
        library: config.dependency.library.clone(),
    };

    Ok(BuildContext::new(target, optimize, dependency, layout))
}

/// Version and destination for `package`: an explicit version wins, otherwise
/// the manifest is consulted with a `dev` fallback.
pub fn package_request(
    ctx: &BuildContext,
    version_override: Option<&str>,
    destination: Option<&Path>,
) -> PackageRequest {
    let project = ctx.project();
    let version = match version_override {
        Some(version) => VersionString::new(version),
        None => resolve_version_or(&project.resolve(&project.manifest), FALLBACK_VERSION),
    };
    let output_root = match destination {
        Some(dest) => project.resolve(dest),
        None => project.prefix.clone(),
    };
    PackageRequest { version, output_root }
}
