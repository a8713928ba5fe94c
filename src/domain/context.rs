use std::path::{Path, PathBuf};

use crate::domain::{OptimizeMode, TargetPlatform};

/// Handle to the single external dependency imported by the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyHandle {
    /// Name under which the module is imported.
    pub import_name: String,
    /// Root source file of the dependency module.
    pub module_path: PathBuf,
    /// Prebuilt library artifact linked into the executable, if any.
    pub library: Option<PathBuf>,
}

/// Filesystem layout of the project being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Application name used for artifacts.
    pub name: String,
    /// Project root; relative paths below are resolved against it.
    pub root: PathBuf,
    pub root_source: PathBuf,
    pub test_source: PathBuf,
    pub manifest: PathBuf,
    /// Directories handed to the formatter.
    pub source_dirs: Vec<PathBuf>,
    /// Embedded into web bundles.
    pub resource_dir: PathBuf,
    /// Output root for installed artifacts.
    pub prefix: PathBuf,
    /// Scratch directory for intermediate compiler output.
    pub cache_dir: PathBuf,
}

impl ProjectLayout {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    pub fn web_dir(&self) -> PathBuf {
        self.prefix.join("web")
    }
}

/// Per-invocation build configuration. Built once, then only borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    target: TargetPlatform,
    optimize: OptimizeMode,
    dependency: DependencyHandle,
    project: ProjectLayout,
}

impl BuildContext {
    pub fn new(
        target: TargetPlatform,
        optimize: OptimizeMode,
        dependency: DependencyHandle,
        project: ProjectLayout,
    ) -> Self {
        Self { target, optimize, dependency, project }
    }

    pub fn target(&self) -> &TargetPlatform {
        &self.target
    }

    pub fn optimize(&self) -> OptimizeMode {
        self.optimize
    }

    pub fn dependency(&self) -> &DependencyHandle {
        &self.dependency
    }

    pub fn project(&self) -> &ProjectLayout {
        &self.project
    }
}
