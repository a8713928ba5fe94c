//! Compilation unit construction.

use std::path::PathBuf;

use crate::domain::{BuildContext, OptimizeMode, TargetPlatform};

/// Named import of the external dependency module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub name: String,
    pub source: PathBuf,
}

/// Everything the compiler needs to build one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileUnit {
    pub name: String,
    pub root_source: PathBuf,
    pub target: TargetPlatform,
    pub optimize: OptimizeMode,
    pub import: Import,
    pub link_library: Option<PathBuf>,
}

/// Unit for the shipped artifact, bound to the requested target.
pub fn create_module(ctx: &BuildContext) -> CompileUnit {
    let project = ctx.project();
    unit_for(ctx, project.resolve(&project.root_source), ctx.target().clone())
}

/// Unit for the test runner, always built for the invoking host.
pub fn create_host_module(ctx: &BuildContext) -> CompileUnit {
    let project = ctx.project();
    unit_for(ctx, project.resolve(&project.test_source), TargetPlatform::host())
}

fn unit_for(ctx: &BuildContext, root_source: PathBuf, target: TargetPlatform) -> CompileUnit {
    let project = ctx.project();
    let dependency = ctx.dependency();
    CompileUnit {
        name: project.name.clone(),
        root_source,
        target,
        optimize: ctx.optimize(),
        import: Import {
            name: dependency.import_name.clone(),
            source: project.resolve(&dependency.module_path),
        },
        link_library: dependency.library.as_ref().map(|lib| project.resolve(lib)),
    }
}
