//! Native-vs-web artifact branch, decided once per invocation.

use std::path::PathBuf;

use crate::domain::plan::names;
use crate::domain::{
    Action, AppError, ArtifactKind, BuildContext, CompileUnit, Os, OsClass, Step, StepGraph,
    create_module,
};
use crate::ports::WebSdkPort;

/// Natively linked executable installed under the prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeTarget {
    pub unit: CompileUnit,
    /// File name of the installed executable.
    pub file_name: String,
}

/// Library bundled for the browser by the web SDK.
#[derive(Debug, Clone, PartialEq)]
pub struct WebTarget {
    pub unit: CompileUnit,
    pub flags: Vec<String>,
    pub link: Vec<PathBuf>,
    pub resource_dir: PathBuf,
    pub bundle: PathBuf,
}

/// The artifact branch selected for this invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactBranch {
    Native(NativeTarget),
    Web(WebTarget),
}

impl ArtifactBranch {
    /// Pick the branch from the target's OS classification.
    pub fn select<W: WebSdkPort + ?Sized>(ctx: &BuildContext, sdk: &W) -> Self {
        let unit = create_module(ctx);
        let project = ctx.project();

        match ctx.target().os_class() {
            OsClass::WebExport => ArtifactBranch::Web(WebTarget {
                flags: sdk.default_flags(ctx.target(), ctx.optimize()),
                link: unit.link_library.iter().cloned().collect(),
                resource_dir: project.resolve(&project.resource_dir),
                bundle: project.web_dir().join(format!("{}.html", unit.name)),
                unit,
            }),
            OsClass::Native => {
                let file_name = match ctx.target().os() {
                    Os::Windows => format!("{}.exe", unit.name),
                    _ => unit.name.clone(),
                };
                ArtifactBranch::Native(NativeTarget { unit, file_name })
            }
        }
    }

    pub fn native(&self) -> Option<&NativeTarget> {
        match self {
            ArtifactBranch::Native(native) => Some(native),
            ArtifactBranch::Web(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactBranch::Native(_) => "native",
            ArtifactBranch::Web(_) => "web",
        }
    }

    /// Add this branch's build, `install`, and `run` steps.
    pub fn wire(
        &self,
        graph: &mut StepGraph,
        ctx: &BuildContext,
        run_args: &[String],
    ) -> Result<(), AppError> {
        match self {
            ArtifactBranch::Native(native) => native.wire(graph, ctx, run_args),
            ArtifactBranch::Web(web) => web.wire(graph, ctx, run_args),
        }
    }
}

impl NativeTarget {
    fn wire(
        &self,
        graph: &mut StepGraph,
        ctx: &BuildContext,
        run_args: &[String],
    ) -> Result<(), AppError> {
        let project = ctx.project();

        graph.add_step(Step::new(
            names::COMPILE_EXE,
            "Compile the native executable",
            Action::Compile {
                unit: self.unit.clone(),
                kind: ArtifactKind::Executable,
                out_dir: project.resolve(&project.cache_dir),
            },
        ))?;
        graph.add_step(Step::top_level(
            names::INSTALL,
            "Install the executable to the output prefix",
            Action::InstallArtifact {
                from: names::COMPILE_EXE.to_string(),
                dest: project.bin_dir().join(&self.file_name),
            },
        ))?;
        graph.add_step(Step::top_level(
            names::RUN,
            "Run the installed executable",
            Action::RunArtifact { from: names::INSTALL.to_string(), args: run_args.to_vec() },
        ))?;
        Ok(())
    }
}

impl WebTarget {
    fn wire(
        &self,
        graph: &mut StepGraph,
        ctx: &BuildContext,
        run_args: &[String],
    ) -> Result<(), AppError> {
        let project = ctx.project();

        graph.add_step(Step::new(
            names::COMPILE_LIB,
            "Compile the library for web export",
            Action::Compile {
                unit: self.unit.clone(),
                kind: ArtifactKind::Library,
                out_dir: project.resolve(&project.cache_dir),
            },
        ))?;
        graph.add_step(Step::new(
            names::EMIT_BUNDLE,
            "Link and bundle for the browser",
            Action::EmitBundle {
                from: names::COMPILE_LIB.to_string(),
                link: self.link.clone(),
                flags: self.flags.clone(),
                resource_dir: self.resource_dir.clone(),
                output: self.bundle.clone(),
            },
        ))?;
        graph.add_step(Step::top_level(
            names::INSTALL,
            "Emit the web bundle to the output prefix",
            Action::Group,
        ))?;
        graph.depend_on(names::INSTALL, names::EMIT_BUNDLE)?;
        graph.add_step(Step::top_level(
            names::RUN,
            "Serve the web bundle in a browser",
            Action::LaunchBrowser { from: names::EMIT_BUNDLE.to_string(), args: run_args.to_vec() },
        ))?;
        Ok(())
    }
}
