//! Composition of the full step graph for one invocation.

use crate::domain::{
    Action, AppError, ArtifactBranch, ArtifactKind, BuildContext, PackageRequest, Step, StepGraph,
    create_host_module, package,
};
use crate::ports::WebSdkPort;

/// Step names. The first group are command-line verbs.
pub mod names {
    pub const INSTALL: &str = "install";
    pub const RUN: &str = "run";
    pub const TEST: &str = "test";
    pub const FMT: &str = "fmt";
    pub const FMT_CHECK: &str = "fmt-check";
    pub const CI: &str = "ci";
    pub const PACKAGE: &str = "package";

    pub const COMPILE_EXE: &str = "compile-exe";
    pub const COMPILE_LIB: &str = "compile-lib";
    pub const EMIT_BUNDLE: &str = "emit-bundle";
    pub const COMPILE_TESTS: &str = "compile-tests";
    pub const RUN_TESTS: &str = "run-tests";
    pub const PACKAGE_INSTALL: &str = "package-install";
    pub const PACKAGE_CHECKSUM: &str = "package-checksum";
    pub const PACKAGE_SUMS: &str = "package-sums";
}

/// Invocation inputs that shape the graph beyond the build context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Passed through to the executable or browser helper by `run`.
    pub run_args: Vec<String>,
    pub package: PackageRequest,
}

/// A validated step graph together with the branch it was built for.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub graph: StepGraph,
    pub branch: ArtifactBranch,
}

/// Build every step for `ctx` in a single pass and check the result is a DAG.
pub fn build_graph<W: WebSdkPort + ?Sized>(
    ctx: &BuildContext,
    options: &BuildOptions,
    sdk: &W,
) -> Result<BuildPlan, AppError> {
    let mut graph = StepGraph::new();
    let branch = ArtifactBranch::select(ctx, sdk);
    tracing::debug!(branch = branch.label(), target = %ctx.target(), "selected artifact branch");

    branch.wire(&mut graph, ctx, &options.run_args)?;
    wire_checks(&mut graph, ctx)?;

    if let Some(native) = branch.native() {
        package::wire(&mut graph, native, &options.package)?;
    }

    graph.validate()?;
    Ok(BuildPlan { graph, branch })
}

fn wire_checks(graph: &mut StepGraph, ctx: &BuildContext) -> Result<(), AppError> {
    let project = ctx.project();
    let sources: Vec<_> = project.source_dirs.iter().map(|dir| project.resolve(dir)).collect();

    graph.add_step(Step::top_level(
        names::FMT,
        "Reformat source files in place",
        Action::Format { paths: sources.clone(), check: false },
    ))?;
    graph.add_step(Step::top_level(
        names::FMT_CHECK,
        "Verify source formatting",
        Action::Format { paths: sources, check: true },
    ))?;

    graph.add_step(Step::new(
        names::COMPILE_TESTS,
        "Compile the host test runner",
        Action::Compile {
            unit: create_host_module(ctx),
            kind: ArtifactKind::TestRunner,
            out_dir: project.resolve(&project.cache_dir),
        },
    ))?;
    graph.add_step(Step::new(
        names::RUN_TESTS,
        "Execute the host test runner",
        Action::RunArtifact { from: names::COMPILE_TESTS.to_string(), args: Vec::new() },
    ))?;
    graph.add_step(Step::top_level(names::TEST, "Run unit tests", Action::Group))?;
    graph.depend_on(names::TEST, names::RUN_TESTS)?;

    graph.add_step(Step::top_level(
        names::CI,
        "Check formatting, build, and run tests",
        Action::Group,
    ))?;
    for dep in [names::FMT_CHECK, names::INSTALL, names::TEST] {
        graph.depend_on(names::CI, dep)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionString;
    use crate::testing::{FakeWebSdk, context_for};

    fn options() -> BuildOptions {
        BuildOptions {
            run_args: Vec::new(),
            package: PackageRequest {
                version: VersionString::new("0.3.1"),
                output_root: "/tmp/release".into(),
            },
        }
    }

    fn top_level_names(plan: &BuildPlan) -> Vec<String> {
        plan.graph.top_level().iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn native_plan_has_every_verb() {
        let plan =
            build_graph(&context_for("x86_64-linux-gnu"), &options(), &FakeWebSdk::new()).unwrap();

        assert_eq!(
            top_level_names(&plan),
            vec!["ci", "fmt", "fmt-check", "install", "package", "run", "test"]
        );
    }

    #[test]
    fn web_plan_never_packages_or_installs_executable() {
        let plan =
            build_graph(&context_for("wasm32-emscripten"), &options(), &FakeWebSdk::new()).unwrap();

        assert!(!plan.graph.contains(names::PACKAGE));
        assert!(!plan.graph.contains(names::PACKAGE_INSTALL));
        assert!(!plan.graph.contains(names::COMPILE_EXE));
        assert!(
            plan.graph
                .steps()
                .all(|s| !matches!(s.action, Action::InstallArtifact { .. })),
            "web branch must not install a native executable"
        );
    }

    #[test]
    fn ci_depends_on_fmt_check_install_and_test() {
        let plan =
            build_graph(&context_for("x86_64-linux-gnu"), &options(), &FakeWebSdk::new()).unwrap();

        let ci = plan.graph.get(names::CI).unwrap();
        let deps: Vec<_> = ci.dependencies.iter().map(String::as_str).collect();
        assert_eq!(deps, vec![names::FMT_CHECK, names::INSTALL, names::TEST]);
    }

    #[test]
    fn fmt_is_not_a_dependency_of_anything() {
        let plan =
            build_graph(&context_for("x86_64-linux-gnu"), &options(), &FakeWebSdk::new()).unwrap();
        assert!(plan.graph.steps().all(|s| !s.dependencies.contains(names::FMT)));
    }

    #[test]
    fn tests_build_for_host_even_when_cross_compiling() {
        let plan = build_graph(&context_for("aarch64-linux-musl"), &options(), &FakeWebSdk::new())
            .unwrap();

        match &plan.graph.get(names::COMPILE_TESTS).unwrap().action {
            Action::Compile { unit, kind, .. } => {
                assert_eq!(*kind, ArtifactKind::TestRunner);
                assert_eq!(unit.target, crate::domain::TargetPlatform::host());
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }
}
