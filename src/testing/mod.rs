mod fake_checksum;
mod fake_toolchain;
mod fake_web_sdk;

pub use fake_checksum::FakeChecksum;
pub use fake_toolchain::FakeToolchain;
pub use fake_web_sdk::FakeWebSdk;

use std::path::{Path, PathBuf};

use crate::domain::{BuildContext, DependencyHandle, OptimizeMode, ProjectLayout};

/// Context for a synthetic project rooted at `/project`.
pub fn context_for(triple: &str) -> BuildContext {
    context_in(Path::new("/project"), triple)
}

/// Context for a synthetic project rooted at `root`.
pub fn context_in(root: &Path, triple: &str) -> BuildContext {
    let project = ProjectLayout {
        name: "waybg".to_string(),
        root: root.to_path_buf(),
        root_source: PathBuf::from("src/main.zig"),
        test_source: PathBuf::from("src/main.zig"),
        manifest: PathBuf::from("build.zig.zon"),
        source_dirs: vec![PathBuf::from("src"), PathBuf::from("build.zig")],
        resource_dir: PathBuf::from("resources"),
        prefix: root.join("zig-out"),
        cache_dir: PathBuf::from(".zig-cache/stepwise"),
    };
    let dependency = DependencyHandle {
        import_name: "raylib".to_string(),
        module_path: PathBuf::from("deps/raylib/src/raylib.zig"),
        library: None,
    };
    BuildContext::new(
        triple.parse().expect("test triple"),
        OptimizeMode::Debug,
        dependency,
        project,
    )
}
