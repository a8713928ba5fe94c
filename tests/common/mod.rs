//! Shared testing utilities for stepwise CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fake compiler driver: logs its arguments, emits a runnable stub (which
/// logs its own arguments to `run.log`) for `-femit-bin=`, and fails
/// `fmt --check` when `fmt.fail` exists beside it.
const FAKE_ZIG: &str = r#"#!/bin/sh
here="$(cd "$(dirname "$0")" && pwd)"
echo "$*" >> "$here/zig.log"
if [ "$1" = "fmt" ] && [ "$2" = "--check" ] && [ -f "$here/fmt.fail" ]; then
    echo "src/main.zig: non-conforming formatting" >&2
    exit 1
fi
for arg in "$@"; do
    case "$arg" in
        -femit-bin=*)
            out="${arg#-femit-bin=}"
            mkdir -p "$(dirname "$out")"
            printf '#!/bin/sh\necho "$*" >> "%s/run.log"\nexit 0\n' "$here" > "$out"
            chmod +x "$out"
            ;;
    esac
done
exit 0
"#;

/// Testing harness providing an isolated project for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    tools_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated project with a fake compiler installed.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let tools_dir = root.path().join("tools");
        fs::create_dir_all(work_dir.join("src")).expect("Failed to create test work directory");
        fs::create_dir_all(&tools_dir).expect("Failed to create tools directory");

        let ctx = Self { root, work_dir, tools_dir };
        ctx.install_fake_zig();
        ctx.write_file("src/main.zig", "pub fn main() void {}\n");
        ctx
    }

    /// Path to the project directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `stepwise` binary in the project.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("stepwise").expect("Failed to locate stepwise binary");
        cmd.current_dir(&self.work_dir).env("RUST_LOG", "stepwise=warn");
        cmd
    }

    /// Write `stepwise.toml` pointing at the fake compiler; `extra` is appended verbatim.
    pub fn write_config(&self, checksum: &str, extra: &str) {
        let content = format!(
            r#"[project]
name = "waybg"

[tools]
compiler = "{}"
checksum = "{}"
{}"#,
            self.tools_dir.join("zig").display(),
            checksum,
            extra
        );
        self.write_file("stepwise.toml", &content);
    }

    pub fn write_manifest(&self, version: &str) {
        self.write_file(
            "build.zig.zon",
            &format!(".{{\n    .name = .waybg,\n    .version = \"{}\",\n}}\n", version),
        );
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    /// Make the fake compiler reject `fmt --check`.
    pub fn fail_format_check(&self) {
        fs::write(self.tools_dir.join("fmt.fail"), "").expect("Failed to write marker");
    }

    /// Lines the fake compiler was invoked with.
    pub fn zig_calls(&self) -> Vec<String> {
        fs::read_to_string(self.tools_dir.join("zig.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Argument lines received by executed stubs.
    pub fn run_calls(&self) -> Vec<String> {
        fs::read_to_string(self.tools_dir.join("run.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn temp_root(&self) -> &Path {
        self.root.path()
    }

    fn install_fake_zig(&self) {
        let path = self.tools_dir.join("zig");
        fs::write(&path, FAKE_ZIG).expect("Failed to write fake zig");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to mark fake zig executable");
        }
    }
}
