//! Project configuration loaded from `stepwise.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, OptimizeMode, TargetPlatform};

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE: &str = "stepwise.toml";

/// Checksum tool value selecting the in-process SHA-256 implementation.
pub const BUILTIN_CHECKSUM: &str = "builtin";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub dependency: DependencySection,
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub web: WebSection,
}

impl ProjectConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.project.validate()?;
        self.build.validate()?;
        self.dependency.validate()?;
        self.tools.validate()?;
        Ok(())
    }
}

/// Application identity and source layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_root_source")]
    pub root_source: PathBuf,
    /// Entry point of the test runner; defaults to `root_source`.
    #[serde(default)]
    pub test_source: Option<PathBuf>,
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<PathBuf>,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            root_source: default_root_source(),
            test_source: None,
            manifest: default_manifest(),
            source_dirs: default_source_dirs(),
        }
    }
}

impl ProjectSection {
    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::config_error("project.name must not be empty"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(AppError::config_error(format!(
                "project.name '{}' must be alphanumeric with hyphens or underscores",
                self.name
            )));
        }
        if self.source_dirs.is_empty() {
            return Err(AppError::config_error("project.source_dirs must not be empty"));
        }
        Ok(())
    }
}

fn default_name() -> String {
    "app".to_string()
}

fn default_root_source() -> PathBuf {
    PathBuf::from("src/main.zig")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("build.zig.zon")
}

fn default_source_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("src"), PathBuf::from("build.zig")]
}

/// Defaults for the build options that can also be given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_optimize")]
    pub optimize: String,
    #[serde(default = "default_prefix")]
    pub prefix: PathBuf,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            target: default_target(),
            optimize: default_optimize(),
            prefix: default_prefix(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl BuildSection {
    pub fn validate(&self) -> Result<(), AppError> {
        self.target.parse::<TargetPlatform>()?;
        self.optimize.parse::<OptimizeMode>()?;
        Ok(())
    }
}

fn default_target() -> String {
    "native".to_string()
}

fn default_optimize() -> String {
    OptimizeMode::Debug.cli_name().to_string()
}

fn default_prefix() -> PathBuf {
    PathBuf::from("zig-out")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".zig-cache/stepwise")
}

/// The one external dependency imported by the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencySection {
    #[serde(default = "default_dependency_name")]
    pub name: String,
    #[serde(default = "default_dependency_module")]
    pub module: PathBuf,
    #[serde(default)]
    pub library: Option<PathBuf>,
}

impl Default for DependencySection {
    fn default() -> Self {
        Self { name: default_dependency_name(), module: default_dependency_module(), library: None }
    }
}

impl DependencySection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::config_error("dependency.name must not be empty"));
        }
        Ok(())
    }
}

fn default_dependency_name() -> String {
    "raylib".to_string()
}

fn default_dependency_module() -> PathBuf {
    PathBuf::from("deps/raylib/src/raylib.zig")
}

/// External executables, located by name on `PATH` unless given as paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsSection {
    #[serde(default = "default_compiler")]
    pub compiler: String,
    /// Checksum executable, or `builtin` for in-process SHA-256.
    #[serde(default = "default_checksum")]
    pub checksum: String,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self { compiler: default_compiler(), checksum: default_checksum() }
    }
}

impl ToolsSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.compiler.trim().is_empty() {
            return Err(AppError::config_error("tools.compiler must not be empty"));
        }
        if self.checksum.trim().is_empty() {
            return Err(AppError::config_error("tools.checksum must not be empty"));
        }
        Ok(())
    }

    pub fn builtin_checksum(&self) -> bool {
        self.checksum == BUILTIN_CHECKSUM
    }
}

fn default_compiler() -> String {
    "zig".to_string()
}

fn default_checksum() -> String {
    "sha256sum".to_string()
}

/// Web-export SDK settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebSection {
    #[serde(default = "default_emcc")]
    pub compiler: String,
    #[serde(default = "default_emrun")]
    pub launcher: String,
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,
    #[serde(default)]
    pub shell_file: Option<PathBuf>,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            compiler: default_emcc(),
            launcher: default_emrun(),
            resource_dir: default_resource_dir(),
            shell_file: None,
        }
    }
}

fn default_emcc() -> String {
    "emcc".to_string()
}

fn default_emrun() -> String {
    "emrun".to_string()
}

fn default_resource_dir() -> PathBuf {
    PathBuf::from("resources")
}

/// Load configuration from `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<ProjectConfig, AppError> {
    if !path.exists() {
        tracing::debug!(config = %path.display(), "no config file, using defaults");
        return Ok(ProjectConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<ProjectConfig, AppError> {
    let config: ProjectConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = ProjectConfig::default();
        assert_eq!(config.project.name, "app");
        assert_eq!(config.build.target, "native");
        assert_eq!(config.tools.checksum, "sha256sum");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_file() {
        let config = parse_config_content(
            r#"
[project]
name = "waybg"

[dependency]
name = "raylib"
library = "deps/raylib/zig-out/lib/libraylib.a"

[tools]
checksum = "builtin"
"#,
        )
        .unwrap();

        assert_eq!(config.project.name, "waybg");
        assert_eq!(config.project.root_source, PathBuf::from("src/main.zig"));
        assert_eq!(
            config.dependency.library,
            Some(PathBuf::from("deps/raylib/zig-out/lib/libraylib.a"))
        );
        assert!(config.tools.builtin_checksum());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = parse_config_content("[project]\nentry = \"main.zig\"\n");
        assert!(matches!(result, Err(AppError::TomlParse(_))));
    }

    #[test]
    fn rejects_invalid_optimize_mode() {
        let result = parse_config_content("[build]\noptimize = \"turbo\"\n");
        assert!(matches!(result, Err(AppError::InvalidOptimizeMode(_))));
    }

    #[test]
    fn rejects_bad_project_name() {
        let config = ProjectSection { name: "my app".to_string(), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.project.name, "app");
    }
}
