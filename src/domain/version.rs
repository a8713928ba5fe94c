//! Release version extraction from the package manifest.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::AppError;

/// Token that introduces the version declaration in the manifest.
pub const VERSION_KEY: &str = ".version";

/// Manifests larger than this are rejected without being parsed.
pub const MAX_MANIFEST_BYTES: u64 = 1024 * 1024;

/// Version used for artifact naming when the manifest cannot provide one.
pub const FALLBACK_VERSION: &str = "dev";

/// A release version as declared in the manifest, or a caller-supplied fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString(String);

impl VersionString {
    /// Wrap an explicit value (override or fallback) without parsing.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the manifest at `path`, refusing anything over [`MAX_MANIFEST_BYTES`].
pub fn read_manifest(path: &Path) -> Result<String, AppError> {
    let failure = |details: String| AppError::ManifestReadFailure {
        path: path.display().to_string(),
        details,
    };

    let file = File::open(path).map_err(|e| failure(e.to_string()))?;
    let mut buf = Vec::new();
    file.take(MAX_MANIFEST_BYTES + 1).read_to_end(&mut buf).map_err(|e| failure(e.to_string()))?;

    if buf.len() as u64 > MAX_MANIFEST_BYTES {
        return Err(failure(format!("file exceeds {} bytes", MAX_MANIFEST_BYTES)));
    }

    String::from_utf8(buf).map_err(|e| failure(e.to_string()))
}

/// Extract the version from manifest text.
///
/// The first line whose trimmed form starts with [`VERSION_KEY`] followed by
/// whitespace or `=` wins; later declarations are never consulted.
pub fn parse_version(content: &str) -> Result<VersionString, AppError> {
    for line in content.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix(VERSION_KEY) else {
            continue;
        };
        if !at_key_boundary(rest) {
            continue;
        }
        return quoted_value(rest)
            .map(|value| VersionString(value.trim().to_string()))
            .ok_or_else(|| AppError::InvalidVersionFormat { line: trimmed.to_string() });
    }

    Err(AppError::MissingVersion)
}

/// Strict resolution: read and parse, propagating every failure.
pub fn resolve_version(path: &Path) -> Result<VersionString, AppError> {
    let content = read_manifest(path)?;
    parse_version(&content)
}

/// Lenient resolution: any failure yields `fallback`.
pub fn resolve_version_or(path: &Path, fallback: &str) -> VersionString {
    match resolve_version(path) {
        Ok(version) => version,
        Err(err) => {
            tracing::warn!(manifest = %path.display(), error = %err, fallback, "using fallback version");
            VersionString::new(fallback)
        }
    }
}

fn at_key_boundary(rest: &str) -> bool {
    rest.chars().next().is_none_or(|c| c.is_whitespace() || c == '=')
}

fn quoted_value(text: &str) -> Option<&str> {
    let open = text.find('"')?;
    let after = &text[open + 1..];
    let close = after.find('"')?;
    Some(&after[..close])
}
