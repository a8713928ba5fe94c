//! Target platform descriptors and their export classification.

use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;

/// Operating system component of a target triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Emscripten,
    Other(String),
}

/// How artifacts for an OS are produced and shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsClass {
    /// Natively linked executable installed on disk.
    Native,
    /// Library handed to the web SDK for bundling.
    WebExport,
}

impl Os {
    pub fn as_str(&self) -> &str {
        match self {
            Os::Linux => "linux",
            Os::Macos => "macos",
            Os::Windows => "windows",
            Os::Emscripten => "emscripten",
            Os::Other(name) => name,
        }
    }

    pub fn class(&self) -> OsClass {
        match self {
            Os::Emscripten => OsClass::WebExport,
            _ => OsClass::Native,
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "linux" => Os::Linux,
            "macos" => Os::Macos,
            "windows" => Os::Windows,
            "emscripten" => Os::Emscripten,
            other => Os::Other(other.to_string()),
        }
    }
}

/// A resolved `<arch>-<os>[-<abi>]` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPlatform {
    arch: String,
    os: Os,
    abi: Option<String>,
}

impl TargetPlatform {
    pub fn new(arch: &str, os: Os, abi: Option<&str>) -> Self {
        Self { arch: arch.to_string(), os, abi: abi.map(str::to_string) }
    }

    /// The platform of the machine running this invocation.
    pub fn host() -> Self {
        let os = Os::from_tag(std::env::consts::OS);
        let abi = match os {
            Os::Linux if cfg!(target_env = "musl") => Some("musl"),
            Os::Linux => Some("gnu"),
            Os::Windows if cfg!(target_env = "msvc") => Some("msvc"),
            Os::Windows => Some("gnu"),
            _ => None,
        };
        Self::new(std::env::consts::ARCH, os, abi)
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn os(&self) -> &Os {
        &self.os
    }

    pub fn abi(&self) -> Option<&str> {
        self.abi.as_deref()
    }

    pub fn os_class(&self) -> OsClass {
        self.os.class()
    }

    /// Canonical triplet text, e.g. `x86_64-linux-gnu`.
    pub fn triplet(&self) -> String {
        match &self.abi {
            Some(abi) => format!("{}-{}-{}", self.arch, self.os.as_str(), abi),
            None => format!("{}-{}", self.arch, self.os.as_str()),
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.triplet())
    }
}

impl FromStr for TargetPlatform {
    type Err = AppError;

    /// Accepts `native` for the host or a dash-separated triple.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "native" {
            return Ok(Self::host());
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(AppError::InvalidTarget(s.to_string()));
        }
        match parts.as_slice() {
            [arch, os] => Ok(Self::new(arch, Os::from_tag(os), None)),
            [arch, os, abi] => Ok(Self::new(arch, Os::from_tag(os), Some(abi))),
            _ => Err(AppError::InvalidTarget(s.to_string())),
        }
    }
}

/// Compiler optimization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizeMode {
    #[default]
    Debug,
    ReleaseSafe,
    ReleaseFast,
    ReleaseSmall,
}

impl OptimizeMode {
    pub const ALL: [OptimizeMode; 4] = [
        OptimizeMode::Debug,
        OptimizeMode::ReleaseSafe,
        OptimizeMode::ReleaseFast,
        OptimizeMode::ReleaseSmall,
    ];

    /// Value passed to the compiler's `-O` flag.
    pub fn compiler_flag(self) -> &'static str {
        match self {
            OptimizeMode::Debug => "Debug",
            OptimizeMode::ReleaseSafe => "ReleaseSafe",
            OptimizeMode::ReleaseFast => "ReleaseFast",
            OptimizeMode::ReleaseSmall => "ReleaseSmall",
        }
    }

    /// Name accepted on the command line and in configuration.
    pub fn cli_name(self) -> &'static str {
        match self {
            OptimizeMode::Debug => "debug",
            OptimizeMode::ReleaseSafe => "release-safe",
            OptimizeMode::ReleaseFast => "release-fast",
            OptimizeMode::ReleaseSmall => "release-small",
        }
    }
}

impl FromStr for OptimizeMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        OptimizeMode::ALL
            .into_iter()
            .find(|mode| mode.cli_name() == needle || mode.compiler_flag() == needle)
            .ok_or_else(|| AppError::InvalidOptimizeMode(s.to_string()))
    }
}

impl fmt::Display for OptimizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}
