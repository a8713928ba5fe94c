use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use sha2::{Digest, Sha256};

use super::process::capture;
use crate::domain::AppError;
use crate::ports::ChecksumPort;

/// Checksum via an external executable such as `sha256sum`.
#[derive(Debug, Clone)]
pub struct CommandChecksum {
    program: String,
    root: PathBuf,
}

impl CommandChecksum {
    pub fn new(program: impl Into<String>, root: PathBuf) -> Self {
        Self { program: program.into(), root }
    }
}

impl ChecksumPort for CommandChecksum {
    fn checksum(&self, path: &Path) -> Result<String, AppError> {
        let mut command = Command::new(&self.program);
        command.arg(path).current_dir(&self.root);
        capture(&mut command)
    }
}

/// In-process SHA-256 producing the same `<hex>  <path>` listing as `sha256sum`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Checksum;

impl ChecksumPort for Sha256Checksum {
    fn checksum(&self, path: &Path) -> Result<String, AppError> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 64 * 1024];
        loop {
            let read = file.read(&mut buf)?;
            if read == 0 {
                break;
            }
            hasher.update(&buf[..read]);
        }
        let hex: String = hasher.finalize().iter().map(|byte| format!("{:02x}", byte)).collect();
        Ok(format!("{}  {}\n", hex, path.display()))
    }
}
