use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::ChecksumPort;

/// Returns `deadbeef  <path>` listings, or fails when told to.
#[derive(Default)]
pub struct FakeChecksum {
    calls: Mutex<Vec<PathBuf>>,
    failing: Mutex<bool>,
}

impl FakeChecksum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChecksumPort for FakeChecksum {
    fn checksum(&self, path: &Path) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        if *self.failing.lock().unwrap() {
            return Err(AppError::ToolFailed {
                command: format!("sha256sum {}", path.display()),
                details: "exit status: 1".into(),
            });
        }
        Ok(format!("deadbeef  {}\n", path.display()))
    }
}
