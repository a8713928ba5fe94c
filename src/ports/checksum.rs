use std::path::Path;

use crate::domain::AppError;

/// Produces checksum listings for installed files.
pub trait ChecksumPort {
    /// Checksum `path`, returning the listing text exactly as produced.
    fn checksum(&self, path: &Path) -> Result<String, AppError>;
}
