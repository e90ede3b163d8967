use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a scan before any walking begins. Errors on
/// individual entries mid-walk are swallowed by the walker instead.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("storage root {} does not exist or is not readable", .0.display())]
    StorageUnavailable(PathBuf),

    #[error("no storage root configured and no home directory available")]
    NoStorageRoot,
}
