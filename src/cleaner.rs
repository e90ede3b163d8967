use crate::model::CategoryBucket;
use humansize::{BINARY, format_size};
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, warn};

/// Result of a cleanup pass. `freed_bytes` covers only files the
/// filesystem confirmed deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanOutcome {
    pub freed_bytes: u64,
    pub deleted_count: u64,
    /// Files that vanished between scan and delete. Tolerated, not freed.
    pub missing_count: u64,
    pub failed_count: u64,
}

impl CleanOutcome {
    pub fn display_freed(&self) -> String {
        format_size(self.freed_bytes, BINARY)
    }
}

/// Deletes every selected file, best-effort and per-file. Deleted and
/// vanished entries leave their buckets; failed deletions stay behind.
/// Bucket selection flags are recomputed afterwards.
pub fn clean_selected(buckets: &mut [CategoryBucket]) -> CleanOutcome {
    let mut outcome = CleanOutcome::default();

    for bucket in buckets.iter_mut() {
        bucket.files.retain(|file| {
            if !file.selected {
                return true;
            }
            match fs::remove_file(&file.path) {
                Ok(()) => {
                    debug!(path = %file.path.display(), "deleted");
                    outcome.freed_bytes += file.size;
                    outcome.deleted_count += 1;
                    false
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %file.path.display(), "already gone");
                    outcome.missing_count += 1;
                    false
                }
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "delete failed");
                    outcome.failed_count += 1;
                    true
                }
            }
        });
        bucket.update_selection_state();
    }

    outcome
}
