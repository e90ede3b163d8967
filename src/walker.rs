use crate::classifier::{Classifier, is_system_dir};
use crate::constants::YIELD_INTERVAL_BYTES;
use crate::model::{CategoryBucket, JunkCategory, JunkFile};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::debug;

/// Depth-first traversal over an explicit work list (directory depth is
/// untrusted, so no call-stack recursion). Junk directories are swept
/// wholesale: descendants inherit junk status and the predicate is never
/// re-tested below the matching directory.
///
/// One walker instance covers a whole scan; its visited set spans all
/// roots so overlapping roots never double-count.
pub struct Walker<'a> {
    classifier: &'a Classifier,
    cancel: Arc<AtomicBool>,
    visited: HashSet<PathBuf>,
    found_per_category: HashMap<JunkCategory, usize>,
    scanned_bytes: u64,
    bytes_since_yield: u64,
}

struct Frame {
    path: PathBuf,
    in_junk_subtree: bool,
}

impl<'a> Walker<'a> {
    pub fn new(classifier: &'a Classifier, cancel: Arc<AtomicBool>) -> Self {
        Self {
            classifier,
            cancel,
            visited: HashSet::new(),
            found_per_category: HashMap::new(),
            scanned_bytes: 0,
            bytes_since_yield: 0,
        }
    }

    pub fn scanned_bytes(&self) -> u64 {
        self.scanned_bytes
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Walks one root, invoking `on_file` for every junk file found and
    /// `on_progress` as the traversal advances. Returns the cumulative
    /// junk byte count across all roots walked so far.
    pub fn walk(
        &mut self,
        root: &Path,
        on_file: &mut dyn FnMut(JunkFile),
        on_progress: &mut dyn FnMut(&Path, u64),
    ) -> u64 {
        let mut stack = vec![Frame {
            path: root.to_path_buf(),
            in_junk_subtree: false,
        }];

        while let Some(frame) = stack.pop() {
            if self.cancelled() {
                break;
            }
            if !self.visited.insert(frame.path.clone()) {
                debug!(path = %frame.path.display(), "already visited, skipping");
                continue;
            }
            on_progress(&frame.path, self.scanned_bytes);

            // An unlistable directory is treated as empty, not as an error.
            let Ok(read_dir) = fs::read_dir(&frame.path) else {
                continue;
            };

            for entry in read_dir.flatten() {
                if self.cancelled() {
                    break;
                }
                let path = entry.path();
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };

                if file_type.is_dir() {
                    if frame.in_junk_subtree {
                        stack.push(Frame {
                            path,
                            in_junk_subtree: true,
                        });
                    } else if self.classifier.is_junk_dir(&path) {
                        debug!(path = %path.display(), "junk directory, sweeping subtree");
                        stack.push(Frame {
                            path,
                            in_junk_subtree: true,
                        });
                    } else if is_system_dir(&path) {
                        debug!(path = %path.display(), "system directory, pruned");
                    } else {
                        stack.push(Frame {
                            path,
                            in_junk_subtree: false,
                        });
                    }
                } else if file_type.is_file() {
                    let Ok(metadata) = entry.metadata() else {
                        continue;
                    };
                    let size = metadata.len();
                    on_progress(&path, self.scanned_bytes);

                    if frame.in_junk_subtree {
                        if size > 0 {
                            let category = self
                                .classifier
                                .classify(&path, size)
                                .unwrap_or(JunkCategory::AppCache);
                            self.emit(path, size, category, on_file);
                        }
                    } else if let Some(category) = self.classifier.classify(&path, size) {
                        self.emit(path, size, category, on_file);
                    }
                }
            }
        }

        self.scanned_bytes
    }

    /// Mirrors the aggregator's per-category cap so a saturated category
    /// stops producing events. Over-cap matches are still counted as found.
    fn emit(
        &mut self,
        path: PathBuf,
        size: u64,
        category: JunkCategory,
        on_file: &mut dyn FnMut(JunkFile),
    ) {
        let count = self.found_per_category.entry(category).or_default();
        *count += 1;
        if *count > CategoryBucket::MAX_FILES {
            debug!(
                category = category.name(),
                path = %path.display(),
                "category at capacity, match not materialized"
            );
            return;
        }

        self.scanned_bytes += size;
        self.pace(size);
        on_file(JunkFile::new(path, size, category));
    }

    fn pace(&mut self, size: u64) {
        self.bytes_since_yield += size;
        if self.bytes_since_yield >= YIELD_INTERVAL_BYTES {
            self.bytes_since_yield = 0;
            thread::yield_now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &Path, len: usize) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut f = File::create(path)?;
        f.write_all(&vec![0u8; len])?;
        Ok(())
    }

    fn collect(roots: &[&Path]) -> (Vec<JunkFile>, u64) {
        let classifier = Classifier::new();
        let cancel = Arc::new(AtomicBool::new(false));
        let mut walker = Walker::new(&classifier, cancel);
        let mut found = Vec::new();
        let mut total = 0;
        for root in roots {
            total = walker.walk(root, &mut |f| found.push(f), &mut |_, _| {});
        }
        (found, total)
    }

    #[test]
    fn junk_directory_sweeps_all_descendants() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        // A plain .txt would never classify as junk on its own.
        write_file(&root.join("cache/notes.txt"), 64)?;
        write_file(&root.join("cache/nested/deep/blob.dat"), 32)?;

        let (found, total) = collect(&[root]);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|f| f.category == JunkCategory::AppCache));
        assert_eq!(total, 96);
        Ok(())
    }

    #[test]
    fn empty_files_in_junk_directories_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        write_file(&root.join("cache/empty.bin"), 0)?;
        write_file(&root.join("cache/full.bin"), 10)?;

        let (found, _) = collect(&[root]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "full.bin");
        Ok(())
    }

    #[test]
    fn system_directories_are_pruned() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        write_file(&root.join("system/boot.log"), 128)?;
        write_file(&root.join("proc/stat.log"), 128)?;
        write_file(&root.join("Documents/app.log"), 128)?;

        let (found, _) = collect(&[root]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "app.log");
        assert_eq!(found[0].category, JunkCategory::LogFiles);
        Ok(())
    }

    #[test]
    fn overlapping_roots_are_not_double_counted() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        write_file(&root.join("Download/leftover.bak"), 100)?;

        let (found, total) = collect(&[root, &root.join("Download")]);
        assert_eq!(found.len(), 1);
        assert_eq!(total, 100);
        Ok(())
    }

    #[test]
    fn saturated_category_stops_emitting() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        for i in 0..CategoryBucket::MAX_FILES + 10 {
            write_file(&root.join(format!("work/f{i:04}.bak")), 1)?;
        }

        let (found, total) = collect(&[root]);
        assert_eq!(found.len(), CategoryBucket::MAX_FILES);
        assert_eq!(total, CategoryBucket::MAX_FILES as u64);
        Ok(())
    }

    #[test]
    fn cancellation_stops_the_walk() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        write_file(&root.join("logs/app.log"), 10)?;

        let classifier = Classifier::new();
        let cancel = Arc::new(AtomicBool::new(true));
        let mut walker = Walker::new(&classifier, cancel);
        let mut found = Vec::new();
        walker.walk(root, &mut |f| found.push(f), &mut |_, _| {});
        assert!(found.is_empty());
        Ok(())
    }

    #[test]
    fn mixed_tree_end_to_end() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        write_file(&root.join("Download/report.pdf"), 2 * 1024 * 1024)?;
        write_file(&root.join("Android/data/com.x/cache/img1.bin"), 3 * 1024 * 1024)?;
        write_file(&root.join("DCIM/.thumbnails/thumb1.jpg"), 50 * 1024)?;
        write_file(&root.join("app_temp/old_backup.bak"), 1024 * 1024)?;

        let (found, total) = collect(&[root]);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|f| f.name != "report.pdf"));
        assert_eq!(total, 3 * 1024 * 1024 + 50 * 1024 + 1024 * 1024);
        Ok(())
    }
}
