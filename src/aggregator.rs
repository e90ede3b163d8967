use crate::constants::REPAINT_INTERVAL;
use crate::model::{CategoryBucket, JunkCategory, JunkFile, ScanTotals};
use std::time::Instant;
use tracing::debug;

/// Collects classified files into per-category buckets and tracks the live
/// running counters used for progress display. The walker pre-filters on
/// capacity too, but the cap is enforced authoritatively here.
pub struct Aggregator {
    buckets: Vec<CategoryBucket>,
    running_bytes: u64,
    files_seen: u64,
    last_repaint: Option<Instant>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            buckets: JunkCategory::ALL.iter().map(|c| CategoryBucket::new(*c)).collect(),
            running_bytes: 0,
            files_seen: 0,
            last_repaint: None,
        }
    }

    fn bucket_mut(&mut self, category: JunkCategory) -> &mut CategoryBucket {
        self.buckets
            .iter_mut()
            .find(|b| b.category == category)
            .unwrap_or_else(|| unreachable!("a bucket exists for every category"))
    }

    /// Records one discovered file. Returns whether it was retained; past
    /// the category cap the file is dropped and only counted.
    pub fn record_file(&mut self, file: JunkFile) -> bool {
        self.files_seen += 1;
        let size = file.size;
        let category = file.category;
        let retained = self.bucket_mut(category).push(file);
        if retained {
            self.running_bytes += size;
        } else {
            debug!(category = category.name(), "bucket full, dropping match");
        }
        retained
    }

    /// Live counter for progress display. May lag the authoritative total
    /// and is never used for the final report.
    pub fn running_bytes(&self) -> u64 {
        self.running_bytes
    }

    pub fn files_seen(&self) -> u64 {
        self.files_seen
    }

    /// Rate-limits repaint signals. Ingestion is never throttled, only the
    /// decision to tell the consumer to redraw.
    pub fn should_repaint(&mut self) -> bool {
        match self.last_repaint {
            Some(last) if last.elapsed() < REPAINT_INTERVAL => false,
            _ => {
                self.last_repaint = Some(Instant::now());
                true
            }
        }
    }

    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    pub fn buckets_mut(&mut self) -> &mut [CategoryBucket] {
        &mut self.buckets
    }

    pub fn snapshot(&self) -> Vec<CategoryBucket> {
        self.buckets.clone()
    }

    /// Authoritative totals, recomputed from bucket contents.
    pub fn final_totals(&self) -> ScanTotals {
        ScanTotals::from_buckets(&self.buckets)
    }
}
