use crate::aggregator::Aggregator;
use crate::classifier::Classifier;
use crate::constants::{COMMON_SCAN_DIRS, DEFAULT_STARTUP_DELAY};
use crate::error::ScanError;
use crate::model::{CategoryBucket, JunkFile, ScanEvent};
use crate::walker::Walker;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the shared storage to sweep. Defaults to the home directory.
    pub storage_root: Option<PathBuf>,
    /// App-private cache directories scanned in addition to the root.
    pub app_cache_dirs: Vec<PathBuf>,
    /// Pause before walking starts so the consumer can render first.
    pub startup_delay: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            storage_root: None,
            app_cache_dirs: Vec::new(),
            startup_delay: DEFAULT_STARTUP_DELAY,
        }
    }
}

/// Handle to a running scan. Events arrive in production order on the
/// receiver, ending with `ScanEvent::Complete`; the aggregator can also be
/// snapshotted at any point mid-scan. Dropping the handle cancels the scan,
/// which stops further event emission (in-flight directory work may still
/// finish).
pub struct ScanHandle {
    events: mpsc::Receiver<ScanEvent>,
    aggregator: Arc<Mutex<Aggregator>>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ScanHandle {
    pub fn events(&self) -> &mpsc::Receiver<ScanEvent> {
        &self.events
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Current per-category buckets, readable while the scan runs.
    pub fn snapshot(&self) -> Vec<CategoryBucket> {
        lock(&self.aggregator).snapshot()
    }

    /// Blocks until the background worker finishes.
    pub fn join(mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for ScanHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(aggregator: &Arc<Mutex<Aggregator>>) -> MutexGuard<'_, Aggregator> {
    aggregator.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Orchestrates one scan: enumerates roots, drives the walker over each in
/// order on a single background worker, and streams events to the caller.
pub struct ScanSession {
    config: ScanConfig,
}

impl ScanSession {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// The deduplicated list of existing scan roots: storage root first,
    /// then app cache directories, then the well-known junk-prone
    /// subdirectories of the root.
    pub fn scan_roots(&self) -> Result<Vec<PathBuf>, ScanError> {
        let root = self
            .config
            .storage_root
            .clone()
            .or_else(dirs::home_dir)
            .ok_or(ScanError::NoStorageRoot)?;

        // Absence of read access at session start is terminal, unlike
        // per-entry failures discovered mid-walk.
        if fs::read_dir(&root).is_err() {
            return Err(ScanError::StorageUnavailable(root));
        }

        let mut candidates = vec![root.clone()];
        candidates.extend(self.config.app_cache_dirs.iter().cloned());
        candidates.extend(COMMON_SCAN_DIRS.iter().map(|d| root.join(d)));

        let mut seen = HashSet::new();
        let roots: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .filter(|p| p.is_dir())
            .collect();
        Ok(roots)
    }

    /// Starts the scan on a background worker. Fails up front when no
    /// readable storage root is available.
    pub fn start(self) -> Result<ScanHandle, ScanError> {
        let roots = self.scan_roots()?;
        let (tx, rx) = mpsc::channel();
        let aggregator = Arc::new(Mutex::new(Aggregator::new()));
        let cancel = Arc::new(AtomicBool::new(false));

        let worker_aggregator = Arc::clone(&aggregator);
        let worker_cancel = Arc::clone(&cancel);
        let startup_delay = self.config.startup_delay;
        let worker =
            thread::spawn(move || run_scan(&roots, startup_delay, &worker_aggregator, &worker_cancel, &tx));

        Ok(ScanHandle {
            events: rx,
            aggregator,
            cancel,
            worker: Some(worker),
        })
    }
}

fn run_scan(
    roots: &[PathBuf],
    startup_delay: Duration,
    aggregator: &Arc<Mutex<Aggregator>>,
    cancel: &Arc<AtomicBool>,
    tx: &mpsc::Sender<ScanEvent>,
) {
    if !startup_delay.is_zero() {
        thread::sleep(startup_delay);
    }

    info!(roots = roots.len(), "scan started");
    let classifier = Classifier::new();
    let mut walker = Walker::new(&classifier, Arc::clone(cancel));

    for root in roots {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        debug!(root = %root.display(), "walking root");

        let mut on_file = |file: JunkFile| {
            let retained = lock(aggregator).record_file(file.clone());
            if retained && !cancel.load(Ordering::Relaxed) {
                let _ = tx.send(ScanEvent::FileFound(file));
            }
        };
        let mut on_progress = |path: &Path, scanned_bytes: u64| {
            let repaint = lock(aggregator).should_repaint();
            if repaint && !cancel.load(Ordering::Relaxed) {
                let _ = tx.send(ScanEvent::Progress {
                    path: path.to_path_buf(),
                    scanned_bytes,
                });
            }
        };
        walker.walk(root, &mut on_file, &mut on_progress);
    }

    let guard = lock(aggregator);
    let snapshot = guard.snapshot();
    let totals = guard.final_totals();
    drop(guard);

    if cancel.load(Ordering::Relaxed) {
        warn!("scan cancelled, suppressing completion event");
        return;
    }
    info!(files = totals.files, bytes = totals.bytes, "scan complete");
    let _ = tx.send(ScanEvent::Complete(snapshot));
}
