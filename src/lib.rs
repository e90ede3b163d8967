//! Junk-file scanning and cleanup engine.
//!
//! A [`ScanSession`] walks a storage tree on a background worker, buckets
//! discoveries into five fixed categories, and streams
//! [`ScanEvent`]s to the consumer in production order, ending with
//! `Complete`. The consumer toggles per-file selection and hands the
//! buckets to [`clean_selected`] to reclaim space.

pub mod aggregator;
pub mod classifier;
pub mod cleaner;
pub mod constants;
pub mod error;
pub mod model;
pub mod session;
pub mod walker;

pub use aggregator::Aggregator;
pub use classifier::Classifier;
pub use cleaner::{CleanOutcome, clean_selected};
pub use error::ScanError;
pub use model::{CategoryBucket, JunkCategory, JunkFile, ScanEvent, ScanTotals};
pub use session::{ScanConfig, ScanHandle, ScanSession};
pub use walker::Walker;
