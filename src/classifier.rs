use crate::constants::{
    APK_SIZE_THRESHOLD, CACHE_DIR_NAMES, HIDDEN_FILE_THRESHOLD, JUNK_EXTENSIONS,
    SYSTEM_DIR_NAMES, SYSTEM_PATH_PREFIXES, VENDOR_JUNK_PATTERNS,
};
use crate::model::JunkCategory;
use regex::Regex;
use std::path::Path;

/// Pure classification rules. Holds only the compiled vendor patterns;
/// classification is a function of path, name, extension and size.
pub struct Classifier {
    patterns: Vec<Regex>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        let patterns = VENDOR_JUNK_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("vendor pattern table must compile"))
            .collect();
        Self { patterns }
    }

    fn matches_vendor_pattern(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    /// Buckets a file, or returns `None` when it is not junk. Rule order is
    /// significant: the vendor gate preempts everything, and the APK size
    /// heuristic must run before the generic extension rules so a large
    /// legitimate installer is never swept up by coincidence.
    pub fn classify(&self, path: &Path, size: u64) -> Option<JunkCategory> {
        let path_str = path.to_string_lossy().to_lowercase();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        // Vendor/SDK gate. The match is path-based, so re-derive a semantic
        // bucket from cheap keyword tests rather than the pattern's intent.
        if self.matches_vendor_pattern(&path_str) {
            let category = if path_str.contains("log") || ext == "log" {
                JunkCategory::LogFiles
            } else if path_str.contains("cache") {
                JunkCategory::AppCache
            } else if path_str.contains("temp") || path_str.contains("tmp") {
                JunkCategory::TempFiles
            } else if ext == "apk" {
                JunkCategory::ApkFiles
            } else {
                JunkCategory::Other
            };
            return Some(category);
        }

        if ext == "apk" {
            let leftover = size < APK_SIZE_THRESHOLD
                || path_str.contains("download")
                || path_str.contains("temp");
            return leftover.then_some(JunkCategory::ApkFiles);
        }

        if ext == "log"
            || name.contains("log")
            || name.ends_with(".out")
            || name.ends_with(".err")
            || ext == "crash"
            || ext == "trace"
        {
            return Some(JunkCategory::LogFiles);
        }

        if JUNK_EXTENSIONS.contains(&ext.as_str())
            || name.starts_with("tmp")
            || name.starts_with("temp")
            || name.contains("backup")
            || name.contains('~')
        {
            return Some(JunkCategory::TempFiles);
        }

        if path_str.contains("/cache/")
            || path_str.contains("/.cache/")
            || name.contains("cache")
            || path_str.contains("thumbnail")
            || path_str.contains(".thumbnails")
        {
            return Some(JunkCategory::AppCache);
        }

        if size == 0 {
            return Some(JunkCategory::Other);
        }

        // Heuristic duplicate-download detection.
        if name.contains("(1)") || name.contains("copy") || name.contains("duplicate") {
            return Some(JunkCategory::Other);
        }

        if name.starts_with('.') && size < HIDDEN_FILE_THRESHOLD {
            return Some(JunkCategory::Other);
        }

        None
    }

    /// Whether every file beneath this directory should be treated as junk
    /// without per-file classification.
    pub fn is_junk_dir(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        if self.matches_vendor_pattern(&path_str) {
            return true;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        CACHE_DIR_NAMES.iter().any(|c| name.contains(c))
            || path_str.contains("/cache/")
            || path_str.contains("/.cache/")
    }
}

/// Directories the walker must never descend into.
pub fn is_system_dir(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    SYSTEM_DIR_NAMES.contains(&name.as_str())
        || SYSTEM_PATH_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn classify(path: &str, size: u64) -> Option<JunkCategory> {
        Classifier::new().classify(&PathBuf::from(path), size)
    }

    #[test]
    fn vendor_patterns_always_produce_a_category() {
        let classifier = Classifier::new();
        let hits = [
            "/sdcard/Android/data/app/crashlytics/report.bin",
            "/sdcard/FIREBASE/events.db",
            "/sdcard/Download/setup.part",
            "/sdcard/app/glide/image.0",
            "/sdcard/tencent/msg.tmp",
            "/sdcard/twitter/session.log",
        ];
        for path in hits {
            assert!(
                classifier.classify(&PathBuf::from(path), 4096).is_some(),
                "expected {path} to classify as junk"
            );
        }
    }

    #[test]
    fn vendor_gate_subclassifies_by_keyword() {
        assert_eq!(
            classify("/sdcard/twitter/session.log", 10),
            Some(JunkCategory::LogFiles)
        );
        assert_eq!(
            classify("/sdcard/webviewcache/blob.bin", 10),
            Some(JunkCategory::AppCache)
        );
        assert_eq!(
            classify("/sdcard/tiktok/frame.temp", 10),
            Some(JunkCategory::TempFiles)
        );
        assert_eq!(
            classify("/sdcard/crashlytics/native.bin", 10),
            Some(JunkCategory::Other)
        );
    }

    #[test]
    fn large_apk_outside_download_is_kept() {
        assert_eq!(classify("/sdcard/Installers/office.apk", 50 * 1024 * 1024), None);
    }

    #[test]
    fn small_apk_is_junk_anywhere() {
        assert_eq!(
            classify("/sdcard/Documents/stub.apk", 512 * 1024),
            Some(JunkCategory::ApkFiles)
        );
    }

    #[test]
    fn large_apk_in_download_is_junk() {
        assert_eq!(
            classify("/sdcard/Download/game.apk", 200 * 1024 * 1024),
            Some(JunkCategory::ApkFiles)
        );
    }

    #[test]
    fn log_rules() {
        assert_eq!(classify("/sdcard/app/run.log", 10), Some(JunkCategory::LogFiles));
        assert_eq!(classify("/sdcard/app/stderr.err", 10), Some(JunkCategory::LogFiles));
        assert_eq!(classify("/sdcard/app/native.crash", 10), Some(JunkCategory::LogFiles));
    }

    #[test]
    fn temp_rules() {
        assert_eq!(classify("/sdcard/doc.bak", 10), Some(JunkCategory::TempFiles));
        assert_eq!(classify("/sdcard/tmp_upload.bin", 10), Some(JunkCategory::TempFiles));
        assert_eq!(classify("/sdcard/notes~", 10), Some(JunkCategory::TempFiles));
        assert_eq!(classify("/sdcard/save.old", 10), Some(JunkCategory::TempFiles));
    }

    #[test]
    fn cache_rules() {
        assert_eq!(
            classify("/data/app/.cache/chunk.bin", 10),
            Some(JunkCategory::AppCache)
        );
        assert_eq!(
            classify("/sdcard/DCIM/.thumbnails/img.jpg", 10),
            Some(JunkCategory::AppCache)
        );
    }

    #[test]
    fn other_rules() {
        assert_eq!(classify("/sdcard/empty.txt", 0), Some(JunkCategory::Other));
        assert_eq!(classify("/sdcard/photo (1).jpg", 10), Some(JunkCategory::Other));
        assert_eq!(classify("/sdcard/.nomedia_extra", 10), Some(JunkCategory::Other));
        assert_eq!(classify("/sdcard/.bigblob", 2 * 1024 * 1024), None);
    }

    #[test]
    fn ordinary_files_are_not_junk() {
        assert_eq!(classify("/sdcard/Download/report.pdf", 2 * 1024 * 1024), None);
        assert_eq!(classify("/sdcard/Music/track.mp3", 5 * 1024 * 1024), None);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("/sdcard/App/RUN.LOG", 10), Some(JunkCategory::LogFiles));
        assert_eq!(
            classify("/sdcard/CRASHLYTICS/data.bin", 10),
            Some(JunkCategory::Other)
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let classifier = Classifier::new();
        let path = PathBuf::from("/sdcard/Download/setup.apk");
        let first = classifier.classify(&path, 100);
        for _ in 0..5 {
            assert_eq!(classifier.classify(&path, 100), first);
        }
    }

    #[test]
    fn junk_dir_predicate() {
        let classifier = Classifier::new();
        assert!(classifier.is_junk_dir(&PathBuf::from("/sdcard/app/cache")));
        assert!(classifier.is_junk_dir(&PathBuf::from("/sdcard/DCIM/.thumbnails")));
        assert!(classifier.is_junk_dir(&PathBuf::from("/sdcard/app_temp")));
        assert!(classifier.is_junk_dir(&PathBuf::from("/sdcard/okhttp")));
        assert!(!classifier.is_junk_dir(&PathBuf::from("/sdcard/Download")));
        assert!(!classifier.is_junk_dir(&PathBuf::from("/sdcard/Music")));
    }

    #[test]
    fn system_dir_predicate() {
        assert!(is_system_dir(&PathBuf::from("/system")));
        assert!(is_system_dir(&PathBuf::from("/proc/self")));
        assert!(is_system_dir(&PathBuf::from("/some/tree/proc")));
        assert!(!is_system_dir(&PathBuf::from("/sdcard/Download")));
    }
}
