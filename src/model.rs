use humansize::{BINARY, format_size};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JunkCategory {
    AppCache,
    ApkFiles,
    LogFiles,
    TempFiles,
    Other,
}

impl JunkCategory {
    pub const ALL: [Self; 5] = [
        Self::AppCache,
        Self::ApkFiles,
        Self::LogFiles,
        Self::TempFiles,
        Self::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AppCache => "App Cache",
            Self::ApkFiles => "Apk Files",
            Self::LogFiles => "Log Files",
            Self::TempFiles => "Temp Files",
            Self::Other => "Other",
        }
    }
}

/// One junk file discovered during a scan. `selected` starts true so a
/// freshly completed scan is ready to clean in full.
#[derive(Debug, Clone)]
pub struct JunkFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub category: JunkCategory,
    pub selected: bool,
}

impl JunkFile {
    pub fn new(path: PathBuf, size: u64, category: JunkCategory) -> Self {
        let name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Self {
            name,
            path,
            size,
            category,
            selected: true,
        }
    }

    pub fn display_size(&self) -> String {
        format_size(self.size, BINARY)
    }
}

/// Ordered collection of discovered files for one category. Insertion order
/// is discovery order. Once `MAX_FILES` is reached, further matches are
/// dropped and only counted.
#[derive(Debug, Clone)]
pub struct CategoryBucket {
    pub category: JunkCategory,
    pub files: Vec<JunkFile>,
    pub all_selected: bool,
    dropped: u64,
}

impl CategoryBucket {
    pub const MAX_FILES: usize = 500;

    pub fn new(category: JunkCategory) -> Self {
        Self {
            category,
            files: Vec::new(),
            all_selected: false,
            dropped: 0,
        }
    }

    /// Appends a file if the bucket has capacity. Returns whether the file
    /// was retained; past the cap it is only counted as dropped.
    pub fn push(&mut self, file: JunkFile) -> bool {
        if self.files.len() >= Self::MAX_FILES {
            self.dropped += 1;
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn has_capacity(&self) -> bool {
        self.files.len() < Self::MAX_FILES
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn selected_size(&self) -> u64 {
        self.files.iter().filter(|f| f.selected).map(|f| f.size).sum()
    }

    pub fn display_total_size(&self) -> String {
        format_size(self.total_size(), BINARY)
    }

    /// Recomputes the bucket-level flag: true iff non-empty and every file
    /// is selected. Must be called explicitly after toggling files.
    pub fn update_selection_state(&mut self) {
        self.all_selected = !self.files.is_empty() && self.files.iter().all(|f| f.selected);
    }

    pub fn file_count_label(&self) -> String {
        if self.files.len() >= Self::MAX_FILES {
            format!("{}+ files", self.files.len())
        } else {
            format!("{} files", self.files.len())
        }
    }
}

/// Authoritative totals, recomputed from bucket contents. The live counter
/// streamed during the scan is a display approximation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanTotals {
    pub bytes: u64,
    pub files: u64,
}

impl ScanTotals {
    pub fn from_buckets(buckets: &[CategoryBucket]) -> Self {
        Self {
            bytes: buckets.iter().map(CategoryBucket::total_size).sum(),
            files: buckets.iter().map(|b| b.files.len() as u64).sum(),
        }
    }
}

/// Events delivered in production order; `Complete` is always last.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    Progress { path: PathBuf, scanned_bytes: u64 },
    FileFound(JunkFile),
    Complete(Vec<CategoryBucket>),
}
