use std::time::Duration;

/// Known vendor/SDK cache locations and download artifacts. Matching any of
/// these marks a path as junk before the per-file rules run.
pub const VENDOR_JUNK_PATTERNS: &[&str] = &[
    r"(?i).*[/\\]crashlytics([/\\]|$).*",
    r"(?i).*[/\\]firebase([/\\]|$).*",
    r"(?i).*[/\\]bugly([/\\]|$).*",
    r"(?i).*[/\\]umeng([/\\]|$).*",
    r"(?i).*[/\\]backup([/\\]|$).*",
    r"(?i).*[/\\]downloads?([/\\]|$).*\.part$",
    r"(?i).*[/\\]downloads?([/\\]|$).*\.crdownload$",
    r"(?i).*[/\\]downloads?([/\\]|$).*\.tmp$",
    r"(?i).*[/\\]webview([/\\]|$).*",
    r"(?i).*[/\\]webviewcache([/\\]|$).*",
    r"(?i).*[/\\]okhttp([/\\]|$).*",
    r"(?i).*[/\\]fresco([/\\]|$).*",
    r"(?i).*[/\\]glide([/\\]|$).*",
    r"(?i).*[/\\]picasso([/\\]|$).*",
    r"(?i).*[/\\]imageloader([/\\]|$).*",
    r"(?i).*[/\\]adcache([/\\]|$).*",
    r"(?i).*[/\\]adview([/\\]|$).*",
    r"(?i).*[/\\]facebook([/\\]|$).*\.tmp$",
    r"(?i).*[/\\]instagram([/\\]|$).*\.cache$",
    r"(?i).*[/\\]twitter([/\\]|$).*\.log$",
    r"(?i).*[/\\]tiktok([/\\]|$).*\.temp$",
    r"(?i).*[/\\]youtube([/\\]|$).*\.cache$",
    r"(?i).*[/\\]whatsapp([/\\]|$).*\.bak$",
    r"(?i).*[/\\]wechat([/\\]|$).*\.tmp$",
    r"(?i).*[/\\]qq([/\\]|$).*\.log$",
    r"(?i).*[/\\]sina([/\\]|$).*\.cache$",
    r"(?i).*[/\\]baidu([/\\]|$).*\.temp$",
    r"(?i).*[/\\]360([/\\]|$).*\.bak$",
    r"(?i).*[/\\]tencent([/\\]|$).*\.tmp$",
    r"(?i).*[/\\]alibaba([/\\]|$).*\.log$",
    r"(?i).*[/\\]xiaomi([/\\]|$).*\.cache$",
];

/// Extensions (lowercase, no leading dot) that mark a file as temp junk.
pub const JUNK_EXTENSIONS: &[&str] = &[
    "tmp", "temp", "log", "cache", "bak", "old", "swp", "dmp", "chk", "gid",
    "dir", "wbk", "xlk", "part", "crdownload", "download", "partial",
    "crash", "dumpfile", "trace", "err", "out", "pid", "lock", "~", "~tmp",
];

/// Bare directory names treated as junk directories wholesale.
pub const CACHE_DIR_NAMES: &[&str] = &[
    "cache",
    "tmp",
    "temp",
    "thumbnail",
    "thumbnails",
    "lost+found",
    "backup",
];

/// Directory names never descended into.
pub const SYSTEM_DIR_NAMES: &[&str] = &["system", "proc", "dev", "sys", "root"];

/// Absolute prefixes never descended into.
pub const SYSTEM_PATH_PREFIXES: &[&str] = &["/system", "/proc", "/dev"];

/// Well-known junk-prone subdirectories, joined to the storage root.
pub const COMMON_SCAN_DIRS: &[&str] = &[
    "Download",
    "Downloads",
    "DCIM/.thumbnails",
    "Pictures/.thumbnails",
    "Android/data",
    "Android/obb",
    "tencent",
    "sina",
    "baidu",
    "360",
    "UCDownloads",
    "QQBrowser",
    "temp",
    "cache",
    "log",
    "backup",
    "crashlytics",
    "firebase",
];

/// An APK below this size, or one sitting in a download/temp location, is
/// treated as a leftover installer. Larger APKs elsewhere are kept.
pub const APK_SIZE_THRESHOLD: u64 = 1024 * 1024;

/// Hidden files below this size fall into the Other bucket.
pub const HIDDEN_FILE_THRESHOLD: u64 = 1024 * 1024;

/// The walker yields to the scheduler after each slice of scanned bytes.
pub const YIELD_INTERVAL_BYTES: u64 = 10 * 1024 * 1024;

/// Minimum wall-clock gap between repaint (progress) events.
pub const REPAINT_INTERVAL: Duration = Duration::from_millis(200);

/// Pause before walking starts, so a consumer can render its loading state.
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(500);
