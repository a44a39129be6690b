// src/config/consts.rs

// Source
pub const STATUS_URL: &str = "https://www.skigeilo.no/webkamera-og-vaer";
pub const CORS_PROXY: &str = "https://api.allorigins.win/raw?url=";
pub const LIST_ITEM_SELECTOR: &str = ".list-group-item";

// Net config
pub const USER_AGENT: &str = concat!("slope_status/", env!("CARGO_PKG_VERSION"));
pub const FETCH_TIMEOUT_MS: u64 = 15_000;

// Status words, compared after trim + lowercase
pub const OPEN_WORDS: [&str; 2] = ["åpen", "open"];

// Local store (logs only; status is never persisted)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "status";

// Watch mode
pub const MIN_WATCH_SECS: u64 = 30; // be polite
