//! Named default values shared by the config structs.

/// An API is "broadly shipped" when at least this many of the browsers
/// active at a snapshot expose it.
pub const DEFAULT_BROADLY_SHIPPED_THRESHOLD: usize = 3;

/// Lookahead window, in calendar years, for the aggressive-removal
/// cross-browser comparison.
pub const DEFAULT_REMOVAL_WINDOW_YEARS: i32 = 1;

/// Default location of the release-history reference table.
pub const DEFAULT_HISTORY_PATH: &str = "data/browser_history.json";

/// Default database file.
pub const DEFAULT_DB_PATH: &str = "confluence.db";

/// Default number of read connections.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
