//! # Shared Constants

/// Maximum number of rows returned by a candidate listing.
pub const LIST_PAGE_SIZE: u32 = 50;

/// Maximum number of items one bulk run attempts.
pub const BULK_BATCH_SIZE: u32 = 10;

/// The default path for the content database.
pub const DEFAULT_DB_FILE: &str = "db/autoseo.db";
