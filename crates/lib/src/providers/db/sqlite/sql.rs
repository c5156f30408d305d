//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL strings for the SQLite content store. The
//! layout follows the host CMS: items live in `posts`, and every per-item
//! field the pipeline writes is a key/value row in `postmeta`.

pub const CREATE_POSTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY,
        post_type TEXT NOT NULL DEFAULT 'post',
        post_status TEXT NOT NULL DEFAULT 'publish',
        post_title TEXT NOT NULL DEFAULT '',
        post_date TEXT NOT NULL DEFAULT '',
        permalink TEXT NOT NULL DEFAULT '',
        post_mime_type TEXT NOT NULL DEFAULT '',
        guid TEXT NOT NULL DEFAULT ''
    );
";

pub const CREATE_POSTMETA_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS postmeta (
        meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL,
        meta_key TEXT NOT NULL,
        meta_value TEXT
    );
";

pub const CREATE_POSTMETA_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_postmeta_post_key ON postmeta (post_id, meta_key);";

pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_POSTS_TABLE,
    CREATE_POSTMETA_TABLE,
    CREATE_POSTMETA_INDEX,
];

const ITEM_COLUMNS: &str = "id, post_type, post_status, post_title, permalink, post_mime_type, guid";

/// Fetches one item by id. Expects `?1` = id.
pub fn select_item() -> String {
    format!("SELECT {ITEM_COLUMNS} FROM posts WHERE id = ?1;")
}

/// Lists items filtered by type (`?1`), status (`?2`) and a MIME `LIKE`
/// pattern (`?3`), newest first.
pub fn select_items(limit: u32) -> String {
    format!(
        "
        SELECT {ITEM_COLUMNS}
        FROM posts
        WHERE post_type = ?1 AND post_status = ?2 AND post_mime_type LIKE ?3
        ORDER BY post_date DESC, id DESC
        LIMIT {limit};
    "
    )
}

/// Same filter as [`select_items`], without the limit.
pub const COUNT_ITEMS: &str =
    "SELECT COUNT(*) FROM posts WHERE post_type = ?1 AND post_status = ?2 AND post_mime_type LIKE ?3;";

pub const SELECT_PUBLISHED_POST_TYPES: &str =
    "SELECT DISTINCT post_type FROM posts WHERE post_status = 'publish' ORDER BY post_type;";

/// Expects `?1` = post id, `?2` = meta key.
pub const SELECT_META: &str =
    "SELECT meta_value FROM postmeta WHERE post_id = ?1 AND meta_key = ?2 ORDER BY meta_id DESC LIMIT 1;";

pub const DELETE_META: &str = "DELETE FROM postmeta WHERE post_id = ?1 AND meta_key = ?2;";

pub const INSERT_META: &str =
    "INSERT INTO postmeta (post_id, meta_key, meta_value) VALUES (?1, ?2, ?3);";

/// Inserts an item with an explicit id. Used to seed a store.
pub const INSERT_ITEM: &str = "
    INSERT INTO posts (id, post_type, post_status, post_title, post_date, permalink, post_mime_type, guid)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);
";
