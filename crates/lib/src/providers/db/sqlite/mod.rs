use crate::{
    errors::SeoError,
    providers::db::storage::{ContentStore, ItemQuery, ATTACHMENT_POST_TYPE},
    types::ContentItem,
};
use async_trait::async_trait;
use std::fmt::{self, Debug};
use tracing::debug;
use turso::{params, Connection, Database, Row, Value as TursoValue};

mod sql;

pub use sql::ALL_TABLE_CREATION_SQL;

/// A content store backed by a local SQLite database using Turso.
///
/// When cloned, it shares the same underlying database, so an in-memory
/// instance can be handed to several owners (e.g. the server and a test).
#[derive(Clone)]
pub struct SqliteContentStore {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteContentStore {
    /// Opens a store at `db_path`. Use ":memory:" for an isolated in-memory
    /// database.
    pub async fn new(db_path: &str) -> Result<Self, SeoError> {
        let db = turso::Builder::new_local(db_path).build().await?;
        Ok(Self { db })
    }

    /// Ensures that the `posts` and `postmeta` tables exist.
    /// This function is idempotent and safe to call on every application startup.
    pub async fn initialize_schema(&self) -> Result<(), SeoError> {
        let conn = self.db.connect()?;
        for statement in ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ()).await?;
        }
        Ok(())
    }

    /// Inserts an item with a fixed id. `post_date` orders listings, newest
    /// first, and is compared as text.
    pub async fn insert_item(&self, item: &ContentItem, post_date: &str) -> Result<(), SeoError> {
        let conn = self.db.connect()?;
        conn.execute(
            sql::INSERT_ITEM,
            params![
                item.id,
                item.post_type.as_str(),
                item.status.as_str(),
                item.title.as_str(),
                post_date,
                item.permalink.as_str(),
                item.mime_type.as_deref().unwrap_or_default(),
                item.attachment_url.as_deref().unwrap_or_default()
            ],
        )
        .await?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection, SeoError> {
        Ok(self.db.connect()?)
    }
}

impl Debug for SqliteContentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteContentStore").finish_non_exhaustive()
    }
}

/// Reads a column as text; NULL becomes an empty string.
fn text_at(row: &Row, index: usize) -> Result<String, SeoError> {
    Ok(match row.get_value(index)? {
        TursoValue::Text(s) => s,
        TursoValue::Integer(i) => i.to_string(),
        TursoValue::Real(f) => f.to_string(),
        TursoValue::Null | TursoValue::Blob(_) => String::new(),
    })
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Maps a row selected with the item column list to a `ContentItem`.
fn row_to_item(row: &Row) -> Result<ContentItem, SeoError> {
    let id = match row.get_value(0)? {
        TursoValue::Integer(i) => i,
        other => {
            debug!("Unexpected id column value: {other:?}");
            0
        }
    };
    let post_type = text_at(row, 1)?;
    let guid = text_at(row, 6)?;
    let attachment_url = if post_type == ATTACHMENT_POST_TYPE {
        non_empty(guid)
    } else {
        None
    };
    Ok(ContentItem {
        id,
        post_type,
        status: text_at(row, 2)?,
        title: text_at(row, 3)?,
        permalink: text_at(row, 4)?,
        mime_type: non_empty(text_at(row, 5)?),
        attachment_url,
    })
}

fn mime_pattern(query: &ItemQuery) -> String {
    match &query.mime_prefix {
        Some(prefix) => format!("{prefix}%"),
        None => "%".to_string(),
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    fn name(&self) -> &str {
        "SQLite"
    }

    async fn get_item(&self, id: i64) -> Result<Option<ContentItem>, SeoError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql::select_item()).await?;
        let mut rows = stmt.query(params![id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_item(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<ContentItem>, SeoError> {
        debug!(?query, "--> Listing items");
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql::select_items(query.limit)).await?;
        let mut rows = stmt
            .query(params![
                query.post_type.as_str(),
                query.status.as_str(),
                mime_pattern(query)
            ])
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    async fn count_items(&self, query: &ItemQuery) -> Result<u64, SeoError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql::COUNT_ITEMS).await?;
        let mut rows = stmt
            .query(params![
                query.post_type.as_str(),
                query.status.as_str(),
                mime_pattern(query)
            ])
            .await?;
        match rows.next().await? {
            Some(row) => match row.get_value(0)? {
                TursoValue::Integer(n) => Ok(u64::try_from(n).unwrap_or_default()),
                _ => Ok(0),
            },
            None => Ok(0),
        }
    }

    async fn list_post_types(&self) -> Result<Vec<String>, SeoError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql::SELECT_PUBLISHED_POST_TYPES).await?;
        let mut rows = stmt.query(()).await?;
        let mut post_types = Vec::new();
        while let Some(row) = rows.next().await? {
            post_types.push(text_at(&row, 0)?);
        }
        Ok(post_types)
    }

    async fn get_meta(&self, item_id: i64, meta_key: &str) -> Result<Option<String>, SeoError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql::SELECT_META).await?;
        let mut rows = stmt.query(params![item_id, meta_key]).await?;
        match rows.next().await? {
            Some(row) => Ok(match row.get_value(0)? {
                TursoValue::Text(s) => Some(s),
                _ => None,
            }),
            None => Ok(None),
        }
    }

    async fn set_meta(&self, item_id: i64, meta_key: &str, value: &str) -> Result<(), SeoError> {
        debug!(item_id, meta_key, "--> Writing metadata");
        let write_error = |source| SeoError::MetaWrite {
            item_id,
            meta_key: meta_key.to_string(),
            source,
        };
        let conn = self.connect()?;
        conn.execute(sql::DELETE_META, params![item_id, meta_key])
            .await
            .map_err(write_error)?;
        conn.execute(sql::INSERT_META, params![item_id, meta_key, value])
            .await
            .map_err(write_error)?;
        Ok(())
    }
}
