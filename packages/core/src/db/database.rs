//! Database Connection Management
//!
//! This module provides the database connection, schema initialization and
//! raw SQL operations for the node forest using libsql.
//!
//! # Schema
//!
//! - `nodes`: forest rows, `parent_id` self-reference, tombstone flag
//! - `node_translations`: one localized binding per (node, lang), enforced by
//!   a unique index
//! - `node_versions`: snapshots linked from `node_translations.public_node_version_id`
//!
//! # Connection pattern
//!
//! Always use `connect_with_timeout()` in async functions. Every call opens a
//! fresh connection with a busy timeout, so concurrent requests wait on the
//! SQLite lock instead of failing with `SQLITE_BUSY`.
//!
//! The `db_*` methods hold the SQL; `TursoStore` turns their rows into models.
//! Methods taking a `&libsql::Connection` run on a caller-owned connection so
//! they can take part in a transaction.

use crate::db::error::DatabaseError;
use chrono::Utc;
use libsql::{Builder, Connection, Database};
use std::path::PathBuf;
use std::sync::Arc;

/// Columns selected for node rows, in `row_to_node` order
pub const NODE_COLUMNS: &str =
    "n.id, n.parent_id, n.deleted, n.sequence_number, n.hidden_from_nav, n.ref_entity_name, n.content_kind";

/// Columns selected for translation rows, in `row_to_translation` order
pub const TRANSLATION_COLUMNS: &str =
    "t.id, t.node_id, t.lang, t.slug, t.url, t.online, t.title, t.weight, t.public_node_version_id";

/// Columns selected for version rows, in `row_to_version` order
pub const VERSION_COLUMNS: &str =
    "v.id, v.node_translation_id, v.owner, v.ref_id, v.ref_entity_name, v.version_type, v.origin_id, v.created, v.updated";

/// Busy timeout applied to every connection, in milliseconds
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Database service for managing the libsql connection and schema
///
/// # Examples
///
/// ```no_run
/// use nodetree_core::db::DatabaseService;
/// use std::path::PathBuf;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let db = DatabaseService::new(PathBuf::from("./data/nodetree.db")).await?;
///     let conn = db.connect_with_timeout().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseService {
    /// libsql database handle (shared)
    pub db: Arc<Database>,

    /// Path to the database file
    pub db_path: PathBuf,
}

/// Parameters for node insertion
pub struct DbCreateNodeParams<'a> {
    pub parent_id: Option<i64>,
    pub sequence_number: Option<i64>,
    pub hidden_from_nav: bool,
    pub ref_entity_name: &'a str,
    pub content_kind: &'a str,
}

/// Parameters for translation insertion
pub struct DbCreateTranslationParams<'a> {
    pub node_id: i64,
    pub lang: &'a str,
    pub slug: Option<&'a str>,
    pub url: Option<&'a str>,
    pub online: bool,
    pub title: &'a str,
    pub weight: i64,
}

/// Parameters for version insertion
pub struct DbCreateVersionParams<'a> {
    pub node_translation_id: i64,
    pub owner: &'a str,
    pub ref_id: i64,
    pub ref_entity_name: &'a str,
    pub version_type: &'a str,
    pub origin_id: Option<i64>,
}

fn flag(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

impl DatabaseService {
    /// Open (or create) the database at `db_path` and initialize the schema
    ///
    /// Creates the parent directory if needed. Schema creation is idempotent,
    /// so opening an existing database is safe.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created, the file
    /// cannot be opened or the schema cannot be created.
    pub async fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::PermissionDenied {
                        DatabaseError::permission_denied(db_path.clone())
                    } else {
                        DatabaseError::DirectoryCreationFailed(e)
                    }
                })?;
            }
        }

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| DatabaseError::connection_failed(db_path.clone(), e))?;

        let service = Self {
            db: Arc::new(db),
            db_path,
        };

        service.initialize_schema().await?;
        tracing::debug!("Opened node database at {}", service.db_path.display());

        Ok(service)
    }

    /// Execute a PRAGMA statement
    ///
    /// PRAGMA statements return rows, so they go through `query()`.
    async fn execute_pragma(&self, conn: &Connection, pragma: &str) -> Result<(), DatabaseError> {
        let mut stmt = conn.prepare(pragma).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    async fn initialize_schema(&self) -> Result<(), DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        self.execute_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await?;
        self.execute_pragma(&conn, "PRAGMA foreign_keys = ON")
            .await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS nodes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                parent_id INTEGER,
                deleted INTEGER NOT NULL DEFAULT 0,
                sequence_number INTEGER NOT NULL DEFAULT 0,
                hidden_from_nav INTEGER NOT NULL DEFAULT 0,
                ref_entity_name TEXT NOT NULL,
                content_kind TEXT NOT NULL DEFAULT 'leaf',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (parent_id) REFERENCES nodes(id)
            )",
            (),
        )
        .await
        .map_err(|e| DatabaseError::initialization_failed(format!("nodes table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS node_translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                node_id INTEGER NOT NULL,
                lang TEXT NOT NULL,
                slug TEXT,
                url TEXT,
                online INTEGER NOT NULL DEFAULT 0,
                title TEXT NOT NULL,
                weight INTEGER NOT NULL DEFAULT 0,
                public_node_version_id INTEGER,
                FOREIGN KEY (node_id) REFERENCES nodes(id),
                FOREIGN KEY (public_node_version_id) REFERENCES node_versions(id)
            )",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!("node_translations table: {}", e))
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS node_versions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                node_translation_id INTEGER NOT NULL,
                owner TEXT NOT NULL,
                ref_id INTEGER NOT NULL,
                ref_entity_name TEXT NOT NULL,
                version_type TEXT NOT NULL DEFAULT 'public',
                origin_id INTEGER,
                created TEXT NOT NULL,
                updated TEXT NOT NULL,
                FOREIGN KEY (node_translation_id) REFERENCES node_translations(id),
                FOREIGN KEY (origin_id) REFERENCES node_versions(id)
            )",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!("node_versions table: {}", e))
        })?;

        self.create_indexes(&conn).await
    }

    async fn create_indexes(&self, conn: &Connection) -> Result<(), DatabaseError> {
        let indexes = [
            (
                "idx_nodes_parent",
                "CREATE INDEX IF NOT EXISTS idx_nodes_parent ON nodes(parent_id, deleted)",
            ),
            (
                "idx_translations_node_lang",
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_translations_node_lang ON node_translations(node_id, lang)",
            ),
            (
                "idx_translations_url",
                "CREATE INDEX IF NOT EXISTS idx_translations_url ON node_translations(lang, url)",
            ),
            (
                "idx_translations_slug",
                "CREATE INDEX IF NOT EXISTS idx_translations_slug ON node_translations(slug)",
            ),
            (
                "idx_versions_ref",
                "CREATE INDEX IF NOT EXISTS idx_versions_ref ON node_versions(ref_entity_name, ref_id)",
            ),
        ];

        for (name, sql) in indexes {
            conn.execute(sql, ()).await.map_err(|e| {
                DatabaseError::initialization_failed(format!(
                    "Failed to create index '{}': {}",
                    name, e
                ))
            })?;
        }

        Ok(())
    }

    /// Open a connection without configuring it
    ///
    /// Prefer `connect_with_timeout()` in async code.
    pub fn connect(&self) -> Result<Connection, DatabaseError> {
        self.db.connect().map_err(DatabaseError::LibsqlError)
    }

    /// Open a connection with the busy timeout and foreign keys enabled
    pub async fn connect_with_timeout(&self) -> Result<Connection, DatabaseError> {
        let conn = self.connect()?;
        self.execute_pragma(&conn, &format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT_MS))
            .await?;
        self.execute_pragma(&conn, "PRAGMA foreign_keys = ON")
            .await?;
        Ok(conn)
    }

    async fn query_first(
        conn: &Connection,
        label: &str,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let mut stmt = conn.prepare(sql).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to prepare {} query: {}", label, e))
        })?;
        let mut rows = stmt.query(params).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute {} query: {}", label, e))
        })?;
        rows.next()
            .await
            .map_err(|e| DatabaseError::sql_execution(e.to_string()))
    }

    async fn query_all(
        &self,
        label: &str,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<libsql::Rows, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        let mut stmt = conn.prepare(sql).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to prepare {} query: {}", label, e))
        })?;
        stmt.query(params).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute {} query: {}", label, e))
        })
    }

    //
    // TRANSACTIONS
    //

    pub async fn begin(conn: &Connection) -> Result<(), DatabaseError> {
        conn.execute("BEGIN IMMEDIATE TRANSACTION", ())
            .await
            .map_err(|e| DatabaseError::transaction_failed(format!("begin: {}", e)))?;
        Ok(())
    }

    pub async fn commit(conn: &Connection) -> Result<(), DatabaseError> {
        if let Err(e) = conn.execute("COMMIT", ()).await {
            let _rollback = conn.execute("ROLLBACK", ()).await;
            return Err(DatabaseError::transaction_failed(format!("commit: {}", e)));
        }
        Ok(())
    }

    pub async fn rollback(conn: &Connection) {
        if let Err(e) = conn.execute("ROLLBACK", ()).await {
            tracing::warn!("Rollback failed: {}", e);
        }
    }

    //
    // NODES
    //

    /// Insert a node on `conn` and return its id
    ///
    /// Without an explicit sequence number the node gets the next free one.
    pub async fn insert_node(
        conn: &Connection,
        params: DbCreateNodeParams<'_>,
    ) -> Result<i64, DatabaseError> {
        conn.execute(
            "INSERT INTO nodes (parent_id, sequence_number, hidden_from_nav, ref_entity_name, content_kind)
             VALUES (?1, COALESCE(?2, (SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM nodes)), ?3, ?4, ?5)",
            (
                params.parent_id,
                params.sequence_number,
                flag(params.hidden_from_nav),
                params.ref_entity_name,
                params.content_kind,
            ),
        )
        .await
        .map_err(|e| DatabaseError::sql_execution(format!("Failed to insert node: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn db_create_node(&self, params: DbCreateNodeParams<'_>) -> Result<i64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::insert_node(&conn, params).await
    }

    pub async fn select_node(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        Self::query_first(
            conn,
            "get_node",
            &format!("SELECT {} FROM nodes n WHERE n.id = ?1", NODE_COLUMNS),
            [id],
        )
        .await
    }

    pub async fn db_get_node(&self, id: i64) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::select_node(&conn, id).await
    }

    /// Non-tombstoned nodes without a parent
    pub async fn db_get_top_nodes(&self) -> Result<libsql::Rows, DatabaseError> {
        self.query_all(
            "get_top_nodes",
            &format!(
                "SELECT {} FROM nodes n WHERE n.parent_id IS NULL AND n.deleted = 0 ORDER BY n.id ASC",
                NODE_COLUMNS
            ),
            (),
        )
        .await
    }

    /// Non-tombstoned children of `parent_id`, ordered by their `lang`
    /// translation's weight and title
    ///
    /// Children without a translation in `lang` come last.
    pub async fn db_get_child_nodes(
        &self,
        parent_id: i64,
        lang: &str,
        include_hidden_from_nav: bool,
    ) -> Result<libsql::Rows, DatabaseError> {
        self.query_all(
            "get_child_nodes",
            &format!(
                "SELECT {} FROM nodes n
                 LEFT JOIN node_translations t ON t.node_id = n.id AND t.lang = ?2
                 WHERE n.parent_id = ?1 AND n.deleted = 0 AND (?3 = 1 OR n.hidden_from_nav = 0)
                 ORDER BY t.id IS NULL, t.weight ASC, t.title ASC, n.id ASC",
                NODE_COLUMNS
            ),
            (parent_id, lang, flag(include_hidden_from_nav)),
        )
        .await
    }

    pub async fn db_set_node_deleted(&self, id: i64, deleted: bool) -> Result<u64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        conn.execute(
            "UPDATE nodes SET deleted = ?1 WHERE id = ?2",
            (flag(deleted), id),
        )
        .await
        .map_err(|e| DatabaseError::sql_execution(format!("Failed to tombstone node: {}", e)))
    }

    //
    // TRANSLATIONS
    //

    pub async fn insert_translation(
        conn: &Connection,
        params: DbCreateTranslationParams<'_>,
    ) -> Result<i64, DatabaseError> {
        conn.execute(
            "INSERT INTO node_translations (node_id, lang, slug, url, online, title, weight)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                params.node_id,
                params.lang,
                params.slug,
                params.url,
                flag(params.online),
                params.title,
                params.weight,
            ),
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!(
                "Failed to insert translation for node {} ({}): {}",
                params.node_id, params.lang, e
            ))
        })?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn db_create_translation(
        &self,
        params: DbCreateTranslationParams<'_>,
    ) -> Result<i64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::insert_translation(&conn, params).await
    }

    pub async fn select_translation(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        Self::query_first(
            conn,
            "get_translation",
            &format!(
                "SELECT {} FROM node_translations t WHERE t.id = ?1",
                TRANSLATION_COLUMNS
            ),
            [id],
        )
        .await
    }

    pub async fn db_get_translation(&self, id: i64) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::select_translation(&conn, id).await
    }

    /// Translation of `node_id` in `lang`, online or not
    pub async fn db_get_translation_for_node(
        &self,
        node_id: i64,
        lang: &str,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::query_first(
            &conn,
            "get_translation_for_node",
            &format!(
                "SELECT {} FROM node_translations t
                 WHERE t.node_id = ?1 AND t.lang = ?2
                 ORDER BY t.id DESC LIMIT 1",
                TRANSLATION_COLUMNS
            ),
            (node_id, lang),
        )
        .await
    }

    /// Any translation of `node_id`, online ones first
    pub async fn db_get_any_translation_for_node(
        &self,
        node_id: i64,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::query_first(
            &conn,
            "get_any_translation_for_node",
            &format!(
                "SELECT {} FROM node_translations t
                 WHERE t.node_id = ?1
                 ORDER BY t.online DESC, t.id ASC LIMIT 1",
                TRANSLATION_COLUMNS
            ),
            [node_id],
        )
        .await
    }

    /// One step of slug resolution
    ///
    /// `parent_id = None` matches root nodes (`parent_id IS NULL`), and
    /// `slug = None` matches translations without a slug. Highest node
    /// sequence number wins.
    pub async fn db_find_translation_for_slug_part(
        &self,
        parent_id: Option<i64>,
        slug: Option<&str>,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::query_first(
            &conn,
            "find_translation_for_slug_part",
            &format!(
                "SELECT {} FROM node_translations t
                 JOIN nodes n ON n.id = t.node_id
                 WHERE n.deleted = 0
                   AND ((?1 IS NULL AND n.parent_id IS NULL) OR n.parent_id = ?1)
                   AND ((?2 IS NULL AND t.slug IS NULL) OR t.slug = ?2)
                 ORDER BY n.sequence_number DESC, t.id DESC LIMIT 1",
                TRANSLATION_COLUMNS
            ),
            (parent_id, slug),
        )
        .await
    }

    /// Exact url lookup
    ///
    /// `url = None` matches translations whose url is NULL or empty;
    /// `lang = None` matches every language.
    pub async fn db_find_translation_for_url(
        &self,
        url: Option<&str>,
        lang: Option<&str>,
        include_deleted: bool,
        exclude_id: Option<i64>,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::query_first(
            &conn,
            "find_translation_for_url",
            &format!(
                "SELECT {} FROM node_translations t
                 JOIN nodes n ON n.id = t.node_id
                 WHERE (?3 = 1 OR n.deleted = 0)
                   AND (?2 IS NULL OR t.lang = ?2)
                   AND ((?1 IS NULL AND (t.url IS NULL OR t.url = '')) OR t.url = ?1)
                   AND (?4 IS NULL OR t.id <> ?4)
                 ORDER BY n.sequence_number DESC, t.id DESC LIMIT 1",
                TRANSLATION_COLUMNS
            ),
            (url, lang, flag(include_deleted), exclude_id),
        )
        .await
    }

    /// Longest stored url that is a prefix of `url`
    pub async fn db_find_best_match_for_url(
        &self,
        url: &str,
        lang: &str,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::query_first(
            &conn,
            "find_best_match_for_url",
            &format!(
                "SELECT {} FROM node_translations t
                 JOIN nodes n ON n.id = t.node_id
                 WHERE n.deleted = 0
                   AND t.lang = ?2
                   AND t.url IS NOT NULL
                   AND substr(?1, 1, length(t.url)) = t.url
                 ORDER BY length(t.url) DESC, n.sequence_number DESC, t.id ASC LIMIT 1",
                TRANSLATION_COLUMNS
            ),
            (url, lang),
        )
        .await
    }

    pub async fn db_get_top_translations(&self) -> Result<libsql::Rows, DatabaseError> {
        self.query_all(
            "get_top_translations",
            &format!(
                "SELECT {} FROM node_translations t
                 JOIN nodes n ON n.id = t.node_id
                 WHERE n.parent_id IS NULL AND n.deleted = 0
                 ORDER BY n.id ASC, t.lang ASC",
                TRANSLATION_COLUMNS
            ),
            (),
        )
        .await
    }

    pub async fn db_get_online_translations(
        &self,
        lang: Option<&str>,
    ) -> Result<libsql::Rows, DatabaseError> {
        self.query_all(
            "get_online_translations",
            &format!(
                "SELECT {} FROM node_translations t
                 JOIN nodes n ON n.id = t.node_id
                 WHERE n.deleted = 0 AND t.online = 1 AND (?1 IS NULL OR t.lang = ?1)
                 ORDER BY t.id ASC",
                TRANSLATION_COLUMNS
            ),
            [lang],
        )
        .await
    }

    /// Translation owning the newest version that snapshots the given content
    pub async fn db_get_translation_for_content(
        &self,
        ref_entity_name: &str,
        ref_id: i64,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::query_first(
            &conn,
            "get_translation_for_content",
            &format!(
                "SELECT {} FROM node_translations t
                 JOIN node_versions v ON v.node_translation_id = t.id
                 WHERE v.ref_entity_name = ?1 AND v.ref_id = ?2
                 ORDER BY v.id DESC LIMIT 1",
                TRANSLATION_COLUMNS
            ),
            (ref_entity_name, ref_id),
        )
        .await
    }

    pub async fn db_set_translation_online(
        &self,
        id: i64,
        online: bool,
    ) -> Result<u64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        conn.execute(
            "UPDATE node_translations SET online = ?1 WHERE id = ?2",
            (flag(online), id),
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to update translation {}: {}", id, e))
        })
    }

    pub async fn set_public_version(
        conn: &Connection,
        translation_id: i64,
        version_id: i64,
    ) -> Result<(), DatabaseError> {
        let updated = conn
            .execute(
                "UPDATE node_translations SET public_node_version_id = ?1 WHERE id = ?2",
                (version_id, translation_id),
            )
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!(
                    "Failed to link version {} to translation {}: {}",
                    version_id, translation_id, e
                ))
            })?;

        if updated == 0 {
            return Err(DatabaseError::sql_execution(format!(
                "Translation {} vanished while linking its public version",
                translation_id
            )));
        }
        Ok(())
    }

    //
    // VERSIONS
    //

    pub async fn insert_version(
        conn: &Connection,
        params: DbCreateVersionParams<'_>,
    ) -> Result<i64, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO node_versions (node_translation_id, owner, ref_id, ref_entity_name, version_type, origin_id, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            (
                params.node_translation_id,
                params.owner,
                params.ref_id,
                params.ref_entity_name,
                params.version_type,
                params.origin_id,
                now,
            ),
        )
        .await
        .map_err(|e| DatabaseError::sql_execution(format!("Failed to insert version: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn select_version(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        Self::query_first(
            conn,
            "get_version",
            &format!("SELECT {} FROM node_versions v WHERE v.id = ?1", VERSION_COLUMNS),
            [id],
        )
        .await
    }

    pub async fn db_get_version(&self, id: i64) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        Self::select_version(&conn, id).await
    }

    pub async fn db_get_versions_for_translation(
        &self,
        translation_id: i64,
    ) -> Result<libsql::Rows, DatabaseError> {
        self.query_all(
            "get_versions_for_translation",
            &format!(
                "SELECT {} FROM node_versions v WHERE v.node_translation_id = ?1 ORDER BY v.id ASC",
                VERSION_COLUMNS
            ),
            [translation_id],
        )
        .await
    }
}
