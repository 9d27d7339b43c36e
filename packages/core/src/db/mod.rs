//! Database Layer
//!
//! This module handles all persistence of the node forest using libsql:
//!
//! - Database initialization and connection management (`DatabaseService`)
//! - The `NodeStore` abstraction the services depend on
//! - `TursoStore`, the libsql-backed `NodeStore`
//! - The `VersionStore` collaborator that writes version snapshots inside
//!   the translation factory's transaction

mod database;
mod error;
mod node_store;
mod turso_store;
mod version_store;

pub use database::{
    DatabaseService, DbCreateNodeParams, DbCreateTranslationParams, DbCreateVersionParams,
    NODE_COLUMNS, TRANSLATION_COLUMNS, VERSION_COLUMNS,
};
pub use error::DatabaseError;
pub use node_store::{NodeStore, NodeTarget, StoreTransaction, TranslationDraft, UrlQuery};
pub use turso_store::{TursoStore, TursoTransaction};
pub use version_store::{SnapshotVersionStore, VersionStore};
