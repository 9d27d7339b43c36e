//! NodeTree Core
//!
//! Resolution engine for a CMS page tree: a forest of nodes, each carrying
//! one translation per language, each translation pointing at a public
//! version of the content it wraps.
//!
//! # Architecture
//!
//! - **Arena by id**: nodes reference their parent by id; the store answers
//!   child and ancestor queries, nothing holds object graphs in memory
//! - **Tombstones**: deleted nodes stay in the store and are filtered out of
//!   every lookup that does not explicitly ask for them
//! - **libsql/Turso**: embedded SQLite-compatible database behind the
//!   `NodeStore` trait
//! - **Injected collaborators**: permission checks, host configuration and
//!   versioning are traits passed in by the caller
//!
//! # Modules
//!
//! - [`models`] - Nodes, translations, versions and the content capability
//! - [`db`] - Database layer with libsql integration
//! - [`services`] - Slug and url resolution, tree materialization, factory
//! - [`config`] - Runtime configuration
//! - [`logging`] - Tracing subscriber setup
//! - [`utils`] - Slug generation

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::NodeTreeConfig;
pub use db::{DatabaseService, NodeStore, SnapshotVersionStore, TursoStore, VersionStore};
pub use models::*;
pub use services::*;
