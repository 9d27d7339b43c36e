//! Fixtures shared by the service tests

use crate::db::{DatabaseService, NodeStore, TursoStore};
use crate::models::{NewNode, NewNodeTranslation, Node, NodeTranslation};
use std::sync::Arc;
use tempfile::TempDir;

/// Fresh store in a temporary directory; keep the `TempDir` alive
pub async fn create_test_store() -> (Arc<dyn NodeStore>, TempDir) {
    let (_db, store, temp_dir) = create_test_database().await;
    (store, temp_dir)
}

/// Like [`create_test_store`], also handing out the database for raw SQL
pub async fn create_test_database() -> (Arc<DatabaseService>, Arc<dyn NodeStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Arc::new(DatabaseService::new(db_path).await.unwrap());
    let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db.clone()));
    (db, store, temp_dir)
}

pub async fn node(store: &Arc<dyn NodeStore>, parent: Option<&Node>) -> Node {
    let params = match parent {
        Some(parent) => NewNode::child_of(parent.id, "page"),
        None => NewNode::root("page"),
    };
    store.create_node(params).await.unwrap()
}

/// Online translation with the given slug and url
pub async fn translate(
    store: &Arc<dyn NodeStore>,
    node: &Node,
    lang: &str,
    title: &str,
    slug: Option<&str>,
    url: Option<&str>,
) -> NodeTranslation {
    let mut draft = NewNodeTranslation::new(node.id, lang, title).online(true);
    if let Some(slug) = slug {
        draft = draft.with_slug(slug);
    }
    if let Some(url) = url {
        draft = draft.with_url(url);
    }
    store.create_translation(draft).await.unwrap()
}
