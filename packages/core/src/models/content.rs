//! Content capability
//!
//! Content entities that can be attached to the tree implement [`HasNode`].
//! The engine never inspects concrete content types; the kind of content is
//! carried explicitly by [`HasNode::kind`].

use super::ContentKind;
use serde::{Deserialize, Serialize};

/// Content that can be wrapped by a node.
pub trait HasNode: Send + Sync {
    /// Persisted identity, `None` until the content has been stored
    fn id(&self) -> Option<i64>;

    fn title(&self) -> &str;

    fn kind(&self) -> ContentKind;

    /// Type name recorded on nodes and versions (e.g. `"page"`)
    fn type_name(&self) -> &str;
}

/// Plain content value implementing [`HasNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    pub id: Option<i64>,
    pub title: String,
    pub kind: ContentKind,
    pub type_name: String,
}

impl ContentRef {
    pub fn page(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            kind: ContentKind::Leaf,
            type_name: "page".to_string(),
        }
    }

    pub fn structure(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            kind: ContentKind::Structure,
            type_name: "structure".to_string(),
        }
    }

    /// Content that has not been persisted yet
    pub fn unsaved(type_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            kind: ContentKind::Leaf,
            type_name: type_name.into(),
        }
    }
}

impl HasNode for ContentRef {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> ContentKind {
        self.kind
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Owner recorded on new versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
