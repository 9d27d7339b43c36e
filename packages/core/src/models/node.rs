//! Node Data Structures
//!
//! This module defines the language-independent `Node` record of the content
//! forest and the parameters used to create one.
//!
//! # Architecture
//!
//! - **Arena by id**: Nodes reference their parent by id (`parent_id`), never by
//!   a live object reference, so the forest has no ownership cycles
//! - **Tombstones**: Nodes are never hard-deleted; `deleted` hides them from
//!   default lookups
//! - **Sequence numbers**: `sequence_number` breaks ties between candidate rows
//!   (highest wins)
//!
//! # Examples
//!
//! ```rust
//! use nodetree_core::models::{ContentKind, NewNode};
//!
//! let root = NewNode::root("page").with_kind(ContentKind::Leaf);
//! let child = NewNode::child_of(1, "page").hidden_from_nav(true);
//! assert!(root.parent_id.is_none());
//! assert_eq!(child.parent_id, Some(1));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validation errors for model values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid content kind: {0}")]
    InvalidContentKind(String),

    #[error("Invalid version type: {0}")]
    InvalidVersionType(String),
}

/// Kind of content a node wraps.
///
/// Decided when the content value is constructed. Structure content groups
/// other nodes in the tree but is not addressable by url on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    #[default]
    Leaf,
    Structure,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Leaf => "leaf",
            ContentKind::Structure => "structure",
        }
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, ContentKind::Structure)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leaf" => Ok(ContentKind::Leaf),
            "structure" => Ok(ContentKind::Structure),
            other => Err(ValidationError::InvalidContentKind(other.to_string())),
        }
    }
}

/// A position in the content forest, independent of language.
///
/// # Fields
///
/// - `id`: Store-assigned identifier
/// - `parent_id`: Parent node id, `None` for roots
/// - `deleted`: Tombstone flag
/// - `sequence_number`: Tie-break key for duplicate candidates (highest wins)
/// - `hidden_from_nav`: Excluded from navigation menus, still shown in choosers
/// - `ref_entity_name`: Type name of the wrapped content
/// - `kind`: Leaf or structure content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub deleted: bool,
    pub sequence_number: i64,
    pub hidden_from_nav: bool,
    pub ref_entity_name: String,
    pub kind: ContentKind,
}

/// Parameters for inserting a node.
///
/// `sequence_number = None` lets the store assign the next free number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    pub parent_id: Option<i64>,
    pub sequence_number: Option<i64>,
    pub hidden_from_nav: bool,
    pub ref_entity_name: String,
    pub kind: ContentKind,
}

impl NewNode {
    pub fn root(ref_entity_name: impl Into<String>) -> Self {
        Self {
            parent_id: None,
            sequence_number: None,
            hidden_from_nav: false,
            ref_entity_name: ref_entity_name.into(),
            kind: ContentKind::Leaf,
        }
    }

    pub fn child_of(parent_id: i64, ref_entity_name: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::root(ref_entity_name)
        }
    }

    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_sequence_number(mut self, sequence_number: i64) -> Self {
        self.sequence_number = Some(sequence_number);
        self
    }

    pub fn hidden_from_nav(mut self, hidden: bool) -> Self {
        self.hidden_from_nav = hidden;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ref_entity_name.trim().is_empty() {
            return Err(ValidationError::MissingField("ref_entity_name".to_string()));
        }
        Ok(())
    }
}
