//! Data Models
//!
//! This module contains the data structures of the content forest:
//!
//! - `Node` - Language-independent position in the forest
//! - `NodeTranslation` - Localized binding of a node for one language
//! - `NodeVersion` - Versioned snapshot linked as a translation's public version
//! - `HasNode` - Capability of content entities that can be attached to the tree

mod content;
mod node;
mod translation;
mod version;

pub use content::{ContentRef, HasNode, User};
pub use node::{ContentKind, NewNode, Node, ValidationError};
pub use translation::{NewNodeTranslation, NodeTranslation};
pub use version::{NewNodeVersion, NodeVersion, VersionType};
