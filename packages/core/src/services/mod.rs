//! Resolution Services
//!
//! This module contains the engine's read and write paths over the node
//! forest:
//!
//! - `SlugResolver` - slug path to translation, segment by segment
//! - `UrlMatcher` - exact and longest-prefix url lookups
//! - `TranslationChainValidator` - is every ancestor translated in a locale
//! - `TreeMaterializer` - nested chooser items with lazy depth stubs
//! - `NodeChooser` - request-level entry point for the lazy chooser
//! - `TranslationFactory` - first translation plus public version, in one transaction
//!
//! Services are stateless; they share one `Arc<dyn NodeStore>` and receive
//! their permission and domain collaborators per call.

pub mod error;
pub mod node_chooser;
pub mod permission;
pub mod slug_resolver;
pub mod translation_chain;
pub mod translation_factory;
pub mod tree_materializer;
pub mod url_matcher;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::NodeTreeError;
pub use node_chooser::{NodeChooser, DEFAULT_LAZY_INCREMENT};
pub use permission::{
    AllowAll, DenyNodes, DomainContext, MultiDomain, PermissionOracle, SingleDomain, SwitchedHost,
};
pub use slug_resolver::SlugResolver;
pub use translation_chain::{TranslationChainValidator, DEFAULT_MAX_ANCESTOR_DEPTH};
pub use translation_factory::TranslationFactory;
pub use tree_materializer::{
    ChildNodeProvider, ItemType, PermissionFilteredChildren, TreeChildren, TreeItem,
    TreeMaterializer,
};
pub use url_matcher::UrlMatcher;
