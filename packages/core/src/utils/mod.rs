//! Utility functions for the node tree
//!
//! This module provides helpers shared across services.

mod slugifier;

pub use slugifier::{slugify, slugify_or};
