//! Runtime configuration for the node tree services
use crate::services::{NodeTreeError, DEFAULT_LAZY_INCREMENT, DEFAULT_MAX_ANCESTOR_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTreeConfig {
    /// Database file; parent directories are created on startup
    pub database_path: PathBuf,

    /// Levels the chooser materializes per request
    pub lazy_increment: u32,

    pub max_ancestor_depth: usize,

    pub default_locale: String,
}

impl Default for NodeTreeConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./data/nodetree.db"),
            lazy_increment: DEFAULT_LAZY_INCREMENT,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            default_locale: "en".to_string(),
        }
    }
}

impl NodeTreeConfig {
    /// Defaults overlaid with `NODETREE_*` environment variables
    ///
    /// - `NODETREE_DATABASE_PATH`
    /// - `NODETREE_LAZY_INCREMENT`
    /// - `NODETREE_MAX_ANCESTOR_DEPTH`
    /// - `NODETREE_DEFAULT_LOCALE`
    pub fn from_env() -> Result<Self, NodeTreeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NodeTreeError> {
        let mut config = Self::default();

        if let Some(path) = lookup("NODETREE_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(increment) = parse_var(&lookup, "NODETREE_LAZY_INCREMENT")? {
            config.lazy_increment = increment;
        }
        if let Some(depth) = parse_var(&lookup, "NODETREE_MAX_ANCESTOR_DEPTH")? {
            config.max_ancestor_depth = depth;
        }
        if let Some(locale) = lookup("NODETREE_DEFAULT_LOCALE") {
            config.default_locale = locale.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NodeTreeError> {
        if self.lazy_increment == 0 {
            return Err(NodeTreeError::invalid_config(
                "lazy_increment must be at least 1",
            ));
        }
        if self.max_ancestor_depth == 0 {
            return Err(NodeTreeError::invalid_config(
                "max_ancestor_depth must be at least 1",
            ));
        }
        if self.default_locale.is_empty() {
            return Err(NodeTreeError::invalid_config("default_locale is empty"));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(NodeTreeError::invalid_config("database_path is empty"));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, NodeTreeError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            NodeTreeError::invalid_config(format!("{} is not a valid number: '{}'", key, raw))
        }),
        None => Ok(None),
    }
}
