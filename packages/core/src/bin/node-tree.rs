//! Node tree inspection binary
//!
//! Answers the engine's read queries against a database file and prints the
//! result as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! # Top level of the link chooser
//! cargo run --bin node-tree -- chooser
//!
//! # Children of node 12
//! cargo run --bin node-tree -- chooser 12
//!
//! # Slug path from the root translation
//! cargo run --bin node-tree -- resolve blog/post
//!
//! # Exact and longest-prefix url lookups
//! cargo run --bin node-tree -- url blog/post
//! cargo run --bin node-tree -- best-match blog/post/comments
//! ```
//!
//! # Environment Variables
//!
//! - `NODETREE_DATABASE_PATH`: Database file (default: ./data/nodetree.db)
//! - `NODETREE_DEFAULT_LOCALE`: Locale used for every query (default: en)
//! - `NODETREE_LAZY_INCREMENT`: Chooser depth per request (default: 2)
//! - `NODETREE_MAX_ANCESTOR_DEPTH`: Ancestor walk bound (default: 64)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug")

use std::env;
use std::sync::Arc;

use nodetree_core::logging::init_tracing;
use nodetree_core::services::{
    AllowAll, NodeChooser, SingleDomain, SlugResolver, TranslationChainValidator, UrlMatcher,
};
use nodetree_core::{DatabaseService, NodeStore, NodeTranslation, NodeTreeConfig, TursoStore};
use serde_json::json;

const USAGE: &str = "usage: node-tree <chooser [id] | resolve <slug-path> | url <url> | best-match <url>>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("warn");

    let config = NodeTreeConfig::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("chooser");
    let argument = args.get(1).map(String::as_str);

    tracing::info!("Database: {}", config.database_path.display());
    let db = Arc::new(DatabaseService::new(config.database_path.clone()).await?);
    let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));
    let locale = config.default_locale.as_str();

    let output = match (command, argument) {
        ("chooser", id) => {
            let chooser = NodeChooser::from_config(store.clone(), &config);
            let items = chooser
                .select_nodes_lazy(locale, id, &AllowAll, &SingleDomain::new("localhost"))
                .await?;
            serde_json::to_value(items)?
        }
        ("resolve", Some(path)) => {
            let resolver = SlugResolver::new(store.clone());
            let root = resolver.resolve_root().await?;
            let found = resolver.resolve_slug_path(path, root.as_ref()).await?;
            describe(&store, &config, found).await?
        }
        ("url", Some(url)) => {
            let found = UrlMatcher::new(store.clone())
                .resolve_by_url(url, locale, false, None)
                .await?;
            describe(&store, &config, found).await?
        }
        ("best-match", Some(url)) => {
            let found = UrlMatcher::new(store.clone())
                .best_match_for_url(url, locale)
                .await?;
            describe(&store, &config, found).await?
        }
        _ => anyhow::bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Translation plus whether it is reachable in the configured locale
async fn describe(
    store: &Arc<dyn NodeStore>,
    config: &NodeTreeConfig,
    translation: Option<NodeTranslation>,
) -> anyhow::Result<serde_json::Value> {
    let Some(translation) = translation else {
        return Ok(serde_json::Value::Null);
    };

    let validator = TranslationChainValidator::with_max_depth(store.clone(), config.max_ancestor_depth);
    let complete = validator
        .has_complete_ancestor_chain(&translation, &config.default_locale)
        .await?;

    Ok(json!({
        "translation": translation,
        "complete_ancestor_chain": complete,
    }))
}
