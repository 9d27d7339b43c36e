//! Resolution Scenario Tests
//!
//! End-to-end checks of the read paths over a small site:
//!
//! ```text
//! Home (root, no slug)                en, fr
//! ├── About    slug "about"            en
//! ├── Blog     slug "blog"   url /blog en
//! │   └── Post slug "post"   url /blog/post   en
//! │       └── Comments slug "comments"        en, fr
//! └── Products slug "products"         en (hidden from nav)
//!     └── Chair slug "chair"           en, fr
//! ```
//!
//! ## Test Coverage
//! - Slug path resolution from the root and from an arbitrary parent
//! - Ancestor-chain completeness per locale
//! - Longest-prefix url matching
//! - Chooser tree materialization and its JSON shape

#[cfg(test)]
mod resolution_scenarios_tests {
    use anyhow::Result;
    use nodetree_core::db::{DatabaseService, NodeStore, TursoStore};
    use nodetree_core::models::{NewNode, NewNodeTranslation, Node, NodeTranslation};
    use nodetree_core::services::{
        AllowAll, MultiDomain, NodeChooser, SingleDomain, SlugResolver, TranslationChainValidator,
        TreeMaterializer, UrlMatcher,
    };
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    struct Site {
        store: Arc<dyn NodeStore>,
        home: Node,
        home_en: NodeTranslation,
        about_en: NodeTranslation,
        post_en: NodeTranslation,
        comments_en: NodeTranslation,
        comments_fr: NodeTranslation,
        products: Node,
        chair_fr: NodeTranslation,
        _temp_dir: TempDir,
    }

    /// Helper to create test database
    async fn create_test_store() -> Result<(Arc<dyn NodeStore>, TempDir)> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(DatabaseService::new(db_path).await?);
        Ok((Arc::new(TursoStore::new(db)), temp_dir))
    }

    async fn page(
        store: &Arc<dyn NodeStore>,
        node: &Node,
        lang: &str,
        title: &str,
        slug: Option<&str>,
        url: Option<&str>,
    ) -> Result<NodeTranslation> {
        let mut draft = NewNodeTranslation::new(node.id, lang, title).online(true);
        if let Some(slug) = slug {
            draft = draft.with_slug(slug);
        }
        if let Some(url) = url {
            draft = draft.with_url(url);
        }
        store.create_translation(draft).await
    }

    async fn build_site() -> Result<Site> {
        let (store, temp_dir) = create_test_store().await?;

        let home = store.create_node(NewNode::root("page")).await?;
        let home_en = page(&store, &home, "en", "Home", None, None).await?;
        page(&store, &home, "fr", "Accueil", None, None).await?;

        let about = store.create_node(NewNode::child_of(home.id, "page")).await?;
        let about_en = page(&store, &about, "en", "About", Some("about"), Some("/about")).await?;

        let blog = store.create_node(NewNode::child_of(home.id, "page")).await?;
        page(&store, &blog, "en", "Blog", Some("blog"), Some("/blog")).await?;
        let post = store.create_node(NewNode::child_of(blog.id, "page")).await?;
        let post_en = page(&store, &post, "en", "Post", Some("post"), Some("/blog/post")).await?;
        let comments = store.create_node(NewNode::child_of(post.id, "page")).await?;
        let comments_en = page(&store, &comments, "en", "Comments", Some("comments"), None).await?;
        let comments_fr =
            page(&store, &comments, "fr", "Commentaires", Some("commentaires"), None).await?;

        let products = store
            .create_node(NewNode::child_of(home.id, "page").hidden_from_nav(true))
            .await?;
        page(&store, &products, "en", "Products", Some("products"), None).await?;
        let chair = store.create_node(NewNode::child_of(products.id, "page")).await?;
        page(&store, &chair, "en", "Chair", Some("chair"), None).await?;
        let chair_fr = page(&store, &chair, "fr", "Chaise", Some("chaise"), None).await?;

        Ok(Site {
            store,
            home,
            home_en,
            about_en,
            post_en,
            comments_en,
            comments_fr,
            products,
            chair_fr,
            _temp_dir: temp_dir,
        })
    }

    #[tokio::test]
    async fn test_about_resolves_under_home() -> Result<()> {
        let site = build_site().await?;
        let resolver = SlugResolver::new(site.store.clone());

        let found = resolver
            .resolve_slug_path("about", Some(&site.home_en))
            .await?
            .expect("about should resolve");
        assert_eq!(found.id, site.about_en.id);

        let root = assert_ok!(resolver.resolve_slug_path("", None).await).expect("root");
        assert_eq!(root.node_id, site.home.id);
        assert!(root.slug.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_deep_path_and_miss() -> Result<()> {
        let site = build_site().await?;
        let resolver = SlugResolver::new(site.store.clone());

        let found = resolver
            .resolve_slug_path("blog/post/comments", Some(&site.home_en))
            .await?
            .expect("comments should resolve");
        assert_eq!(found.id, site.comments_en.id);

        assert!(resolver
            .resolve_slug_path("blog/missing/comments", Some(&site.home_en))
            .await?
            .is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_broken_french_chain() -> Result<()> {
        let site = build_site().await?;
        let validator = TranslationChainValidator::new(site.store.clone());

        // Post and Blog have no French translation
        assert!(!validator
            .has_complete_ancestor_chain(&site.comments_fr, "fr")
            .await?);
        assert!(validator
            .has_complete_ancestor_chain(&site.comments_en, "en")
            .await?);

        // Products has no French translation either
        assert!(!validator.has_complete_ancestor_chain(&site.chair_fr, "fr").await?);
        page(&site.store, &site.products, "fr", "Produits", Some("produits"), None).await?;
        assert!(validator.has_complete_ancestor_chain(&site.chair_fr, "fr").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_best_match_for_comments_url() -> Result<()> {
        let site = build_site().await?;
        let matcher = UrlMatcher::new(site.store.clone());

        let found = matcher
            .best_match_for_url("/blog/post/comments", "en")
            .await?
            .expect("a prefix should match");
        assert_eq!(found.id, site.post_en.id);

        assert!(matcher.best_match_for_url("/shop", "en").await?.is_none());

        let exact = matcher
            .resolve_by_url("/about", "en", false, None)
            .await?
            .expect("exact url");
        assert_eq!(exact.id, site.about_en.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_depth_one_tree_has_no_nested_children() -> Result<()> {
        let site = build_site().await?;
        let materializer = TreeMaterializer::new(site.store.clone());

        let items = materializer
            .materialize(
                "en",
                &[site.home.clone()],
                1,
                &AllowAll,
                &SingleDomain::new("example.com"),
            )
            .await?;

        let value = serde_json::to_value(&items)?;
        assert_eq!(
            value,
            json!([{
                "id": site.home.id,
                "type": "default",
                "text": "Home",
                "tag": format!("[NT{}]", site.home_en.id),
                "children": true,
            }])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_two_level_tree_shape() -> Result<()> {
        let site = build_site().await?;
        let materializer = TreeMaterializer::new(site.store.clone());

        let items = materializer
            .materialize(
                "en",
                &[site.home.clone()],
                2,
                &AllowAll,
                &SingleDomain::new("example.com"),
            )
            .await?;

        let children = items[0].child_items().expect("children materialized");
        let titles: Vec<&str> = children.iter().map(|c| c.text.as_str()).collect();
        // Equal weights sort by title
        assert_eq!(titles, vec!["About", "Blog", "Products"]);

        let value = serde_json::to_value(children)?;
        assert!(value[0].get("children").is_none());
        assert_eq!(value[1]["children"], json!(true));
        assert_eq!(value[2]["type"], json!("hidden-from-nav"));
        assert_eq!(value[2]["children"], json!(true));
        Ok(())
    }

    #[tokio::test]
    async fn test_multi_domain_chooser_tags() -> Result<()> {
        let site = build_site().await?;
        let chooser = NodeChooser::new(site.store.clone());

        let domain = MultiDomain::new("admin.example.com")
            .with_switched_host("main", "www.example.com")
            .with_root("www.example.com", site.home.id);
        let items = chooser
            .select_nodes_lazy("en", Some("#"), &AllowAll, &domain)
            .await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tag, format!("[main:NT{}]", site.home_en.id));
        for child in items[0].child_items().expect("lazy increment is 2") {
            assert!(child.tag.starts_with("[main:NT"));
        }

        assert_err!(
            chooser
                .select_nodes_lazy("en", Some("not-a-node"), &AllowAll, &domain)
                .await
        );
        Ok(())
    }
}
