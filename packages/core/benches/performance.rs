//! Performance benchmarks for NodeTree core operations
//!
//! Run with: `cargo bench -p nodetree-core`
//!
//! These benchmarks measure the read paths a page request hits:
//! - Slug generation for titles
//! - Slug path resolution through a deep branch
//! - Tree materialization for the chooser at increasing depths

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nodetree_core::db::{DatabaseService, NodeStore, TursoStore};
use nodetree_core::models::{NewNode, NewNodeTranslation, Node, NodeTranslation};
use nodetree_core::services::{AllowAll, SingleDomain, SlugResolver, TreeMaterializer};
use nodetree_core::utils::slugify;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Setup a store with a fresh database
async fn setup_test_store() -> (Arc<dyn NodeStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("bench.db");

    let db = Arc::new(DatabaseService::new(db_path).await.unwrap());
    (Arc::new(TursoStore::new(db)), temp_dir)
}

async fn add_page(
    store: &Arc<dyn NodeStore>,
    parent: Option<&Node>,
    title: &str,
) -> (Node, NodeTranslation) {
    let params = match parent {
        Some(parent) => NewNode::child_of(parent.id, "page"),
        None => NewNode::root("page"),
    };
    let node = store.create_node(params).await.unwrap();
    let mut draft = NewNodeTranslation::new(node.id, "en", title).online(true);
    if parent.is_some() {
        draft = draft.with_slug(slugify(title));
    }
    let translation = store.create_translation(draft).await.unwrap();
    (node, translation)
}

/// Root with `fanout` children per node, `levels` levels below the root
async fn seed_tree(store: &Arc<dyn NodeStore>, fanout: usize, levels: usize) -> Node {
    let (root, _) = add_page(store, None, "Home").await;
    let mut frontier = vec![root.clone()];
    for level in 0..levels {
        let mut next = Vec::new();
        for parent in &frontier {
            for i in 0..fanout {
                let title = format!("Page {} {}", level, i);
                let (child, _) = add_page(store, Some(parent), &title).await;
                next.push(child);
            }
        }
        frontier = next;
    }
    root
}

fn bench_slugify(c: &mut Criterion) {
    let titles = [
        "About us",
        "Über die Straße: Öffnungszeiten & Preise",
        "  Q&A -- 2024 / Frequently asked questions  ",
    ];

    c.bench_function("slugify_titles", |b| {
        b.iter(|| {
            for title in &titles {
                black_box(slugify(black_box(title)));
            }
        })
    });
}

/// Resolve a ten-segment slug path from the root
fn bench_slug_resolution(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("resolve_slug_path_depth_10", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let (store, _temp) = setup_test_store().await;
                let (root, root_translation) = add_page(&store, None, "Home").await;

                let mut parent = root;
                let mut segments = Vec::new();
                for level in 0..10 {
                    let title = format!("Level {}", level);
                    let (child, _) = add_page(&store, Some(&parent), &title).await;
                    segments.push(slugify(&title));
                    parent = child;
                }
                let path = segments.join("/");
                let resolver = SlugResolver::new(store.clone());

                let start = std::time::Instant::now();
                for _ in 0..iters {
                    let found = resolver
                        .resolve_slug_path(&path, Some(&root_translation))
                        .await
                        .unwrap();
                    black_box(found);
                }
                start.elapsed()
            })
        });
    });
}

/// Materialize a 4-way tree, three levels deep, at depth budgets 1 to 3
fn bench_materialize(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("materialize");
    group.sample_size(10); // Fewer samples for expensive operations

    for depth in 1..=3u32 {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter_custom(|iters| {
                rt.block_on(async {
                    let (store, _temp) = setup_test_store().await;
                    let root = seed_tree(&store, 4, 3).await;
                    let materializer = TreeMaterializer::new(store.clone());
                    let domain = SingleDomain::new("localhost");
                    let roots = [root];

                    let start = std::time::Instant::now();
                    for _ in 0..iters {
                        let items = materializer
                            .materialize("en", &roots, depth, &AllowAll, &domain)
                            .await
                            .unwrap();
                        black_box(items);
                    }
                    start.elapsed()
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_slugify, bench_slug_resolution, bench_materialize);
criterion_main!(benches);
