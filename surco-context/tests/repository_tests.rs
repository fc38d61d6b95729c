//! Cache behaviour of the context repository against counting stores.

use std::sync::Arc;
use surco_context::{fallback_context, ContextMode, ContextRepository};
use surco_test_utils::{CountingDocumentStore, FailingDocumentStore};

#[test]
fn test_second_load_hits_cache_without_reads() {
    let store = Arc::new(CountingDocumentStore::with_sector_fixtures());
    let repo = ContextRepository::new(store.clone());

    let first = repo.load_context(5, true);
    let reads_after_first = store.reads();
    assert_eq!(reads_after_first, 4);

    let second = repo.load_context(5, true);
    assert_eq!(first, second);
    assert_eq!(store.reads(), reads_after_first);
}

#[test]
fn test_summary_content_for_fixtures() {
    let repo = ContextRepository::new(Arc::new(CountingDocumentStore::with_sector_fixtures()));
    let context = repo.load_context(12, true);

    assert!(context.starts_with("AGRICULTURA DURANGO:\n## Posicionamiento Nacional"));
    assert!(context.contains("### Diciembre\nProtección contra heladas."));
    assert!(context.contains("GANADERÍA DURANGO:\n## Diciembre\nAlimentación suplementaria y refugios."));
    // Forestal has no December section, so its cycles section is used.
    assert!(context.contains("FORESTAL DURANGO:\nReforestación en temporada de lluvias."));
    assert!(context.contains("AGROINDUSTRIA DURANGO:\nInformación general del sector disponible...."));
}

#[test]
fn test_full_year_fits_default_cache() {
    let store = Arc::new(CountingDocumentStore::with_sector_fixtures());
    let repo = ContextRepository::new(store.clone());

    for month in 1..=12 {
        repo.load_context(month, true);
    }
    assert_eq!(repo.cached_months(ContextMode::Summary).len(), 12);

    store.reset();
    repo.load_context(7, true);
    assert_eq!(store.reads(), 0);
}

#[test]
fn test_saturated_cache_recomputes_and_keeps_entries() {
    let store = Arc::new(CountingDocumentStore::with_sector_fixtures());
    let repo = ContextRepository::with_config(
        store.clone(),
        surco_context::ContextConfig {
            cache_capacity: 3,
            excerpt_chars: 800,
        },
    );

    for month in [1, 3, 5] {
        repo.load_context(month, true);
    }
    store.reset();

    let first = repo.load_context(12, true);
    assert_eq!(store.reads(), 4);
    let second = repo.load_context(12, true);
    assert_eq!(store.reads(), 8);
    assert_eq!(first, second);
    assert!(!repo.is_cached(12, ContextMode::Summary));

    repo.load_context(3, true);
    assert_eq!(store.reads(), 8);
    assert_eq!(repo.cached_months(ContextMode::Summary), vec![1, 3, 5]);
}

#[test]
fn test_missing_documents_return_cached_fallback() {
    let store = Arc::new(CountingDocumentStore::empty());
    let repo = ContextRepository::new(store.clone());

    let context = repo.load_context(6, true);
    assert_eq!(context, fallback_context(6));
    assert_eq!(store.reads(), 4);

    assert_eq!(repo.load_context(6, true), fallback_context(6));
    assert_eq!(store.reads(), 4);
}

#[test]
fn test_read_failure_returns_uncached_fallback() {
    let store = Arc::new(FailingDocumentStore::new());
    let repo = ContextRepository::new(store.clone());

    assert_eq!(repo.load_context(10, false), fallback_context(10));
    assert!(!repo.is_cached(10, ContextMode::Full));

    assert_eq!(repo.load_context(10, false), fallback_context(10));
    assert_eq!(store.reads(), 2);
}

#[test]
fn test_concurrent_loads_agree() {
    let repo = Arc::new(ContextRepository::new(Arc::new(
        CountingDocumentStore::with_sector_fixtures(),
    )));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            std::thread::spawn(move || repo.load_context(8, true))
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(repo.cached_months(ContextMode::Summary), vec![8]);
}
