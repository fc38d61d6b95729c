//! surco Test Utilities
//!
//! Shared test infrastructure for the surco workspace:
//! - Document stores with read counting and injected failures
//! - Sector markdown fixtures
//! - Proptest generators for months, days and strategy payloads

pub use surco_context::{DocumentStore, InMemoryDocumentStore};
pub use surco_core::{ContentStrategy, DocumentError, TopicStrategy, WeekdayTheme};

use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// DOCUMENT STORES
// ============================================================================

/// Wraps a store and counts every read, hit or miss.
pub struct CountingDocumentStore<S = InMemoryDocumentStore> {
    inner: S,
    reads: AtomicUsize,
}

impl<S: DocumentStore> CountingDocumentStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    /// Total `read_document` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.reads.store(0, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl CountingDocumentStore<InMemoryDocumentStore> {
    /// Counting store over the four sector fixtures.
    pub fn with_sector_fixtures() -> Self {
        Self::new(fixtures::sector_store())
    }

    /// Counting store with no documents at all.
    pub fn empty() -> Self {
        Self::new(InMemoryDocumentStore::new())
    }
}

impl<S: DocumentStore> DocumentStore for CountingDocumentStore<S> {
    fn read_document(&self, name: &str) -> Result<Option<String>, DocumentError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_document(name)
    }
}

/// Fails every read with `DocumentError::ReadFailed`.
#[derive(Debug, Default)]
pub struct FailingDocumentStore {
    reads: AtomicUsize,
}

impl FailingDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl DocumentStore for FailingDocumentStore {
    fn read_document(&self, name: &str) -> Result<Option<String>, DocumentError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(DocumentError::ReadFailed {
            name: name.to_string(),
            reason: "injected failure".to_string(),
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Sector documents and payloads shaped like production data.

    use super::*;

    pub const AGRICULTURA_MD: &str = "\
# Agricultura en Durango

## Posicionamiento Nacional
- Primer lugar nacional en producción de frijol
- Segundo lugar en avena forrajera
Superficie sembrada: 750 mil hectáreas

## Ciclos Productivos
Primavera-verano: maíz, frijol, chile.
Otoño-invierno: avena, trigo.

### Enero-Febrero
Preparación de suelos y mantenimiento de cultivos de frío.

### Marzo-Abril
Siembra de maíz y frijol de riego.

### Mayo-Junio-Julio
Crecimiento de maíz, cosecha de avena y alfalfa.

### Agosto-Septiembre
Cosecha de manzana en Canatlán.

### Octubre-Noviembre
Cosecha de frijol y chile.

### Diciembre
Protección contra heladas.

## Plagas Principales
Gusano cogollero, pulgón.
";

    pub const FORESTAL_MD: &str = "\
# Sector Forestal

## Ciclos Forestales
Reforestación en temporada de lluvias.

### Marzo-Abril
Trasplante de árboles de vivero.

### Octubre-Noviembre
Siembra de especies forestales.
";

    pub const GANADERIA_MD: &str = "\
# Ganadería

## Mayo-Julio
Pastoreo intensivo y sombra para el ganado.

## Diciembre
Alimentación suplementaria y refugios.
";

    pub const AGROINDUSTRIA_MD: &str = "\
# Agroindustria

Procesamiento de manzana, lácteos y nuez.
";

    /// Document names paired with their fixture text.
    pub const SECTOR_DOCUMENTS: [(&str, &str); 4] = [
        ("durango-agricultura.md", AGRICULTURA_MD),
        ("durango-forestal.md", FORESTAL_MD),
        ("durango-ganaderia.md", GANADERIA_MD),
        ("durango-agroindustria.md", AGROINDUSTRIA_MD),
    ];

    pub fn sector_store() -> InMemoryDocumentStore {
        let store = InMemoryDocumentStore::new();
        for (name, text) in SECTOR_DOCUMENTS {
            store.insert(name, text);
        }
        store
    }

    pub fn topic() -> TopicStrategy {
        TopicStrategy {
            topic: "Riego por inundación -> Pudrición de raíz -> Cintilla de goteo".to_string(),
            problem_identified: "Exceso de agua en plántulas de chile".to_string(),
            angle: "riego".to_string(),
            urgency_level: "medium".to_string(),
            target_audience: "plant".to_string(),
        }
    }

    /// A strategy answer as the model returns it, with `search_needed` set.
    pub fn strategy_json(search_needed: bool) -> String {
        format!(
            r#"{{"post_type":"Infografías","tone":"Educational","channel":"ig-reel","search_needed":{},"preferred_category":"riego","search_keywords":"cintilla goteo"}}"#,
            search_needed
        )
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for surco inputs.

    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    pub const DAY_NAMES: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    pub const CHANNELS: [&str; 7] = [
        "fb-post",
        "ig-post",
        "tiktok",
        "wa-status",
        "fb-reel",
        "ig-reel",
        "wa-broadcast",
    ];

    /// A valid calendar month.
    pub fn arb_month() -> impl Strategy<Value = u32> {
        1u32..=12
    }

    pub fn arb_day_name() -> impl Strategy<Value = String> {
        prop::sample::select(DAY_NAMES.to_vec()).prop_map(str::to_string)
    }

    pub fn arb_channel() -> impl Strategy<Value = String> {
        prop::sample::select(CHANNELS.to_vec()).prop_map(str::to_string)
    }

    /// Recent channel history, possibly longer than the prompt shows.
    pub fn arb_recent_channels() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(arb_channel(), 0..10)
    }

    /// A date within 2024-2027.
    pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..(4 * 365)).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .map(|d| d + chrono::Duration::days(offset))
                .unwrap_or_default()
        })
    }

    pub fn arb_topic() -> impl Strategy<Value = TopicStrategy> {
        (
            "[A-Za-záéíóúñ ]{3,40}",
            "[A-Za-záéíóúñ ]{3,40}",
            prop::sample::select(vec!["riego", "fertilización", "plagas", "heladas"]),
            prop::sample::select(vec!["high", "medium", "low"]),
            prop::sample::select(vec!["plant", "animal", "forestry", "general"]),
        )
            .prop_map(|(topic, problem, angle, urgency, audience)| TopicStrategy {
                topic,
                problem_identified: problem,
                angle: angle.to_string(),
                urgency_level: urgency.to_string(),
                target_audience: audience.to_string(),
            })
    }

    pub fn arb_content_strategy() -> impl Strategy<Value = ContentStrategy> {
        (
            "[A-Za-z/ ]{3,20}",
            "[A-Za-z-]{3,15}",
            arb_channel(),
            any::<bool>(),
            proptest::option::of("[a-z]{3,12}"),
            proptest::option::of("[a-z ]{3,24}"),
        )
            .prop_map(
                |(post_type, tone, channel, search_needed, category, keywords)| ContentStrategy {
                    post_type,
                    tone,
                    channel,
                    search_needed,
                    preferred_category: category,
                    search_keywords: keywords,
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_store_counts_misses_too() {
        let store = CountingDocumentStore::empty();
        assert_eq!(store.read_document("missing.md").unwrap(), None);
        assert_eq!(store.reads(), 1);
        store.reset();
        assert_eq!(store.reads(), 0);
    }

    #[test]
    fn test_sector_fixtures_are_loaded() {
        let store = CountingDocumentStore::with_sector_fixtures();
        for (name, _) in fixtures::SECTOR_DOCUMENTS {
            assert!(store.read_document(name).unwrap().is_some());
        }
        assert_eq!(store.reads(), 4);
    }

    #[test]
    fn test_failing_store_always_errors() {
        let store = FailingDocumentStore::new();
        assert!(store.read_document("durango-forestal.md").is_err());
        assert_eq!(store.reads(), 1);
    }

    #[test]
    fn test_strategy_json_decodes() {
        let strategy: ContentStrategy =
            serde_json::from_str(&fixtures::strategy_json(true)).unwrap();
        assert!(strategy.search_needed);
        assert_eq!(strategy.channel, "ig-reel");
    }
}
