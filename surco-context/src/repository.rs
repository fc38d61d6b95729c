//! Context Repository
//!
//! Loads the four sector documents, derives month-relevant excerpts and keeps
//! the result in two bounded caches, one per mode.

use crate::cache::BoundedCache;
use crate::documents::DocumentStore;
use crate::fallback::fallback_context;
use crate::sections::{month_excerpt, stats_excerpt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use surco_core::DocumentError;

// ============================================================================
// SECTORS
// ============================================================================

/// One seasonal reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub key: &'static str,
    /// Uppercase label prefixed to the sector's excerpt
    pub label: &'static str,
    pub document: &'static str,
    /// Prepend the statistics excerpt in summary mode
    pub with_stats: bool,
}

/// Sectors in output order. Agriculture is the primary sector.
pub const SECTORS: [Sector; 4] = [
    Sector {
        key: "agricultura",
        label: "AGRICULTURA DURANGO",
        document: "durango-agricultura.md",
        with_stats: true,
    },
    Sector {
        key: "forestal",
        label: "FORESTAL DURANGO",
        document: "durango-forestal.md",
        with_stats: false,
    },
    Sector {
        key: "ganaderia",
        label: "GANADERÍA DURANGO",
        document: "durango-ganaderia.md",
        with_stats: false,
    },
    Sector {
        key: "agroindustria",
        label: "AGROINDUSTRIA DURANGO",
        document: "durango-agroindustria.md",
        with_stats: false,
    },
];

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Whether to excerpt documents for the month or use them whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    Summary,
    Full,
}

impl ContextMode {
    pub fn from_summarize(summarize: bool) -> Self {
        if summarize {
            Self::Summary
        } else {
            Self::Full
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Full => "full",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Entries per mode; one per calendar month by default
    pub cache_capacity: usize,
    /// Characters kept from each sector excerpt
    pub excerpt_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 12,
            excerpt_chars: 800,
        }
    }
}

// ============================================================================
// REPOSITORY
// ============================================================================

/// Month-keyed sector context with bounded caching.
///
/// Never fails outwardly: read errors and missing documents degrade to the
/// built-in month fallback.
pub struct ContextRepository {
    store: Arc<dyn DocumentStore>,
    config: ContextConfig,
    summary_cache: BoundedCache<u32, String>,
    full_cache: BoundedCache<u32, String>,
}

impl ContextRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(store, ContextConfig::default())
    }

    pub fn with_config(store: Arc<dyn DocumentStore>, config: ContextConfig) -> Self {
        Self {
            store,
            summary_cache: BoundedCache::new(config.cache_capacity),
            full_cache: BoundedCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Context for `month` (1..=12), summarized or full.
    pub fn load_context(&self, month: u32, summarize: bool) -> String {
        self.load(month, ContextMode::from_summarize(summarize))
    }

    /// Context for `month` (1..=12) in the given mode.
    ///
    /// Months outside 1..=12 yield an empty string and are never cached.
    pub fn load(&self, month: u32, mode: ContextMode) -> String {
        if !(1..=12).contains(&month) {
            tracing::warn!(month, "Context requested for invalid month");
            return String::new();
        }

        let cache = self.cache(mode);
        if let Some(cached) = cache.get(&month) {
            tracing::debug!(month, mode = mode.as_str(), "Context cache hit");
            return cached;
        }

        match self.compose(month, mode) {
            Ok(context) => {
                let cached = cache.insert(month, context.clone());
                tracing::debug!(
                    month,
                    mode = mode.as_str(),
                    cached,
                    length = context.len(),
                    "Context computed"
                );
                context
            }
            Err(e) => {
                tracing::error!(month, mode = mode.as_str(), error = %e, "Error loading sector context");
                fallback_context(month).to_string()
            }
        }
    }

    /// Months currently cached for a mode.
    pub fn cached_months(&self, mode: ContextMode) -> Vec<u32> {
        let mut months = self.cache(mode).keys();
        months.sort_unstable();
        months
    }

    pub fn is_cached(&self, month: u32, mode: ContextMode) -> bool {
        self.cache(mode).contains(&month)
    }

    fn cache(&self, mode: ContextMode) -> &BoundedCache<u32, String> {
        match mode {
            ContextMode::Summary => &self.summary_cache,
            ContextMode::Full => &self.full_cache,
        }
    }

    fn compose(&self, month: u32, mode: ContextMode) -> Result<String, DocumentError> {
        let mut parts = Vec::with_capacity(SECTORS.len());

        for sector in &SECTORS {
            let Some(raw) = self.store.read_document(sector.document)? else {
                tracing::debug!(document = sector.document, "Sector document missing, skipping");
                continue;
            };

            let excerpt = match mode {
                ContextMode::Full => raw,
                ContextMode::Summary => summarize_sector(sector, &raw, month),
            };

            if !excerpt.trim().is_empty() {
                parts.push(format!(
                    "{}:\n{}",
                    sector.label,
                    truncate_excerpt(&excerpt, self.config.excerpt_chars)
                ));
            }
        }

        if parts.is_empty() {
            tracing::info!(month, "No sector content available, using built-in context");
            return Ok(fallback_context(month).to_string());
        }

        Ok(parts.join("\n\n"))
    }
}

impl std::fmt::Debug for ContextRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextRepository")
            .field("config", &self.config)
            .field("summary_cache", &self.summary_cache)
            .field("full_cache", &self.full_cache)
            .finish()
    }
}

fn summarize_sector(sector: &Sector, raw: &str, month: u32) -> String {
    let section = month_excerpt(raw, month);
    if !sector.with_stats {
        return section;
    }

    let stats = stats_excerpt(raw);
    match (stats.is_empty(), section.is_empty()) {
        (true, _) => section,
        (false, true) => stats,
        (false, false) => format!("{}\n\n{}", stats, section),
    }
}

/// First `max_chars` characters followed by an ellipsis marker.
fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
