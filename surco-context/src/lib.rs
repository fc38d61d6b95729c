//! surco Context - Seasonal Sector Context
//!
//! Builds the month-relevant excerpt of the regional sector documents that is
//! fed to post generation, and caches it per month for the process lifetime.

pub mod cache;
pub mod documents;
pub mod fallback;
pub mod repository;
pub mod sections;

pub use cache::BoundedCache;
pub use documents::{DocumentStore, FsDocumentStore, InMemoryDocumentStore};
pub use fallback::fallback_context;
pub use repository::{ContextConfig, ContextMode, ContextRepository, Sector, SECTORS};
pub use sections::{
    cycles_excerpt, month_excerpt, month_tokens, stats_excerpt, Boundary, LineFilter,
    SectionRule, CYCLES_MAX_LINES, GENERIC_SECTOR_PLACEHOLDER, STATS_KEYWORDS, STATS_MAX_LINES,
};
