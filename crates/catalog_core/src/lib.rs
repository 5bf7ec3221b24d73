use std::{cmp::Ordering, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{CategoryInfo, Product, SectionSummary},
    protocol::{CategoryProductsResponse, FeaturedProductsResponse},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

pub mod carousel;
pub mod config;
pub mod http;

pub use carousel::{hero_slides, orbit_offset, CarouselScheduler, Slide};
pub use config::{load_settings, Settings};
pub use http::HttpCatalogSource;

pub const DEFAULT_FEATURED_LIMIT: u32 = 8;
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// The raw-data supplier behind the query engine. Implementations talk to
/// the real backend ([`HttpCatalogSource`]) or stand in for it in tests.
#[async_trait]
pub trait CatalogDataSource: Send + Sync {
    async fn featured_products(&self, limit: u32) -> Result<FeaturedProductsResponse>;
    async fn products_by_category(&self, slug: &str) -> Result<CategoryProductsResponse>;
    async fn sections(&self) -> Result<Vec<SectionSummary>>;
}

/// What the engine fetches: the home page's featured strip or one
/// category's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryContext {
    Featured { limit: u32 },
    Category { slug: String },
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::Featured {
            limit: DEFAULT_FEATURED_LIMIT,
        }
    }
}

/// Price filter. Bounds are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PriceRange {
    #[default]
    All,
    Between { min: f64, max: f64 },
    AtLeast { min: f64 },
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        match *self {
            Self::All => true,
            Self::Between { min, max } => price >= min && price <= max,
            Self::AtLeast { min } => price >= min,
        }
    }

    /// The ladder offered by the storefront's filter bar.
    pub fn presets() -> [Self; 5] {
        [
            Self::All,
            Self::Between { min: 0.0, max: 500.0 },
            Self::Between { min: 500.0, max: 1000.0 },
            Self::Between { min: 1000.0, max: 5000.0 },
            Self::AtLeast { min: 5000.0 },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Preserve the order the backend returned.
    #[default]
    Default,
    PriceLowToHigh,
    PriceHighToLow,
    NameAscending,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QueryCriteria {
    pub price_range: PriceRange,
    pub sort_key: SortKey,
}

/// What the view renders. While `is_loading` is true, `items` still holds
/// the previous completed result (empty before the first fetch lands).
#[derive(Debug, Clone, Default)]
pub struct ResultsSnapshot {
    pub items: Vec<Product>,
    pub is_loading: bool,
    pub category_info: CategoryInfo,
}

#[derive(Debug, Clone)]
pub enum CatalogEvent {
    ResultsUpdated,
    FetchFailed { detail: String },
}

/// Filter then sort, locally and deterministically. Sorting is stable, so
/// ties keep the backend's relative order and re-applying the same criteria
/// to the same input always reproduces the same sequence.
pub fn apply_criteria(items: &[Product], criteria: &QueryCriteria) -> Vec<Product> {
    let mut out: Vec<Product> = items
        .iter()
        .filter(|product| criteria.price_range.contains(product.price))
        .cloned()
        .collect();
    match criteria.sort_key {
        SortKey::Default => {}
        SortKey::PriceLowToHigh => out.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHighToLow => out.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::NameAscending => out.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    out
}

// Case-insensitive first, raw byte order as the tiebreak so equal-folded
// titles still sort deterministically.
fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded == Ordering::Equal {
        a.cmp(b)
    } else {
        folded
    }
}

#[derive(Default)]
struct BrowserState {
    context: QueryContext,
    criteria: QueryCriteria,
    /// Last successfully fetched collection; may be stale while a refetch
    /// is in flight.
    raw_items: Vec<Product>,
    items: Vec<Product>,
    category_info: CategoryInfo,
    is_loading: bool,
    /// Bumped on every initiated fetch; a completion whose token no longer
    /// matches is discarded (last context wins, not last completion).
    fetch_generation: u64,
}

/// Client-side catalog query engine.
///
/// Owns the fetch lifecycle and the user-selected criteria; filtering and
/// sorting always happen locally against the cached raw collection. Fetch
/// failures never surface as errors: the engine falls back to an empty
/// result with default category info and reports through the event channel
/// and the log, so the view always stays renderable.
pub struct CatalogBrowser {
    source: Arc<dyn CatalogDataSource>,
    inner: Mutex<BrowserState>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogBrowser {
    pub fn new(source: Arc<dyn CatalogDataSource>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source,
            inner: Mutex::new(BrowserState::default()),
            events,
        }
    }

    /// Declares what to fetch. Invalidates the cached collection and kicks
    /// off a refetch; any fetch still in flight for the previous context
    /// will be discarded when it completes.
    pub async fn set_context(&self, context: QueryContext) {
        {
            let mut inner = self.inner.lock().await;
            inner.context = context;
            inner.raw_items.clear();
            inner.items.clear();
            inner.category_info = CategoryInfo::default();
        }
        self.refresh().await;
    }

    /// Updates the price filter and recomputes from the cached collection.
    /// Local only; the data source is not re-hit.
    pub async fn set_price_range(&self, range: PriceRange) {
        let mut inner = self.inner.lock().await;
        inner.criteria.price_range = range;
        inner.items = apply_criteria(&inner.raw_items, &inner.criteria);
        drop(inner);
        let _ = self.events.send(CatalogEvent::ResultsUpdated);
    }

    /// Updates the sort key and recomputes from the cached collection.
    pub async fn set_sort_key(&self, key: SortKey) {
        let mut inner = self.inner.lock().await;
        inner.criteria.sort_key = key;
        inner.items = apply_criteria(&inner.raw_items, &inner.criteria);
        drop(inner);
        let _ = self.events.send(CatalogEvent::ResultsUpdated);
    }

    /// Fetches raw data for the current context, then applies the current
    /// criteria. The lock is never held across the fetch await, and only
    /// the most recently initiated fetch may commit its response.
    pub async fn refresh(&self) {
        let (context, generation) = {
            let mut inner = self.inner.lock().await;
            inner.fetch_generation += 1;
            inner.is_loading = true;
            (inner.context.clone(), inner.fetch_generation)
        };

        let outcome = self.fetch_raw(&context).await;

        let mut inner = self.inner.lock().await;
        if inner.fetch_generation != generation {
            // A newer fetch was initiated while this one was in flight; it
            // owns is_loading and the committed state now.
            debug!(generation, current = inner.fetch_generation, "discarding stale catalog fetch");
            return;
        }
        match outcome {
            Ok((products, category_info)) => {
                inner.raw_items = products;
                inner.category_info = category_info;
            }
            Err(err) => {
                warn!(?context, error = %err, "catalog fetch failed, serving empty fallback");
                inner.raw_items = Vec::new();
                inner.category_info = CategoryInfo::default();
                let _ = self.events.send(CatalogEvent::FetchFailed {
                    detail: err.to_string(),
                });
            }
        }
        inner.items = apply_criteria(&inner.raw_items, &inner.criteria);
        inner.is_loading = false;
        drop(inner);
        let _ = self.events.send(CatalogEvent::ResultsUpdated);
    }

    async fn fetch_raw(&self, context: &QueryContext) -> Result<(Vec<Product>, CategoryInfo)> {
        match context {
            QueryContext::Featured { limit } => {
                let response = self.source.featured_products(*limit).await?;
                Ok((response.products, CategoryInfo::default()))
            }
            QueryContext::Category { slug } => {
                let response = self.source.products_by_category(slug).await?;
                let info = response.section.map(CategoryInfo::from).unwrap_or_default();
                Ok((response.products, info))
            }
        }
    }

    pub async fn snapshot(&self) -> ResultsSnapshot {
        let inner = self.inner.lock().await;
        ResultsSnapshot {
            items: inner.items.clone(),
            is_loading: inner.is_loading,
            category_info: inner.category_info.clone(),
        }
    }

    pub async fn criteria(&self) -> QueryCriteria {
        self.inner.lock().await.criteria
    }

    pub async fn context(&self) -> QueryContext {
        self.inner.lock().await.context.clone()
    }

    /// Pass-through for the navigation chrome; not part of the fetch
    /// lifecycle, so errors propagate to the caller here.
    pub async fn sections(&self) -> Result<Vec<SectionSummary>> {
        self.source.sections().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
