//! Keyed, bidirectional paging contract.
//!
//! A list collaborator drives a [`PagingSource`] through exactly two calls:
//! [`PagingSource::load`] to fetch a page for a key, and
//! [`PagingSource::get_refresh_key`] to pick where to resume after the loaded
//! data has been invalidated. Caching and merging pages across calls is the
//! collaborator's job; it hands its snapshot back as a [`PagingState`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::PagingKey;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Why the collaborator is asking for a page.
///
/// Sources compute the same page regardless of direction; the type is
/// carried for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadType {
    /// Initial load, or reload after invalidation.
    Refresh,
    /// Loading the page after the last loaded one.
    Append,
    /// Loading the page before the first loaded one.
    Prepend,
}

/// A single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams {
    /// Key of the page to load. `None` only on the first load of a session.
    pub key: Option<PagingKey>,
    /// Requested number of items. Must be positive.
    pub load_size: i64,
    pub load_type: LoadType,
}

impl LoadParams {
    pub fn refresh(key: Option<PagingKey>, load_size: i64) -> Self {
        Self {
            key,
            load_size,
            load_type: LoadType::Refresh,
        }
    }

    pub fn append(key: PagingKey, load_size: i64) -> Self {
        Self {
            key: Some(key),
            load_size,
            load_type: LoadType::Append,
        }
    }

    pub fn prepend(key: PagingKey, load_size: i64) -> Self {
        Self {
            key: Some(key),
            load_size,
            load_type: LoadType::Prepend,
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// One batch of items plus the keys of the adjacent batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<V> {
    pub data: Vec<V>,
    /// Key of the page before this one; `None` at the start of the sequence.
    pub prev_key: Option<PagingKey>,
    /// Key of the page after this one; `None` at the end of the sequence.
    pub next_key: Option<PagingKey>,
}

impl<V> Page<V> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Collaborator state
// ---------------------------------------------------------------------------

/// Page sizing the collaborator was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Items per append/prepend load.
    pub page_size: i64,
    /// Items requested by the first refresh load.
    pub initial_load_size: i64,
}

impl PagingConfig {
    /// Config with the conventional initial load of three pages.
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size,
            initial_load_size: page_size.saturating_mul(3),
        }
    }
}

/// Snapshot of what the collaborator has loaded so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingState<V> {
    /// Loaded pages in list order.
    pub pages: Vec<Page<V>>,
    /// List position closest to what the user last viewed.
    pub anchor_position: Option<usize>,
    pub config: PagingConfig,
    /// Unloaded positions in the list before the first loaded item.
    pub leading_placeholder_count: usize,
}

impl<V> PagingState<V> {
    pub fn new(pages: Vec<Page<V>>, anchor_position: Option<usize>, config: PagingConfig) -> Self {
        Self {
            pages,
            anchor_position,
            config,
            leading_placeholder_count: 0,
        }
    }

    pub fn with_leading_placeholders(mut self, count: usize) -> Self {
        self.leading_placeholder_count = count;
        self
    }

    /// True when no page holds any item.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    /// Loaded item closest to a list `position`.
    ///
    /// Positions before the first loaded item resolve to the first item,
    /// positions past the last resolve to the last. `None` if nothing is
    /// loaded.
    pub fn closest_item_to_position(&self, position: usize) -> Option<&V> {
        let mut remaining = position.saturating_sub(self.leading_placeholder_count);
        let mut last = None;

        for page in self.pages.iter().filter(|p| !p.is_empty()) {
            if remaining < page.len() {
                return page.data.get(remaining);
            }
            remaining -= page.len();
            last = page.data.last();
        }

        last
    }

    /// Page containing `position`, clamped to the first/last non-empty
    /// page like [`closest_item_to_position`](Self::closest_item_to_position).
    pub fn closest_page_to_position(&self, position: usize) -> Option<&Page<V>> {
        let mut remaining = position.saturating_sub(self.leading_placeholder_count);
        let mut last = None;

        for page in self.pages.iter().filter(|p| !p.is_empty()) {
            if remaining < page.len() {
                return Some(page);
            }
            remaining -= page.len();
            last = Some(page);
        }

        last
    }
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// A keyed source of pages.
#[async_trait]
pub trait PagingSource: Send + Sync {
    type Value: Send;

    /// Load the page for `params`.
    async fn load(&self, params: LoadParams) -> Result<Page<Self::Value>, CoreError>;

    /// Key to reload from after invalidation, or `None` to restart from
    /// the beginning.
    fn get_refresh_key(&self, state: &PagingState<Self::Value>) -> Option<PagingKey>;
}
