//! The article record served by the synthetic feed.
//!
//! Every field is a pure function of the article id and the feed's fixed
//! reference time, so two calls with the same id never disagree.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// A single feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Position in the zero-based, unbounded article sequence.
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Creation time; one day earlier for each step up in `id`.
    pub created: Timestamp,
}

impl Article {
    /// Build the article at position `id`, dated relative to
    /// `first_article_created_time`.
    ///
    /// Fails only when the creation date would fall outside what
    /// [`Timestamp`] can represent (ids in the tens of millions).
    pub fn synthesize(id: i64, first_article_created_time: Timestamp) -> Result<Self, CoreError> {
        let created = TimeDelta::try_days(id)
            .and_then(|age| first_article_created_time.checked_sub_signed(age))
            .ok_or(CoreError::TimestampOutOfRange { id })?;

        Ok(Self {
            id,
            title: format!("Article {id}"),
            description: format!("This describes article {id}"),
            created,
        })
    }
}
