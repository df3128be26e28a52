//! `newsfeed-core` -- synthetic article paging.
//!
//! Pure domain logic with zero internal deps: the article record, the
//! two-call paging contract consumed by list collaborators, and the
//! [`ArticlePagingSource`](article_source::ArticlePagingSource) that
//! synthesizes pages in closed form from the requested key.

pub mod article;
pub mod article_source;
pub mod config;
pub mod delay;
pub mod error;
pub mod paging;
pub mod types;
