//! `newsfeed-demo` -- drives the synthetic article feed from the command line.
//!
//! Plays the part of a list collaborator: loads the initial page, appends
//! and prepends pages as a scrolling list would, then computes the refresh
//! key it would reload from after an invalidation. Each page is printed to
//! stdout as a JSON line.
//!
//! # Environment variables
//!
//! | Variable               | Default | Description                          |
//! |------------------------|---------|--------------------------------------|
//! | `PAGING_STARTING_KEY`  | `0`     | Key of the first page                |
//! | `PAGING_LOAD_DELAY_MS` | `3000`  | Simulated latency for later pages    |
//! | `PAGING_PAGE_SIZE`     | `20`    | Items per append/prepend load        |
//! | `DEMO_APPEND_PAGES`    | `2`     | Pages appended after the first load  |

use anyhow::Context;
use newsfeed_core::article::Article;
use newsfeed_core::article_source::ArticlePagingSource;
use newsfeed_core::config::{parse_var, ArticleSourceConfig};
use newsfeed_core::paging::{LoadParams, Page, PagingConfig, PagingSource, PagingState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PAGE_SIZE: i64 = 20;
const DEFAULT_APPEND_PAGES: usize = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsfeed_demo=info,newsfeed_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let lookup = |name: &str| std::env::var(name).ok();
    let config = ArticleSourceConfig::from_vars(lookup).context("invalid paging configuration")?;
    let page_size: i64 = parse_var(&lookup, "PAGING_PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE);
    let append_pages: usize =
        parse_var(&lookup, "DEMO_APPEND_PAGES")?.unwrap_or(DEFAULT_APPEND_PAGES);

    let paging = PagingConfig::new(page_size);
    let source = ArticlePagingSource::new(config, chrono::Utc::now());

    tracing::info!(
        starting_key = source.config().starting_key,
        load_delay_ms = source.config().load_delay.as_millis() as u64,
        page_size,
        append_pages,
        "Starting newsfeed-demo",
    );

    let mut pages: Vec<Page<Article>> = Vec::new();

    let first = source
        .load(LoadParams::refresh(None, paging.initial_load_size))
        .await?;
    emit(&first)?;
    pages.push(first);

    for _ in 0..append_pages {
        let Some(next_key) = pages.last().and_then(|p| p.next_key) else {
            break;
        };
        tracing::info!(next_key, "Appending page");
        let page = source.load(LoadParams::append(next_key, page_size)).await?;
        emit(&page)?;
        pages.push(page);
    }

    // Scroll back one page from the end.
    if let Some(prev_key) = pages.last().and_then(|p| p.prev_key) {
        tracing::info!(prev_key, "Prepending page");
        let page = source.load(LoadParams::prepend(prev_key, page_size)).await?;
        emit(&page)?;
    }

    // Anchor in the middle of everything loaded.
    let loaded: usize = pages.iter().map(Page::len).sum();
    let anchor_position = loaded.checked_sub(1).map(|last| last / 2);
    let state = PagingState::new(pages, anchor_position, paging);

    let refresh_key = source.get_refresh_key(&state);
    tracing::info!(?anchor_position, ?refresh_key, "Computed refresh key");

    let reloaded = source
        .load(LoadParams::refresh(refresh_key, paging.initial_load_size))
        .await?;
    emit(&reloaded)?;

    Ok(())
}

/// Print a page as one JSON line.
fn emit(page: &Page<Article>) -> anyhow::Result<()> {
    let line = serde_json::to_string(page).context("failed to serialize page")?;
    println!("{line}");
    Ok(())
}
