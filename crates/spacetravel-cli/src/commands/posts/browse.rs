//! Browse command implementation.
//!
//! Drives the "load more" controller from the terminal: the first page is
//! printed, then each further page as it loads.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use spacetravel_core::{
    HomePage, LoadOutcome, Notice, PostList, PostsPagination, SiteLocale, list_posts,
};

use crate::backend::CliContent;
use crate::cli::SiteArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Posts per page (defaults to the site page size)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,
}

fn print_posts(list: &PostList, locale: SiteLocale) -> Result<()> {
    let page = HomePage::new(list, locale, false).context("Failed to format posts")?;
    for item in &page.posts {
        output::post_entry(item);
    }
    Ok(())
}

pub async fn run(args: BrowseArgs, site: &SiteArgs) -> Result<()> {
    let config = site.site_config()?;
    let api = CliContent::from_config(&config).context("Failed to open content API")?;

    let page_size = args.page_size.unwrap_or(config.page_size);
    let first = list_posts(&api, &config, page_size, None)
        .await
        .context("Failed to list posts")?;

    print_posts(&first, config.locale)?;

    let notifier = |notice: Notice| output::error(notice.message());
    let pagination = PostsPagination::new(api, notifier, first);

    let mut pages = 1;
    while pagination.has_more() && args.max_pages.is_none_or(|max| pages < max) {
        let before = pagination.len();

        match pagination.load_more().await {
            LoadOutcome::Loaded { appended, skipped } => {
                pages += 1;
                tracing::debug!(appended, skipped, pages, "Page loaded");
                let state = pagination.snapshot();
                let fresh = PostList {
                    posts: state.posts[before..].to_vec(),
                    next_cursor: state.next_cursor,
                };
                print_posts(&fresh, config.locale)?;
            }
            LoadOutcome::Exhausted | LoadOutcome::Busy => break,
            LoadOutcome::Failed(e) => bail!("Stopped after {} page(s): {}", pages, e),
        }
    }

    let remaining = if pagination.has_more() {
        "more available"
    } else {
        "end of list"
    };
    eprintln!(
        "{}",
        format!("{} posts in {} page(s), {}", pagination.len(), pages, remaining).dimmed()
    );

    Ok(())
}
