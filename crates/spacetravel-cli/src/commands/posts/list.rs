//! List posts command implementation.

use anyhow::{Context, Result};
use clap::Args;

use spacetravel_core::{HomePage, list_posts};

use crate::backend::CliContent;
use crate::cli::SiteArgs;
use crate::output;
use crate::preview::storage;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Posts per page (defaults to the site page size)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Next-page cursor from a previous listing
    #[arg(long)]
    pub cursor: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, site: &SiteArgs) -> Result<()> {
    let config = site.site_config()?;
    let api = CliContent::from_config(&config).context("Failed to open content API")?;

    let page_size = args.page_size.unwrap_or(config.page_size);
    let list = list_posts(&api, &config, page_size, args.cursor.as_deref())
        .await
        .context("Failed to list posts")?;

    let preview = storage::active_ref(&config.api_url)?.is_some();
    let home = HomePage::new(&list, config.locale, preview).context("Failed to format posts")?;

    output::props(&home, args.pretty)
}
