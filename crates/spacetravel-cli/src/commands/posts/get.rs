//! Get post command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use spacetravel_core::{ContentRef, get_post};

use crate::backend::CliContent;
use crate::cli::SiteArgs;
use crate::output;
use crate::preview::storage;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Post slug (the document uid)
    pub slug: String,

    /// Read the post from this content ref instead of the published content
    #[arg(long = "ref")]
    pub content_ref: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, site: &SiteArgs) -> Result<()> {
    let config = site.site_config()?;
    let api = CliContent::from_config(&config).context("Failed to open content API")?;

    let preview_ref = match args.content_ref {
        Some(r) => Some(ContentRef::new(r)),
        None => storage::active_ref(&config.api_url)?,
    };
    if let Some(r) = &preview_ref {
        debug!(content_ref = %r, "Reading post in preview mode");
    }

    let page = match get_post(&api, &config, &args.slug, preview_ref.as_ref()).await {
        Ok(page) => page,
        Err(e) if e.is_not_found() => bail!("post not found: {}", args.slug),
        Err(e) => return Err(e).context(format!("Failed to load post '{}'", args.slug)),
    };

    output::props(&page, args.pretty)
}
