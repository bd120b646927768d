//! Post paths command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use spacetravel_core::post_slugs;

use crate::backend::CliContent;
use crate::cli::SiteArgs;

#[derive(Args, Debug)]
pub struct PathsArgs {}

pub async fn run(_args: PathsArgs, site: &SiteArgs) -> Result<()> {
    let config = site.site_config()?;
    let api = CliContent::from_config(&config).context("Failed to open content API")?;

    let slugs = post_slugs(&api, &config)
        .await
        .context("Failed to list post slugs")?;

    if slugs.is_empty() {
        eprintln!("{}", "No posts found.".dimmed());
        return Ok(());
    }

    for slug in &slugs {
        println!("{}", slug);
    }

    Ok(())
}
