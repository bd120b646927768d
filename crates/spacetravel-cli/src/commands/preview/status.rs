//! Preview status command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::preview::storage;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the stored preview as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let preview = storage::load_preview().context("Failed to load preview")?;

    if args.json {
        return output::json(&preview);
    }

    match preview {
        Some(preview) => {
            output::field("Ref", preview.content_ref.as_str());
            output::field("API", preview.api.as_deref().unwrap_or("any"));
            output::field("Since", &preview.entered_at.to_rfc3339());
        }
        None => println!("{}", "Not in preview mode.".dimmed()),
    }

    Ok(())
}
