//! Exit preview command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::preview::storage;

#[derive(Args, Debug)]
pub struct ExitArgs {}

pub async fn run(_args: ExitArgs) -> Result<()> {
    if storage::clear_preview().context("Failed to clear preview")? {
        output::success("Preview mode off");
    } else {
        eprintln!("{}", "Preview mode was not active.".dimmed());
    }
    Ok(())
}
