//! Enter preview command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use spacetravel_core::ContentRef;
use spacetravel_file::FileContentApi;

use crate::cli::SiteArgs;
use crate::output;
use crate::preview::{StoredPreview, storage};

#[derive(Args, Debug)]
pub struct EnterArgs {
    /// Content ref of the release or draft to preview
    #[arg(value_name = "REF")]
    pub content_ref: String,
}

pub async fn run(args: EnterArgs, site: &SiteArgs) -> Result<()> {
    let content_ref = ContentRef::new(args.content_ref);
    let api = site.api_url()?;

    // Local content directories can be checked up front.
    if let Some(api) = api.as_ref().filter(|a| a.is_local()) {
        let content = FileContentApi::new(api.clone()).context("Failed to open content directory")?;
        if !content
            .store()
            .has_preview(&content_ref)
            .context("Invalid preview ref")?
        {
            bail!("no preview revision named '{}' in {}", content_ref, api);
        }
    }

    let preview = StoredPreview::new(content_ref, api.as_ref());
    storage::save_preview(&preview).context("Failed to save preview")?;

    output::success("Preview mode on");
    output::field("Ref", preview.content_ref.as_str());
    if let Some(api) = &preview.api {
        output::field("API", api);
    }

    Ok(())
}
