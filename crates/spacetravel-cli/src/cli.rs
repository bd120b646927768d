//! CLI argument definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use spacetravel_core::config::DEFAULT_DOCUMENT_TYPE;
use spacetravel_core::{AccessToken, ApiUrl, CommentsConfig, DocumentType, SiteConfig, SiteLocale};

use crate::commands::posts::PostsCommand;
use crate::commands::preview::PreviewCommand;

/// Page props for the spacetravelling blog.
#[derive(Parser, Debug)]
#[command(name = "spacetravelling")]
#[command(author, version = env!("SPACETRAVEL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub site: SiteArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Blog post pages
    Posts(PostsCommand),

    /// Preview mode for unpublished content
    Preview(PreviewCommand),
}

/// Site settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Content API root (https://..., or file:// for a local content directory)
    #[arg(long, env = "SPACETRAVEL_API", global = true)]
    pub api: Option<String>,

    /// Access token for a private repository
    #[arg(long, env = "SPACETRAVEL_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,

    /// Display locale for dates (pt-BR or en-US)
    #[arg(long, env = "SPACETRAVEL_LOCALE", default_value = "pt-BR", global = true)]
    pub locale: String,

    /// Custom type holding the posts
    #[arg(long, env = "SPACETRAVEL_DOCUMENT_TYPE", default_value = DEFAULT_DOCUMENT_TYPE, global = true)]
    pub document_type: String,

    /// GitHub repository (owner/name) holding post comments
    #[arg(long, env = "SPACETRAVEL_COMMENTS_REPO", global = true)]
    pub comments_repo: Option<String>,
}

impl SiteArgs {
    /// The configured API root, if any.
    pub fn api_url(&self) -> Result<Option<ApiUrl>> {
        self.api
            .as_deref()
            .map(|api| ApiUrl::new(api).context("Invalid content API URL"))
            .transpose()
    }

    /// Build the site configuration. Requires an API root.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let api_url = self
            .api_url()?
            .context("No content API configured. Pass --api or set SPACETRAVEL_API.")?;
        let document_type =
            DocumentType::new(&self.document_type).context("Invalid document type")?;
        let locale: SiteLocale = self.locale.parse().context("Invalid locale")?;

        Ok(SiteConfig::new(api_url, document_type)
            .with_access_token(self.access_token.clone().map(AccessToken::new))
            .with_locale(locale)
            .with_comments(self.comments_repo.clone().map(CommentsConfig::utterances)))
    }
}
