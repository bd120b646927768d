//! Post subcommand implementations.

mod browse;
mod get;
mod list;
mod paths;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::SiteArgs;

#[derive(Args, Debug)]
pub struct PostsCommand {
    #[command(subcommand)]
    pub command: PostsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PostsSubcommand {
    /// Print the home page props (first page of posts)
    List(list::ListArgs),

    /// Print the page props of one post
    Get(get::GetArgs),

    /// Print every post slug, one per line
    Paths(paths::PathsArgs),

    /// Page through the post list with "load more"
    Browse(browse::BrowseArgs),
}

pub async fn handle(cmd: PostsCommand, site: &SiteArgs) -> Result<()> {
    match cmd.command {
        PostsSubcommand::List(args) => list::run(args, site).await,
        PostsSubcommand::Get(args) => get::run(args, site).await,
        PostsSubcommand::Paths(args) => paths::run(args, site).await,
        PostsSubcommand::Browse(args) => browse::run(args, site).await,
    }
}
