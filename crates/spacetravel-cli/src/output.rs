//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use spacetravel_core::posts::PostListItem;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as JSON, pretty-printed on request.
pub fn props<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty { json_pretty(value) } else { json(value) }
}

/// Print one post list entry as a human-readable block.
pub fn post_entry(item: &PostListItem) {
    println!("{}", item.post.title.bold());
    println!("{}", item.post.subtitle);
    let date = item.published_at.as_deref().unwrap_or("unpublished");
    println!(
        "{}  {}  {}",
        date.dimmed(),
        item.post.author.dimmed(),
        item.post.uid.as_deref().unwrap_or("-").cyan()
    );
    println!();
}
