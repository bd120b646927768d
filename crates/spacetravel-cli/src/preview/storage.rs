//! Preview storage for persisting preview mode between runs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use spacetravel_core::{ApiUrl, ContentRef};

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "SPACETRAVEL_DATA_DIR";

/// An active preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreview {
    /// Revision to read posts from.
    #[serde(rename = "ref")]
    pub content_ref: ContentRef,
    /// API root the preview was entered for. `None` applies to any API.
    #[serde(default)]
    pub api: Option<String>,
    pub entered_at: DateTime<Utc>,
}

impl StoredPreview {
    pub fn new(content_ref: ContentRef, api: Option<&ApiUrl>) -> Self {
        Self {
            content_ref,
            api: api.map(|a| a.root().to_string()),
            entered_at: Utc::now(),
        }
    }

    /// Returns true if this preview was entered for `api`.
    pub fn applies_to(&self, api: &ApiUrl) -> bool {
        self.api.as_deref().is_none_or(|root| root == api.root())
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let dirs = ProjectDirs::from("", "", "spacetravelling")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Get the preview file path.
fn preview_path() -> Result<PathBuf> {
    let data_dir = data_dir()?;
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
    Ok(data_dir.join("preview.json"))
}

/// Save a preview to disk.
pub fn save_preview(preview: &StoredPreview) -> Result<()> {
    let path = preview_path()?;
    let json = serde_json::to_string_pretty(preview)?;
    fs::write(&path, json).context("Failed to write preview file")?;
    Ok(())
}

/// Load the active preview, if any.
pub fn load_preview() -> Result<Option<StoredPreview>> {
    let path = preview_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read preview file")?;
    let preview = serde_json::from_str(&json).context("Invalid preview file")?;
    Ok(Some(preview))
}

/// The active preview ref for `api`, if one applies.
pub fn active_ref(api: &ApiUrl) -> Result<Option<ContentRef>> {
    Ok(load_preview()?
        .filter(|p| p.applies_to(api))
        .map(|p| p.content_ref))
}

/// Clear the stored preview. Returns true if one was active.
pub fn clear_preview() -> Result<bool> {
    let path = preview_path()?;

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path).context("Failed to remove preview file")?;
    Ok(true)
}
