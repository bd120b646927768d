//! Core traits for content access and user notification.

mod content_api;
mod notifier;

pub use content_api::ContentApi;
pub use notifier::{Notice, Notifier};
