//! User-visible notifications.

use std::fmt;

/// A notice raised for the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An incremental page load failed. The list is unchanged.
    LoadMoreFailed,
}

impl Notice {
    /// The message shown to the reader.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::LoadMoreFailed => "more posts could not be loaded",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives notices for display.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<F> Notifier for F
where
    F: Fn(Notice) + Send + Sync,
{
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}
