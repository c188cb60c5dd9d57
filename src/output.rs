//! Colored status lines for the console.

use console::style;

/// Kind of status message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
}

impl MessageKind {
    /// Uncolored prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Info => "[*]",
            Self::Success => "[+]",
            Self::Warning => "[!]",
        }
    }
}

/// Decorate `message` with the colored prefix for `kind`.
pub fn status_line(kind: MessageKind, message: impl AsRef<str>) -> String {
    let prefix = match kind {
        MessageKind::Info => style(kind.prefix()).blue(),
        MessageKind::Success => style(kind.prefix()).green(),
        MessageKind::Warning => style(kind.prefix()).yellow(),
    };
    format!("{} {}", prefix, message.as_ref())
}
