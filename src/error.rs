use thiserror::Error;

/// Failures raised by menu lookup, item resolution and prompt setup.
///
/// Input mistakes made by the user never show up here: they are retried
/// inside the prompt loops. Everything in this enum is fatal to the
/// operation that raised it and bubbles out to the caller of
/// `display_menu` (wrapped in an `anyhow::Error`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// A blank or missing argument, e.g. an empty menu name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The normalized menu name has no registered items.
    #[error("{0} not found!")]
    NotFound(String),

    /// An item could not be resolved, constructed or does not behave like a menu item,
    /// or a prompt was configured without any valid answers.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl MenuError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(menu_name: impl Into<String>) -> Self {
        Self::NotFound(menu_name.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
