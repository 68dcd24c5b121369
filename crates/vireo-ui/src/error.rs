//! Error taxonomy for widget operations.
//!
//! Public widget and context methods never return these: a GUI must keep
//! running when a caller passes a stale id, so they degrade to `false` or
//! `None`. Internal helpers use [`UiResult`] so the reason can be logged at
//! the point where it is discarded.

use std::fmt;

use crate::items::ItemId;
use crate::widget::WidgetId;

/// Errors produced by fallible widget helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    /// No widget with this id exists in the context.
    UnknownWidget {
        /// The id that was looked up.
        id: WidgetId,
    },

    /// No item with this id exists in the collection.
    UnknownItem {
        /// The id that was looked up.
        id: ItemId,
    },

    /// The widget exists but is not of the requested kind.
    WrongKind {
        /// The id that was looked up.
        id: WidgetId,
        /// The Rust type that was requested.
        expected: &'static str,
    },

    /// An argument was rejected (e.g. a widget made its own ancestor).
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// An index was past the end of a collection.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The collection length.
        len: usize,
    },

    /// Edited text could not be parsed into the property's type.
    Parse {
        /// The rejected input.
        input: String,
        /// The expected type, e.g. "integer".
        expected: &'static str,
    },
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::UnknownWidget { id } => write!(f, "Unknown widget: {}", id),
            UiError::UnknownItem { id } => write!(f, "Unknown item: {}", id),
            UiError::WrongKind { id, expected } => {
                write!(f, "Widget {} is not a {}", id, expected)
            }
            UiError::InvalidArgument { reason } => write!(f, "Invalid argument: {}", reason),
            UiError::OutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            UiError::Parse { input, expected } => {
                write!(f, "Cannot parse '{}' as {}", input, expected)
            }
        }
    }
}

impl std::error::Error for UiError {}

/// Result type alias for widget helpers.
pub type UiResult<T> = Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = UiError::OutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Index 4 out of range for length 2");

        let err = UiError::Parse {
            input: "abc".to_string(),
            expected: "integer",
        };
        assert_eq!(err.to_string(), "Cannot parse 'abc' as integer");
    }
}
