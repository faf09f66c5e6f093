use thiserror::Error;

use crate::models::{CategoryId, EntryId, MonthKey};

/// What a lookup failed to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Missing {
    Month(MonthKey),
    Category(CategoryId),
    Entry(EntryId),
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month(key) => write!(f, "month {key}"),
            Self::Category(id) => write!(f, "category '{id}'"),
            Self::Entry(id) => write!(f, "entry {id}"),
        }
    }
}

/// Why the store refused an operation. A rejected operation never changes
/// state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("{month} already has data")]
    AlreadyExists { month: MonthKey },

    #[error("Cannot remove the last {item}")]
    LastItemProtected { item: String },

    #[error("Not found: {0}")]
    NotFound(Missing),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl LedgerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
