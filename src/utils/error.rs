//! Error handling for refdoc

use thiserror::Error;

use crate::model::ReflectionId;
use crate::types::SymbolId;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the edges of the documentation model.
///
/// An unresolvable reference is never one of these: it is a degraded
/// state of the model, not a failure.
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Registration Errors ====================

    #[error("Symbol {symbol_id} is already registered to reflection {existing}")]
    DuplicateSymbol {
        symbol_id: SymbolId,
        existing: ReflectionId,
    },

    #[error("Cannot register reflection {reflection} under the sentinel symbol id")]
    SentinelSymbol { reflection: ReflectionId },

    // ==================== Input Errors ====================

    #[error("Declaration {index} ({name}) names parent {parent}, which is not an earlier declaration")]
    InvalidParent {
        index: usize,
        name: String,
        parent: usize,
    },

    #[error("Declaration {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Declaration {index} contains a reference type with an empty name")]
    EmptyReferenceName { index: usize },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether a converter may log this error and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DuplicateSymbol { .. } | Self::SentinelSymbol { .. })
    }
}
