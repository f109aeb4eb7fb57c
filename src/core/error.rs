//! Errors raised by the traceability core

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::{EntityId, EntityKind, IdParseError};

/// Result alias used throughout the core
pub type TraceResult<T> = std::result::Result<T, TraceError>;

/// Errors that can occur while creating, resolving or validating records
#[derive(Debug, Error, Diagnostic)]
pub enum TraceError {
    #[error("duplicate {field} '{value}' for {kind}")]
    #[diagnostic(
        code(traceline::store::duplicate_key),
        help("natural keys are unique per entity kind; reset the store or pick another value")
    )]
    DuplicateKey {
        kind: EntityKind,
        field: &'static str,
        value: String,
    },

    #[error("{kind} {id} not found")]
    #[diagnostic(code(traceline::store::not_found))]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("{field} references {expected} {id}, which does not exist")]
    #[diagnostic(
        code(traceline::resolver::dangling_reference),
        help("create parent records before the records that connect to them")
    )]
    DanglingReference {
        field: &'static str,
        expected: EntityKind,
        id: EntityId,
    },

    #[error("invalid CTQ range: {message}")]
    #[diagnostic(
        code(traceline::validate::invalid_range),
        help("limits must satisfy lower <= target <= upper")
    )]
    InvalidRange { message: String },

    #[error("unit mismatch: measurement recorded in '{actual}' but CTQ expects '{expected}'")]
    #[diagnostic(code(traceline::validate::unit_mismatch))]
    UnitMismatch { expected: String, actual: String },

    #[error("invalid {field}: {value} is not a finite number")]
    #[diagnostic(code(traceline::validate::invalid_value))]
    InvalidValue { field: &'static str, value: f64 },

    #[error("storage backend error: {0}")]
    #[diagnostic(code(traceline::backend))]
    Backend(String),

    #[error("store lock poisoned by a panicking writer")]
    #[diagnostic(code(traceline::store::poisoned))]
    LockPoisoned,

    #[error(transparent)]
    #[diagnostic(code(traceline::id))]
    IdParse(#[from] IdParseError),
}

impl From<rusqlite::Error> for TraceError {
    fn from(err: rusqlite::Error) -> Self {
        TraceError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(err: serde_json::Error) -> Self {
        TraceError::Backend(format!("record encoding: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message() {
        let err = TraceError::DuplicateKey {
            kind: EntityKind::Unit,
            field: "serial_number",
            value: "U-1001".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate serial_number 'U-1001' for unit");
    }

    #[test]
    fn test_dangling_reference_message_names_field() {
        let id = EntityId::new(EntityKind::Kit);
        let err = TraceError::DanglingReference {
            field: "kit",
            expected: EntityKind::Kit,
            id: id.clone(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("kit references kit"));
        assert!(msg.contains(&id.to_string()));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = TraceError::UnitMismatch {
            expected: "N-m".to_string(),
            actual: "mm".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("traceline::validate::unit_mismatch"));
    }
}
