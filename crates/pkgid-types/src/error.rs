//! Error taxonomy for package-id computation.
//!
//! Every variant is a hard failure: nothing in the engine retries or
//! substitutes a default.

/// Top-level error enum for pkgid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PkgIdError {
    #[error("invalid reference '{reference}': {segment} {reason}")]
    InvalidReference {
        reference: String,
        segment: &'static str,
        reason: String,
    },

    #[error("invalid info text at line {line}: {reason}")]
    InvalidInfo { line: usize, reason: String },

    #[error("invalid value '{value}' for {key}; possible values: {allowed}")]
    InvalidValue {
        key: String,
        value: String,
        allowed: String,
    },

    #[error("{kind} '{key}' is not defined")]
    UndefinedKey { kind: &'static str, key: String },

    #[error("{key} has no value and its domain does not allow one to be missing")]
    MissingValue { key: String },

    #[error("unknown package id mode: '{0}'")]
    UnknownMode(String),
}

impl PkgIdError {
    pub(crate) fn reference(
        reference: &str,
        segment: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        PkgIdError::InvalidReference {
            reference: reference.to_string(),
            segment,
            reason: reason.into(),
        }
    }

    /// Whether this error came from malformed input text (a reference or a
    /// serialized info block) rather than from a rejected assignment.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            PkgIdError::InvalidReference { .. } | PkgIdError::InvalidInfo { .. }
        )
    }
}

pub type PkgIdResult<T> = Result<T, PkgIdError>;
