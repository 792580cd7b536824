// ⚠️ Error taxonomy for the cinema object model
//
// Every association manager validates first and mutates second, so any error
// returned here means the model is exactly as it was before the call.

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// CINEMA ERROR
// ============================================================================

#[derive(Debug, Error)]
pub enum CinemaError {
    /// An attribute value is out of range or empty
    #[error("invalid {entity}.{field}: {message}")]
    Validation {
        entity: &'static str,
        field: &'static str,
        message: String,
    },

    /// A referenced entity is not registered in its extent
    #[error("{entity} {id} does not exist")]
    Missing { entity: &'static str, id: String },

    /// Natural-key collision, or re-linking an already linked pair
    #[error("duplicate {entity}: {message}")]
    Duplicate {
        entity: &'static str,
        message: String,
    },

    /// The child is not part of the parent's collection
    #[error("{entity} {id} is not linked to {owner}")]
    NotLinked {
        entity: &'static str,
        id: String,
        owner: String,
    },

    /// The parent's collection is at its bound
    #[error("{owner} already holds the maximum of {limit} {entity} records")]
    Capacity {
        entity: &'static str,
        owner: String,
        limit: usize,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl CinemaError {
    pub fn validation(entity: &'static str, field: &'static str, message: impl Into<String>) -> Self {
        CinemaError::Validation {
            entity,
            field,
            message: message.into(),
        }
    }

    pub fn missing(entity: &'static str, id: impl ToString) -> Self {
        CinemaError::Missing {
            entity,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, message: impl Into<String>) -> Self {
        CinemaError::Duplicate {
            entity,
            message: message.into(),
        }
    }

    pub fn not_linked(entity: &'static str, id: impl ToString, owner: impl ToString) -> Self {
        CinemaError::NotLinked {
            entity,
            id: id.to_string(),
            owner: owner.to_string(),
        }
    }

    pub fn capacity(entity: &'static str, owner: impl ToString, limit: usize) -> Self {
        CinemaError::Capacity {
            entity,
            owner: owner.to_string(),
            limit,
        }
    }
}

// ============================================================================
// PERSISTENCE ERROR
// ============================================================================

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("checksum mismatch in {path}")]
    ChecksumMismatch { path: PathBuf },

    #[error("{path} holds {found} records, expected {expected}")]
    WrongKind {
        path: PathBuf,
        expected: &'static str,
        found: String,
    },

    #[error("{path} uses unsupported format version {version}")]
    UnsupportedVersion { path: PathBuf, version: u32 },

    #[error("inconsistent object graph: {0}")]
    Inconsistent(String),

    /// A stored record breaks an attribute rule
    #[error("invalid record: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CinemaError>;
