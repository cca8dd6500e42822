use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Typed failure surface for every store, scheduler, and snapshot operation.
/// All variants are recoverable by the caller; the store never panics on a
/// rejected write.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error("{entity} capacity reached for {partition}: limit {limit}")]
    Capacity {
        entity: &'static str,
        partition: String,
        limit: usize,
    },

    #[error("duplicate {entity} key: {key}")]
    DuplicateKey { entity: &'static str, key: String },

    #[error("internal error: {message}")]
    Internal { message: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("validation failed: {message}")]
    Validation { message: String },
}

impl Error {
    pub(crate) fn capacity(
        entity: &'static str,
        partition: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self::Capacity {
            entity,
            partition: partition.into(),
            limit,
        }
    }

    pub(crate) fn duplicate_key(entity: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classify this error for callers that branch on failure cause rather
    /// than on the exact variant payload.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Capacity { .. } => ErrorClass::Capacity,
            Self::DuplicateKey { .. } => ErrorClass::Conflict,
            Self::Internal { .. } => ErrorClass::Internal,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Validation { .. } => ErrorClass::Validation,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    #[must_use]
    pub const fn is_capacity(&self) -> bool {
        matches!(self, Self::Capacity { .. })
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

///
/// ErrorClass
/// Coarse failure taxonomy for callers and observability surfaces.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorClass {
    Capacity,
    Conflict,
    Internal,
    NotFound,
    Validation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Capacity => "capacity",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
