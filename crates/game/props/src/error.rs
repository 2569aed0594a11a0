//! Error types for property conversion and binding.
//!
//! Every error here is recovered locally: callers log it and the affected
//! property keeps its previous value. Nothing in the engine escalates a data
//! problem into a panic.
//!
//! # Taxonomy
//!
//! | kind                | cause                               | outcome                   |
//! |---------------------|-------------------------------------|---------------------------|
//! | `NotFound`          | unknown property name               | warning, no-op            |
//! | `ArityMismatch`     | too many/few tokens for a multi row | surplus dropped / zeroed  |
//! | `ConversionFailure` | token does not parse as its tag     | value unchanged           |
//! | `ResolverMiss`      | referenced resource not found       | absent reference          |

use crate::tag::TypeTag;

/// Failure category, used for log fields and error codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    ArityMismatch,
    ConversionFailure,
    ResolverMiss,
}

/// A raw token could not be converted to its destination type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The text is not a valid encoding for the tag.
    #[error("'{raw}' is not a valid {tag} value")]
    Malformed { tag: TypeTag, raw: String },
}

impl ConversionError {
    pub(crate) fn malformed(tag: TypeTag, raw: &str) -> Self {
        Self::Malformed {
            tag,
            raw: raw.to_string(),
        }
    }

    /// Tag the conversion was attempted for.
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Malformed { tag, .. } => *tag,
        }
    }
}

/// Errors reported by property writes and registry operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// No property is registered under the name.
    #[error("could not find property '{name}'")]
    NotFound { name: String },

    /// The property is registered twice (case-insensitively).
    #[error("property '{name}' is already registered")]
    Duplicate { name: String },

    /// A raw string did not convert to the property's type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A tagged value could not be coerced to the property's type.
    #[error("cannot assign a {got} value to a {expected} property")]
    TypeMismatch { expected: TypeTag, got: TypeTag },

    /// A multi-value row had the wrong number of tokens.
    #[error("expected {expected} property args, got {got}")]
    Arity { expected: usize, got: usize },
}

impl PropertyError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    /// Maps the error onto the failure taxonomy.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::Duplicate { .. } => ErrorKind::NotFound,
            Self::Arity { .. } => ErrorKind::ArityMismatch,
            Self::Conversion(_) | Self::TypeMismatch { .. } => ErrorKind::ConversionFailure,
        }
    }

    /// Stable identifier for this error variant, logged as `code`.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "PROPERTY_NOT_FOUND",
            Self::Duplicate { .. } => "PROPERTY_DUPLICATE",
            Self::Conversion(_) => "PROPERTY_CONVERSION",
            Self::TypeMismatch { .. } => "PROPERTY_TYPE_MISMATCH",
            Self::Arity { .. } => "PROPERTY_ARITY",
        }
    }
}
