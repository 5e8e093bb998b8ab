//! Error types for the library layer.

use std::fmt;

use crate::validation::FieldErrors;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding list fetch, validation and input failures.
#[derive(Debug)]
pub enum AdminError {
    /// An error from the underlying API client during a mutation.
    Api(storefront_api::Error),
    /// The list endpoint failed. Fatal for the page being rendered.
    Fetch {
        resource: &'static str,
        source: storefront_api::Error,
    },
    /// A draft failed its schema; nothing was sent.
    Validation(FieldErrors),
    /// User-provided input was rejected before reaching any schema.
    InvalidInput(String),
    /// Reading a local file failed.
    Io(std::io::Error),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Fetch { resource, source } => {
                write!(f, "Erro ao buscar {}: {}", resource, source)
            }
            Self::Validation(errors) => write!(f, "Validation failed: {}", errors),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Fetch { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<storefront_api::Error> for AdminError {
    fn from(e: storefront_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<FieldErrors> for AdminError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<std::io::Error> for AdminError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
