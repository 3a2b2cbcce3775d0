//! Error types for Foliant.
//!
//! This module defines all error types used throughout the library. All errors
//! inherit from `FoliantError` and follow Rust error handling best practices:
//!
//! - Use `thiserror` for automatic `Error` trait implementation
//! - Preserve error chains with `#[source]` attributes
//! - Include context in error messages (plugin names, backend names, etc.)
//!
//! # Error Handling Philosophy
//!
//! **System errors MUST always bubble up unchanged:**
//! - `FoliantError::Io` (from `std::io::Error`) - File system errors, permission errors
//! - These indicate real system problems that users need to know about
//! - Never wrap or suppress these - they must surface to enable bug reports
//!
//! **Application errors are wrapped with context:**
//! - `ValidationFailed` - A validator rejected an extraction result
//! - `InvalidPlugin` - A plugin violated the registration contract
//! - `MissingDependency` - An OCR backend's runtime is not installed
//! - `Ocr` - OCR processing failures
//!
//! # Example
//!
//! ```rust
//! use foliant::{FoliantError, Result};
//!
//! fn check_content(content: &str) -> Result<()> {
//!     if content.is_empty() {
//!         return Err(FoliantError::validation_failed("extracted content is empty"));
//!     }
//!     Ok(())
//! }
//! ```
use thiserror::Error;

/// Result type alias using `FoliantError`.
///
/// This is the standard return type for all fallible operations in Foliant.
pub type Result<T> = std::result::Result<T, FoliantError>;

/// Main error type for all Foliant operations.
///
/// All errors in Foliant use this enum, which preserves error chains
/// and provides context for debugging.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `Ocr` - OCR backend processing errors
/// - `ValidationFailed` - A validator rejected a result (fail-fast, fatal)
/// - `MissingDependency` - An OCR backend's runtime dependency is absent
/// - `InvalidPlugin` - Registration contract violations (bad name, lookup miss)
/// - `Cache` - Backend instance cache errors
/// - `Serialization` - JSON serialization errors
/// - `LockPoisoned` - Mutex/RwLock poisoning (should not happen in normal operation)
/// - `Other` - Catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum FoliantError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed {
        message: String,
        /// Name of the validator that produced the failure, when known.
        validator: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {message}")]
    MissingDependency {
        message: String,
        /// Backend that needs the dependency.
        backend: String,
        /// The dependency that could not be found.
        dependency: String,
    },

    #[error("Invalid plugin '{plugin_name}': {message}")]
    InvalidPlugin { message: String, plugin_name: String },

    #[error("Cache error: {message}")]
    Cache {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for FoliantError {
    fn from(err: serde_json::Error) -> Self {
        FoliantError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl FoliantError {
    error_constructor!(ocr, Ocr);
    error_constructor!(cache, Cache);
    error_constructor!(serialization, Serialization);

    /// Create a ValidationFailed error with no validator attribution.
    pub fn validation_failed<S: Into<String>>(message: S) -> Self {
        Self::ValidationFailed {
            message: message.into(),
            validator: None,
            source: None,
        }
    }

    /// Create a ValidationFailed error attributed to a named validator.
    pub fn validation_failed_by<N: Into<String>, S: Into<String>>(validator: N, message: S) -> Self {
        Self::ValidationFailed {
            message: message.into(),
            validator: Some(validator.into()),
            source: None,
        }
    }

    /// Create a MissingDependency error for an OCR backend whose runtime is absent.
    pub fn missing_dependency<B: Into<String>, D: Into<String>>(backend: B, dependency: D) -> Self {
        let backend = backend.into();
        let dependency = dependency.into();
        Self::MissingDependency {
            message: format!("the '{}' OCR backend requires '{}' to be installed", backend, dependency),
            backend,
            dependency,
        }
    }

    /// Create an InvalidPlugin error for a named plugin.
    pub fn invalid_plugin<N: Into<String>, S: Into<String>>(plugin_name: N, message: S) -> Self {
        Self::InvalidPlugin {
            message: message.into(),
            plugin_name: plugin_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FoliantError = io_err.into();
        assert!(matches!(err, FoliantError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_ocr_error() {
        let err = FoliantError::ocr("OCR failed");
        assert_eq!(err.to_string(), "OCR error: OCR failed");
    }

    #[test]
    fn test_ocr_error_with_source() {
        let source = std::io::Error::other("engine crashed");
        let err = FoliantError::ocr_with_source("OCR failed", source);
        assert_eq!(err.to_string(), "OCR error: OCR failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_failed() {
        let err = FoliantError::validation_failed("content too short");
        assert_eq!(err.to_string(), "Validation failed: content too short");
        match err {
            FoliantError::ValidationFailed { validator, .. } => assert!(validator.is_none()),
            _ => panic!("Expected ValidationFailed"),
        }
    }

    #[test]
    fn test_validation_failed_by() {
        let err = FoliantError::validation_failed_by("min-length", "content too short");
        assert_eq!(err.to_string(), "Validation failed: content too short");
        match err {
            FoliantError::ValidationFailed { validator, .. } => {
                assert_eq!(validator.as_deref(), Some("min-length"));
            }
            _ => panic!("Expected ValidationFailed"),
        }
    }

    #[test]
    fn test_missing_dependency() {
        let err = FoliantError::missing_dependency("easyocr", "easyocr");
        assert_eq!(
            err.to_string(),
            "Missing dependency: the 'easyocr' OCR backend requires 'easyocr' to be installed"
        );
        match err {
            FoliantError::MissingDependency { backend, dependency, .. } => {
                assert_eq!(backend, "easyocr");
                assert_eq!(dependency, "easyocr");
            }
            _ => panic!("Expected MissingDependency"),
        }
    }

    #[test]
    fn test_invalid_plugin() {
        let err = FoliantError::invalid_plugin("bad name", "plugin name cannot contain whitespace");
        assert_eq!(
            err.to_string(),
            "Invalid plugin 'bad name': plugin name cannot contain whitespace"
        );
    }

    #[test]
    fn test_cache_error() {
        let err = FoliantError::cache("insert failed");
        assert_eq!(err.to_string(), "Cache error: insert failed");
    }

    #[test]
    fn test_cache_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "cannot write");
        let err = FoliantError::cache_with_source("insert failed", source);
        assert_eq!(err.to_string(), "Cache error: insert failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serialization_error() {
        let err = FoliantError::serialization("bad JSON");
        assert_eq!(err.to_string(), "Serialization error: bad JSON");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: FoliantError = json_err.into();
        assert!(matches!(err, FoliantError::Serialization { .. }));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_lock_poisoned_error() {
        let err = FoliantError::LockPoisoned("registry lock poisoned".to_string());
        assert_eq!(err.to_string(), "Lock poisoned: registry lock poisoned");
    }

    #[test]
    fn test_other_error() {
        let err = FoliantError::Other("unexpected error".to_string());
        assert_eq!(err.to_string(), "unexpected error");
    }

    #[test]
    fn test_error_debug() {
        let err = FoliantError::validation_failed("test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ValidationFailed"));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/file.txt")?;
            Ok(content)
        }

        let result = read_file();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), FoliantError::Io(_)));
    }
}
