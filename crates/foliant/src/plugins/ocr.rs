//! OCR backend plugin trait.
//!
//! This module defines the trait for implementing custom OCR backends.

use crate::Result;
use crate::core::config::OcrConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// OCR backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrBackendType {
    /// Tesseract OCR (bundled default)
    Tesseract,
    /// EasyOCR (external engine)
    EasyOCR,
    /// PaddleOCR (external engine)
    PaddleOCR,
    /// Custom/third-party OCR backend
    Custom,
}

/// Trait for OCR backend plugins.
///
/// Implement this trait to add custom OCR capabilities. OCR backends can be:
/// - Native Rust implementations
/// - Bridges to external OCR engines (EasyOCR, PaddleOCR)
/// - Cloud-based OCR services (Google Vision, AWS Textract, etc.)
///
/// # Thread Safety
///
/// OCR backends must be thread-safe (`Send + Sync`) to support concurrent processing.
///
/// # Example
///
/// ```rust
/// use foliant::plugins::{OcrBackend, OcrBackendType, Plugin};
/// use foliant::types::ExtractionResult;
/// use foliant::{OcrConfig, Result};
/// use async_trait::async_trait;
///
/// struct CustomOcrBackend;
///
/// impl Plugin for CustomOcrBackend {
///     fn name(&self) -> &str { "custom_ocr" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl OcrBackend for CustomOcrBackend {
///     async fn process_image(&self, image_bytes: &[u8], config: &OcrConfig) -> Result<ExtractionResult> {
///         // Implement OCR logic here
///         let _ = (image_bytes, config);
///         Ok(ExtractionResult::new("Extracted text", "text/plain"))
///     }
///
///     fn supported_languages(&self) -> Vec<String> {
///         vec!["eng".to_string(), "deu".to_string(), "fra".to_string()]
///     }
/// }
/// ```
#[async_trait]
pub trait OcrBackend: Plugin {
    /// Process an image and extract text via OCR.
    ///
    /// # Arguments
    ///
    /// * `image_bytes` - Raw image data (JPEG, PNG, TIFF, etc.)
    /// * `config` - OCR configuration (language, backend options)
    ///
    /// # Returns
    ///
    /// An `ExtractionResult` containing the extracted text and metadata.
    ///
    /// # Errors
    ///
    /// - `FoliantError::Ocr` - OCR processing failed
    /// - `FoliantError::ValidationFailed` - Invalid image format or configuration
    /// - `FoliantError::Io` - I/O errors (these always bubble up)
    async fn process_image(&self, image_bytes: &[u8], config: &OcrConfig) -> Result<ExtractionResult>;

    /// Process a file and extract text via OCR.
    ///
    /// Default implementation reads the file and calls `process_image`.
    /// Override for custom file handling or optimizations.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the image file
    /// * `config` - OCR configuration
    ///
    /// # Errors
    ///
    /// Same as `process_image`, plus file I/O errors.
    async fn process_file(&self, path: &Path, config: &OcrConfig) -> Result<ExtractionResult> {
        let bytes = tokio::fs::read(path).await?;
        self.process_image(&bytes, config).await
    }

    /// Check if this backend supports a given language code.
    ///
    /// The default implementation consults `supported_languages()`; an empty
    /// list means the backend accepts any language.
    ///
    /// # Arguments
    ///
    /// * `lang` - ISO 639-2/3 language code (e.g., "eng", "deu", "fra")
    fn supports_language(&self, lang: &str) -> bool {
        let languages = self.supported_languages();
        languages.is_empty() || languages.iter().any(|l| l == lang)
    }

    /// Optional: Get a list of all supported languages.
    ///
    /// Defaults to empty list, meaning no restriction. Override to advertise
    /// concrete language support.
    fn supported_languages(&self) -> Vec<String> {
        vec![]
    }

    /// Get the backend type identifier.
    ///
    /// Defaults to `OcrBackendType::Custom`.
    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Custom
    }
}

/// Register an OCR backend with the global registry.
///
/// The OCR backend will be registered with its name from the `name()` method
/// and can be used for OCR processing via the extraction pipeline. Registering
/// a backend under a name that is already taken replaces the previous backend
/// after calling its `shutdown()` method.
///
/// # Arguments
///
/// * `backend` - The OCR backend implementation wrapped in Arc
///
/// # Returns
///
/// - `Ok(())` if registration succeeded
/// - `Err(...)` if validation failed or initialization failed
///
/// # Errors
///
/// - `FoliantError::InvalidPlugin` - Invalid backend name (empty or contains whitespace)
/// - Any error from the backend's `initialize()` method
///
/// # Example
///
/// ```rust
/// use foliant::plugins::{OcrBackend, Plugin, register_ocr_backend};
/// use foliant::types::ExtractionResult;
/// use foliant::{OcrConfig, Result};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct CustomOcr;
///
/// impl Plugin for CustomOcr {
///     fn name(&self) -> &str { "custom_ocr" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl OcrBackend for CustomOcr {
///     async fn process_image(&self, _: &[u8], _: &OcrConfig) -> Result<ExtractionResult> {
///         Ok(ExtractionResult::new("text", "text/plain"))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let backend = Arc::new(CustomOcr);
/// register_ocr_backend(backend)?;
/// # Ok::<(), foliant::FoliantError>(())
/// # });
/// ```
pub fn register_ocr_backend(backend: Arc<dyn OcrBackend>) -> crate::Result<()> {
    use crate::plugins::registry::get_ocr_backend_registry;

    let registry = get_ocr_backend_registry();
    // Lock poisoning indicates a panic in another thread holding the lock.
    let mut registry = registry
        .write()
        .expect("OCR backend registry lock poisoned - critical runtime error");

    registry.register(backend)
}

/// Unregister an OCR backend by name.
///
/// Removes the OCR backend from the global registry and calls its `shutdown()` method.
///
/// # Arguments
///
/// * `name` - Name of the OCR backend to unregister
///
/// # Returns
///
/// - `Ok(())` if the backend was unregistered or didn't exist
/// - `Err(...)` if the shutdown method failed
pub fn unregister_ocr_backend(name: &str) -> crate::Result<()> {
    use crate::plugins::registry::get_ocr_backend_registry;

    let registry = get_ocr_backend_registry();
    // Lock poisoning indicates a panic in another thread holding the lock.
    let mut registry = registry
        .write()
        .expect("OCR backend registry lock poisoned - critical runtime error");

    registry.remove(name)
}

/// List all registered OCR backends.
///
/// Returns the names of all OCR backends currently registered in the global registry.
pub fn list_ocr_backends() -> crate::Result<Vec<String>> {
    use crate::plugins::registry::get_ocr_backend_registry;

    let registry = get_ocr_backend_registry();
    // Lock poisoning indicates a panic in another thread holding the lock.
    let registry = registry
        .read()
        .expect("OCR backend registry lock poisoned - critical runtime error");

    Ok(registry.list())
}

/// Clear all OCR backends from the global registry.
///
/// Removes all OCR backends, calls their `shutdown()` methods, and drops any
/// cached backend instances so later lookups cannot observe stale entries.
///
/// # Returns
///
/// - `Ok(())` if all backends were cleared successfully
/// - `Err(...)` if any shutdown method failed
pub fn clear_ocr_backends() -> crate::Result<()> {
    use crate::plugins::registry::get_ocr_backend_registry;

    {
        let registry = get_ocr_backend_registry();
        // Lock poisoning indicates a panic in another thread holding the lock.
        let mut registry = registry
            .write()
            .expect("OCR backend registry lock poisoned - critical runtime error");

        registry.shutdown_all()?;
    }

    crate::ocr::cache::clear_backend_cache();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockOcrBackend {
        languages: Vec<String>,
    }

    impl Plugin for MockOcrBackend {
        fn name(&self) -> &str {
            "mock_ocr"
        }

        fn version(&self) -> String {
            "1.0.0".to_string()
        }

        fn initialize(&self) -> Result<()> {
            Ok(())
        }

        fn shutdown(&self) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl OcrBackend for MockOcrBackend {
        async fn process_image(&self, _image_bytes: &[u8], _config: &OcrConfig) -> Result<ExtractionResult> {
            Ok(ExtractionResult::new("Mocked OCR text", "text/plain"))
        }

        fn supported_languages(&self) -> Vec<String> {
            self.languages.clone()
        }
    }

    fn mock_config() -> OcrConfig {
        OcrConfig {
            backend: "mock_ocr".to_string(),
            language: "eng".to_string(),
            backend_options: None,
        }
    }

    #[tokio::test]
    async fn test_ocr_backend_process_image() {
        let backend = MockOcrBackend {
            languages: vec!["eng".to_string(), "deu".to_string()],
        };

        let result = backend.process_image(b"fake image data", &mock_config()).await.unwrap();
        assert_eq!(result.content, "Mocked OCR text");
        assert_eq!(result.mime_type, "text/plain");
    }

    #[test]
    fn test_ocr_backend_supports_language() {
        let backend = MockOcrBackend {
            languages: vec!["eng".to_string(), "deu".to_string()],
        };

        assert!(backend.supports_language("eng"));
        assert!(backend.supports_language("deu"));
        assert!(!backend.supports_language("fra"));
    }

    #[test]
    fn test_ocr_backend_empty_languages_accepts_any() {
        let backend = MockOcrBackend { languages: vec![] };

        assert!(backend.supported_languages().is_empty());
        assert!(backend.supports_language("eng"));
        assert!(backend.supports_language("jpn"));
    }

    #[test]
    fn test_ocr_backend_default_type() {
        let backend = MockOcrBackend {
            languages: vec!["eng".to_string()],
        };

        assert_eq!(backend.backend_type(), OcrBackendType::Custom);
    }

    #[test]
    fn test_ocr_backend_supported_languages() {
        let backend = MockOcrBackend {
            languages: vec!["eng".to_string(), "deu".to_string(), "fra".to_string()],
        };

        let supported = backend.supported_languages();
        assert_eq!(supported.len(), 3);
        assert!(supported.contains(&"eng".to_string()));
        assert!(supported.contains(&"deu".to_string()));
        assert!(supported.contains(&"fra".to_string()));
    }

    #[test]
    fn test_ocr_backend_type_variants() {
        assert_eq!(OcrBackendType::Tesseract, OcrBackendType::Tesseract);
        assert_ne!(OcrBackendType::Tesseract, OcrBackendType::EasyOCR);
        assert_ne!(OcrBackendType::EasyOCR, OcrBackendType::PaddleOCR);
        assert_ne!(OcrBackendType::PaddleOCR, OcrBackendType::Custom);
    }

    #[test]
    fn test_ocr_backend_type_debug() {
        let backend_type = OcrBackendType::Tesseract;
        let debug_str = format!("{:?}", backend_type);
        assert!(debug_str.contains("Tesseract"));
    }

    #[tokio::test]
    async fn test_ocr_backend_process_file_default_impl() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let backend = MockOcrBackend {
            languages: vec!["eng".to_string()],
        };

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"fake image data").unwrap();
        let path = temp_file.path();

        let result = backend.process_file(path, &mock_config()).await.unwrap();
        assert_eq!(result.content, "Mocked OCR text");
    }

    #[tokio::test]
    async fn test_ocr_backend_process_file_missing_path() {
        let backend = MockOcrBackend { languages: vec![] };

        let result = backend
            .process_file(Path::new("/nonexistent/image.png"), &mock_config())
            .await;
        assert!(matches!(result, Err(crate::FoliantError::Io(_))));
    }

    #[test]
    fn test_ocr_backend_plugin_interface() {
        let backend = MockOcrBackend {
            languages: vec!["eng".to_string()],
        };

        assert_eq!(backend.name(), "mock_ocr");
        assert_eq!(backend.version(), "1.0.0");
        assert!(backend.initialize().is_ok());
        assert!(backend.shutdown().is_ok());
    }
}
