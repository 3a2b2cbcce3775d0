//! Plugin system for extending Foliant functionality.
//!
//! The plugin system provides a trait-based architecture that allows extending
//! Foliant with custom OCR backends, post-processors, and validators.
//!
//! # Plugin Types
//!
//! - [`Plugin`] - Base trait that all plugins must implement
//! - [`OcrBackend`] - OCR processing plugins
//! - [`PostProcessor`] - Content post-processing plugins
//! - [`Validator`] - Validation plugins
//!
//! # Lifecycle Pattern
//!
//! Plugins are stored in `Arc<dyn Trait>` for thread-safe shared access:
//!
//! ```rust
//! use foliant::plugins::{Plugin, Validator};
//! use foliant::plugins::registry::get_validator_registry;
//! use std::sync::Arc;
//!
//! # struct MyValidator;
//! # use foliant::types::ExtractionResult;
//! # impl foliant::plugins::Plugin for MyValidator {
//! #     fn name(&self) -> &str { "my_validator" }
//! #     fn version(&self) -> String { "1.0.0".to_string() }
//! #     fn initialize(&self) -> foliant::Result<()> { Ok(()) }
//! #     fn shutdown(&self) -> foliant::Result<()> { Ok(()) }
//! # }
//! # #[async_trait::async_trait]
//! # impl Validator for MyValidator {
//! #     async fn validate(&self, _: &ExtractionResult, _: &foliant::ExtractionConfig)
//! #         -> foliant::Result<()> {
//! #         Ok(())
//! #     }
//! # }
//! // 1. Create plugin instance
//! let plugin = MyValidator;
//!
//! // 2. Wrap in Arc for registration
//! let plugin = Arc::new(plugin);
//!
//! // 3. Register with registry (calls initialize internally)
//! let registry = get_validator_registry();
//! let mut registry = registry.write().unwrap();
//! registry.register(plugin)?;
//! # registry.remove("my_validator")?;
//! # Ok::<(), foliant::FoliantError>(())
//! ```
//!
//! # Example: Custom Post-Processor
//!
//! ```rust
//! use foliant::plugins::{Plugin, PostProcessor, ProcessingStage};
//! use foliant::types::ExtractionResult;
//! use foliant::{ExtractionConfig, Result};
//! use async_trait::async_trait;
//!
//! struct LineCountProcessor;
//!
//! impl Plugin for LineCountProcessor {
//!     fn name(&self) -> &str { "line_count" }
//!     fn version(&self) -> String { "1.0.0".to_string() }
//!     fn initialize(&self) -> Result<()> { Ok(()) }
//!     fn shutdown(&self) -> Result<()> { Ok(()) }
//! }
//!
//! #[async_trait]
//! impl PostProcessor for LineCountProcessor {
//!     async fn process(&self, mut result: ExtractionResult, _config: &ExtractionConfig)
//!         -> Result<ExtractionResult> {
//!         let line_count = result.content.lines().count();
//!         result.metadata.insert("line_count".to_string(), serde_json::json!(line_count));
//!         Ok(result)
//!     }
//!
//!     fn processing_stage(&self) -> ProcessingStage {
//!         ProcessingStage::Late
//!     }
//! }
//! ```
//!
//! # Safety and Threading
//!
//! All plugins must be `Send + Sync` because they are:
//! - Stored in `Arc<dyn Trait>` for shared ownership
//! - Accessed concurrently from multiple threads
//! - Called with `&self` (shared references)
//!
//! Since plugins receive `&self` (not `&mut self`), use interior mutability
//! for mutable state:
//! - `Mutex<T>` - Exclusive access, blocking
//! - `RwLock<T>` - Shared read, exclusive write
//! - `AtomicBool` / `AtomicU64` - Lock-free primitives
//! - `OnceCell<T>` - One-time initialization
//!
//! ```rust
//! use foliant::plugins::Plugin;
//! use std::sync::Mutex;
//!
//! struct StatefulPlugin {
//!     // Use interior mutability for state
//!     call_count: std::sync::atomic::AtomicU64,
//!     cache: Mutex<Option<Vec<String>>>,
//! }
//!
//! impl Plugin for StatefulPlugin {
//!     fn name(&self) -> &str { "stateful_plugin" }
//!     fn version(&self) -> String { "1.0.0".to_string() }
//!
//!     fn initialize(&self) -> foliant::Result<()> {
//!         let mut cache = self.cache.lock().unwrap();
//!         *cache = Some(vec!["initialized".to_string()]);
//!         Ok(())
//!     }
//!
//!     fn shutdown(&self) -> foliant::Result<()> {
//!         self.call_count.store(0, std::sync::atomic::Ordering::Release);
//!         Ok(())
//!     }
//! }
//! ```

mod ocr;
mod processor;
pub mod registry;
mod traits;
mod validator;

pub use ocr::{
    OcrBackend, OcrBackendType, clear_ocr_backends, list_ocr_backends, register_ocr_backend, unregister_ocr_backend,
};
pub use processor::{
    PostProcessor, ProcessingStage, clear_post_processors, list_post_processors, register_post_processor,
    unregister_post_processor,
};
pub use traits::Plugin;
pub use validator::{Validator, clear_validators, list_validators, register_validator, unregister_validator};
