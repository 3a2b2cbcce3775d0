//! Post-processor plugin trait.
//!
//! This module defines traits for implementing custom post-processing logic.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Processing stages for post-processors.
///
/// Post-processors are executed in stage order (Early → Middle → Late).
/// Use stages to control the order of post-processing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessingStage {
    /// Early stage - foundational processing.
    ///
    /// Use for:
    /// - Language detection
    /// - Character encoding normalization
    /// - Entity extraction
    Early,

    /// Middle stage - content transformation.
    ///
    /// Use for:
    /// - Keyword extraction
    /// - Text summarization
    /// - Semantic analysis
    Middle,

    /// Late stage - final enrichment.
    ///
    /// Use for:
    /// - Custom user hooks
    /// - Analytics/logging
    /// - Output formatting
    Late,
}

/// Trait for post-processor plugins.
///
/// Post-processors transform or enrich extraction results after the initial
/// extraction is complete. They can:
/// - Clean and normalize text
/// - Add metadata (language, keywords, entities)
/// - Apply custom transformations
///
/// # Processing Order
///
/// Post-processors are executed in stage order:
/// 1. **Early** - Language detection, entity extraction
/// 2. **Middle** - Keyword extraction, summarization
/// 3. **Late** - Custom hooks, output formatting
///
/// Within each stage, processors are executed in registration order.
///
/// # Error Handling
///
/// Post-processor errors are non-fatal: the pipeline records the error in the
/// result metadata and continues with the value the processor received. A
/// failing processor therefore cannot corrupt the result seen by later
/// processors.
///
/// # Thread Safety
///
/// Post-processors must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```rust
/// use foliant::plugins::{Plugin, PostProcessor, ProcessingStage};
/// use foliant::{ExtractionConfig, Result};
/// use foliant::types::ExtractionResult;
/// use async_trait::async_trait;
///
/// /// Add word count metadata to extraction results
/// struct WordCountProcessor;
///
/// impl Plugin for WordCountProcessor {
///     fn name(&self) -> &str { "word_count" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl PostProcessor for WordCountProcessor {
///     async fn process(&self, mut result: ExtractionResult, _config: &ExtractionConfig)
///         -> Result<ExtractionResult> {
///         let word_count = result.content.split_whitespace().count();
///         result.metadata.insert("word_count".to_string(), serde_json::json!(word_count));
///         Ok(result)
///     }
///
///     fn processing_stage(&self) -> ProcessingStage {
///         ProcessingStage::Early
///     }
/// }
/// ```
#[async_trait]
pub trait PostProcessor: Plugin {
    /// Process an extraction result.
    ///
    /// Transform or enrich the extraction result. Can modify:
    /// - `content` - The extracted text
    /// - `metadata` - Add or update metadata fields
    /// - `tables` - Modify or enhance table data
    ///
    /// The processor takes the result by value and returns the transformed
    /// value. On error, the pipeline discards any partial transformation and
    /// keeps the input value it passed in.
    ///
    /// # Arguments
    ///
    /// * `result` - The extraction result to process
    /// * `config` - Extraction configuration
    ///
    /// # Returns
    ///
    /// The transformed extraction result.
    ///
    /// # Errors
    ///
    /// Errors are captured in the result metadata by the pipeline and do not
    /// abort processing.
    async fn process(&self, result: ExtractionResult, config: &ExtractionConfig) -> Result<ExtractionResult>;

    /// Get the processing stage for this post-processor.
    ///
    /// Determines when this processor runs in the pipeline. Defaults to
    /// `ProcessingStage::Middle`.
    fn processing_stage(&self) -> ProcessingStage {
        ProcessingStage::Middle
    }
}

/// Register a post-processor with the global registry.
///
/// The post-processor will run in the stage reported by its
/// `processing_stage()` method, after all previously registered processors of
/// that stage. Registering a processor under a name that is already taken
/// replaces the previous processor after calling its `shutdown()` method; the
/// replacement joins the end of its stage's run order.
///
/// # Arguments
///
/// * `processor` - The post-processor implementation wrapped in Arc
///
/// # Errors
///
/// - `FoliantError::InvalidPlugin` - Invalid processor name (empty or contains whitespace)
/// - Any error from the processor's `initialize()` method
///
/// # Example
///
/// ```rust
/// use foliant::plugins::{Plugin, PostProcessor, register_post_processor};
/// use foliant::types::ExtractionResult;
/// use foliant::{ExtractionConfig, Result};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Cleanup;
///
/// impl Plugin for Cleanup {
///     fn name(&self) -> &str { "cleanup" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl PostProcessor for Cleanup {
///     async fn process(&self, mut result: ExtractionResult, _: &ExtractionConfig) -> Result<ExtractionResult> {
///         result.content = result.content.trim().to_string();
///         Ok(result)
///     }
/// }
///
/// # tokio_test::block_on(async {
/// register_post_processor(Arc::new(Cleanup))?;
/// # Ok::<(), foliant::FoliantError>(())
/// # });
/// ```
pub fn register_post_processor(processor: Arc<dyn PostProcessor>) -> crate::Result<()> {
    use crate::plugins::registry::get_post_processor_registry;

    let registry = get_post_processor_registry();
    let mut registry = registry
        .write()
        .expect("Failed to acquire write lock on post-processor registry");

    registry.register(processor)
}

/// Unregister a post-processor by name.
///
/// Removes the post-processor from the global registry and calls its
/// `shutdown()` method.
///
/// # Arguments
///
/// * `name` - Name of the post-processor to unregister
///
/// # Returns
///
/// - `Ok(())` if the processor was unregistered or didn't exist
/// - `Err(...)` if the shutdown method failed
pub fn unregister_post_processor(name: &str) -> crate::Result<()> {
    use crate::plugins::registry::get_post_processor_registry;

    let registry = get_post_processor_registry();
    let mut registry = registry
        .write()
        .expect("Failed to acquire write lock on post-processor registry");

    registry.remove(name)
}

/// List all registered post-processor names.
///
/// Names are returned in execution order: stage by stage (Early, Middle,
/// Late), in registration order within each stage.
///
/// # Returns
///
/// - `Ok(Vec<String>)` - Vector of post-processor names
pub fn list_post_processors() -> crate::Result<Vec<String>> {
    use crate::plugins::registry::get_post_processor_registry;

    let registry = get_post_processor_registry();
    let registry = registry
        .read()
        .expect("Failed to acquire read lock on post-processor registry");

    Ok(registry.list())
}

/// Clear all post-processors from the global registry.
///
/// Removes all post-processors and calls their `shutdown()` methods.
///
/// # Returns
///
/// - `Ok(())` if all processors were cleared successfully
/// - `Err(...)` if any shutdown method failed
pub fn clear_post_processors() -> crate::Result<()> {
    use crate::plugins::registry::get_post_processor_registry;

    let registry = get_post_processor_registry();
    let mut registry = registry
        .write()
        .expect("Failed to acquire write lock on post-processor registry");

    registry.shutdown_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPostProcessor {
        stage: ProcessingStage,
    }

    impl Plugin for MockPostProcessor {
        fn name(&self) -> &str {
            "mock_processor"
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
    impl PostProcessor for MockPostProcessor {
        async fn process(&self, mut result: ExtractionResult, _config: &ExtractionConfig) -> Result<ExtractionResult> {
            result
                .metadata
                .insert("processed_by".to_string(), serde_json::json!(self.name()));
            Ok(result)
        }

        fn processing_stage(&self) -> ProcessingStage {
            self.stage
        }
    }

    #[tokio::test]
    async fn test_post_processor_process() {
        let processor = MockPostProcessor {
            stage: ProcessingStage::Early,
        };

        let result = ExtractionResult::new("test content", "text/plain");
        let config = ExtractionConfig::default();
        let result = processor.process(result, &config).await.unwrap();

        assert_eq!(result.content, "test content");
        assert_eq!(
            result.metadata.get("processed_by").unwrap(),
            &serde_json::json!("mock_processor")
        );
    }

    #[test]
    fn test_processing_stage_order() {
        assert!(ProcessingStage::Early < ProcessingStage::Middle);
        assert!(ProcessingStage::Middle < ProcessingStage::Late);
    }

    #[test]
    fn test_post_processor_stage() {
        let early = MockPostProcessor {
            stage: ProcessingStage::Early,
        };
        let middle = MockPostProcessor {
            stage: ProcessingStage::Middle,
        };
        let late = MockPostProcessor {
            stage: ProcessingStage::Late,
        };

        assert_eq!(early.processing_stage(), ProcessingStage::Early);
        assert_eq!(middle.processing_stage(), ProcessingStage::Middle);
        assert_eq!(late.processing_stage(), ProcessingStage::Late);
    }

    #[test]
    fn test_post_processor_default_stage() {
        struct DefaultStageProcessor;

        impl Plugin for DefaultStageProcessor {
            fn name(&self) -> &str {
                "default_stage"
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
        impl PostProcessor for DefaultStageProcessor {
            async fn process(&self, result: ExtractionResult, _config: &ExtractionConfig) -> Result<ExtractionResult> {
                Ok(result)
            }
        }

        assert_eq!(DefaultStageProcessor.processing_stage(), ProcessingStage::Middle);
    }

    #[test]
    fn test_processing_stage_equality() {
        assert_eq!(ProcessingStage::Early, ProcessingStage::Early);
        assert_ne!(ProcessingStage::Early, ProcessingStage::Middle);
        assert_ne!(ProcessingStage::Middle, ProcessingStage::Late);
    }

    #[test]
    fn test_processing_stage_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ProcessingStage::Early);
        set.insert(ProcessingStage::Middle);
        set.insert(ProcessingStage::Late);

        assert_eq!(set.len(), 3);
        assert!(set.contains(&ProcessingStage::Early));
    }

    #[tokio::test]
    async fn test_post_processor_plugin_interface() {
        let processor = MockPostProcessor {
            stage: ProcessingStage::Middle,
        };

        assert_eq!(processor.name(), "mock_processor");
        assert_eq!(processor.version(), "1.0.0");
        assert!(processor.initialize().is_ok());
        assert!(processor.shutdown().is_ok());
    }

    #[tokio::test]
    async fn test_post_processor_empty_content() {
        let processor = MockPostProcessor {
            stage: ProcessingStage::Early,
        };

        let result = ExtractionResult::new("", "text/plain");
        let config = ExtractionConfig::default();
        let result = processor.process(result, &config).await.unwrap();

        assert_eq!(result.content, "");
        assert!(result.metadata.contains_key("processed_by"));
    }

    #[tokio::test]
    async fn test_post_processor_preserves_metadata() {
        let processor = MockPostProcessor {
            stage: ProcessingStage::Early,
        };

        let mut result = ExtractionResult::new("test", "text/plain");
        result
            .metadata
            .insert("existing_key".to_string(), serde_json::json!("existing_value"));

        let config = ExtractionConfig::default();
        let result = processor.process(result, &config).await.unwrap();

        assert_eq!(
            result.metadata.get("existing_key").unwrap(),
            &serde_json::json!("existing_value")
        );
        assert!(result.metadata.contains_key("processed_by"));
    }

    #[tokio::test]
    async fn test_post_processor_preserves_tables() {
        use crate::types::Table;

        let processor = MockPostProcessor {
            stage: ProcessingStage::Early,
        };

        let table = Table {
            cells: vec![vec!["A".to_string(), "B".to_string()]],
            markdown: "| A | B |".to_string(),
            page_number: Some(1),
        };

        let mut result = ExtractionResult::new("test", "text/plain");
        result.tables.push(table);

        let config = ExtractionConfig::default();
        let result = processor.process(result, &config).await.unwrap();

        assert_eq!(result.tables.len(), 1);
        assert_eq!(result.tables[0].cells.len(), 1);
    }
}
