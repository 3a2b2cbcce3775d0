//! Validator plugin trait.
//!
//! This module defines the trait for implementing custom validation logic.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for validator plugins.
///
/// Validators check extraction results for quality, completeness, or correctness.
/// Unlike post-processors, validator errors **fail fast** - if a validator returns
/// an error, the pipeline stops immediately and the error surfaces to the caller.
///
/// # Use Cases
///
/// - **Quality Gates**: Ensure extracted content meets minimum quality standards
/// - **Compliance**: Verify content meets regulatory requirements
/// - **Content Filtering**: Reject documents containing unwanted content
/// - **Format Validation**: Verify extracted content structure
///
/// # Execution Order
///
/// Validators run in descending priority order (higher `priority()` first);
/// validators with equal priority run in registration order. Validation runs
/// before any post-processor, so validators always see the raw extraction
/// result.
///
/// # Error Handling
///
/// Validator errors are **fatal** - they cause the pipeline to fail and bubble
/// up to the caller. Use validators for hard requirements that must be met.
///
/// For non-fatal checks, use post-processors instead.
///
/// # Thread Safety
///
/// Validators must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```rust
/// use foliant::plugins::{Plugin, Validator};
/// use foliant::types::ExtractionResult;
/// use foliant::{ExtractionConfig, FoliantError, Result};
/// use async_trait::async_trait;
///
/// /// Validate that extracted content has minimum length
/// struct MinimumLengthValidator {
///     min_length: usize,
/// }
///
/// impl Plugin for MinimumLengthValidator {
///     fn name(&self) -> &str { "min_length_validator" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl Validator for MinimumLengthValidator {
///     async fn validate(&self, result: &ExtractionResult, _config: &ExtractionConfig)
///         -> Result<()> {
///         if result.content.len() < self.min_length {
///             return Err(FoliantError::validation_failed(format!(
///                 "Content too short: {} < {} characters",
///                 result.content.len(),
///                 self.min_length
///             )));
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Validator: Plugin {
    /// Validate an extraction result.
    ///
    /// Check the extraction result and return `Ok(())` if valid, or an error
    /// if validation fails.
    ///
    /// # Arguments
    ///
    /// * `result` - The extraction result to validate
    /// * `config` - Extraction configuration
    ///
    /// # Returns
    ///
    /// - `Ok(())` if validation passes
    /// - `Err(...)` if validation fails (the pipeline stops)
    ///
    /// # Errors
    ///
    /// - `FoliantError::ValidationFailed` - Validation failed
    /// - Any other error type appropriate for the failure; the pipeline wraps
    ///   it in `ValidationFailed` tagged with this validator's name
    async fn validate(&self, result: &ExtractionResult, config: &ExtractionConfig) -> Result<()>;

    /// Optional: Check if this validator should run for a given result.
    ///
    /// Allows conditional validation based on MIME type, metadata, or content.
    /// Defaults to `true` (always run). When this returns `false`, `validate`
    /// is not invoked at all.
    ///
    /// # Arguments
    ///
    /// * `result` - The extraction result to check
    fn should_validate(&self, _result: &ExtractionResult) -> bool {
        true
    }

    /// Optional: Get the validation priority.
    ///
    /// Higher priority validators run first. Useful for ordering validation
    /// checks (e.g., run cheap validations before expensive ones).
    ///
    /// Default priority is 50.
    fn priority(&self) -> i32 {
        50
    }
}

/// Register a validator with the global registry.
///
/// The validator will be called during result validation, ordered by its
/// `priority()` method. The validator's `name()` method is used as the
/// registration name; registering under a taken name replaces the previous
/// validator after calling its `shutdown()` method, even when the two report
/// different priorities.
///
/// # Arguments
///
/// * `validator` - The validator implementation wrapped in Arc
///
/// # Returns
///
/// - `Ok(())` if registration succeeded
/// - `Err(...)` if validation failed or initialization failed
///
/// # Errors
///
/// - `FoliantError::InvalidPlugin` - Invalid validator name (empty or contains whitespace)
/// - Any error from the validator's `initialize()` method
///
/// # Example
///
/// ```rust
/// use foliant::plugins::{Plugin, Validator, register_validator};
/// use foliant::types::ExtractionResult;
/// use foliant::{ExtractionConfig, FoliantError, Result};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct MinLengthValidator { min_length: usize }
///
/// impl Plugin for MinLengthValidator {
///     fn name(&self) -> &str { "min_length" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl Validator for MinLengthValidator {
///     async fn validate(&self, result: &ExtractionResult, _: &ExtractionConfig) -> Result<()> {
///         if result.content.len() < self.min_length {
///             return Err(FoliantError::validation_failed(
///                 format!("Content too short: {} < {}", result.content.len(), self.min_length)
///             ));
///         }
///         Ok(())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let validator = Arc::new(MinLengthValidator { min_length: 10 });
/// register_validator(validator)?;
/// # Ok::<(), FoliantError>(())
/// # });
/// ```
pub fn register_validator(validator: Arc<dyn Validator>) -> crate::Result<()> {
    use crate::plugins::registry::get_validator_registry;

    let registry = get_validator_registry();
    let mut registry = registry
        .write()
        .expect("Failed to acquire write lock on validator registry");

    registry.register(validator)
}

/// Unregister a validator by name.
///
/// Removes the validator from the global registry and calls its `shutdown()` method.
///
/// # Arguments
///
/// * `name` - Name of the validator to unregister
///
/// # Returns
///
/// - `Ok(())` if the validator was unregistered or didn't exist
/// - `Err(...)` if the shutdown method failed
pub fn unregister_validator(name: &str) -> crate::Result<()> {
    use crate::plugins::registry::get_validator_registry;

    let registry = get_validator_registry();
    let mut registry = registry
        .write()
        .expect("Failed to acquire write lock on validator registry");

    registry.remove(name)
}

/// List all registered validators.
///
/// Returns the names of all validators currently registered in the global
/// registry, in execution order (descending priority, registration order
/// within a priority).
pub fn list_validators() -> crate::Result<Vec<String>> {
    use crate::plugins::registry::get_validator_registry;

    let registry = get_validator_registry();
    let registry = registry
        .read()
        .expect("Failed to acquire read lock on validator registry");

    Ok(registry.list())
}

/// Clear all validators from the global registry.
///
/// Removes all validators and calls their `shutdown()` methods.
///
/// # Returns
///
/// - `Ok(())` if all validators were cleared successfully
/// - `Err(...)` if any shutdown method failed
pub fn clear_validators() -> crate::Result<()> {
    use crate::plugins::registry::get_validator_registry;

    let registry = get_validator_registry();
    let mut registry = registry
        .write()
        .expect("Failed to acquire write lock on validator registry");

    registry.shutdown_all()
}
