//! Plugin pipeline orchestration.
//!
//! This module runs the registered plugins over a freshly extracted result
//! in the correct order: validators first, then post-processors by stage.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::ProcessingStage;
use crate::types::ExtractionResult;

/// Run the plugin pipeline on an extraction result.
///
/// Executes in the following order:
/// 1. Validators - run against the raw extraction result, in descending
///    priority order, and fail fast
/// 2. Post-Processors - execute by stage (Early, Middle, Late) to
///    modify/enhance the result
///
/// Validators always see the extraction result as the extractor produced
/// it; no post-processor runs until every validator has accepted it.
///
/// # Arguments
///
/// * `result` - The extraction result to process
/// * `config` - Extraction configuration
///
/// # Returns
///
/// The processed extraction result.
///
/// # Errors
///
/// - Validator rejections surface immediately as `ValidationFailed`,
///   tagged with the validator's name
/// - Post-processor errors are caught and recorded in metadata under
///   `processing_error_<name>`
/// - System errors (IO, lock poisoning) always bubble up
pub async fn run_pipeline(result: ExtractionResult, config: &ExtractionConfig) -> Result<ExtractionResult> {
    run_validators(&result, config).await?;
    run_post_processors(result, config).await
}

/// Run every registered validator against `result`, highest priority first.
///
/// Validators whose `should_validate` returns false are skipped. The first
/// rejection aborts the run; errors that are not already `ValidationFailed`
/// are wrapped so callers always see which validator rejected the result.
pub async fn run_validators(result: &ExtractionResult, config: &ExtractionConfig) -> Result<()> {
    let validators = {
        let registry = crate::plugins::registry::get_validator_registry();
        let registry = registry
            .read()
            .map_err(|e| crate::FoliantError::Other(format!("Validator registry lock poisoned: {}", e)))?;
        registry.get_all()
    };

    for validator in validators {
        if !validator.should_validate(result) {
            continue;
        }

        if let Err(e) = validator.validate(result, config).await {
            return Err(attach_validator_name(e, validator.name()));
        }
    }

    Ok(())
}

/// Run registered post-processors over `result`, stage by stage.
///
/// Processors run in Early, Middle, Late order, and within a stage in
/// registration order. The configuration's allow-list is consulted before
/// its deny-list. A failing processor is logged and recorded in metadata
/// under `processing_error_<name>`; the pipeline then continues with the
/// result that processor received.
pub async fn run_post_processors(
    mut result: ExtractionResult,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    let pp_config = config.postprocessor.as_ref();
    if !pp_config.is_none_or(|c| c.enabled) {
        return Ok(result);
    }

    let processor_registry = crate::plugins::registry::get_post_processor_registry();

    for stage in [ProcessingStage::Early, ProcessingStage::Middle, ProcessingStage::Late] {
        let processors = {
            let registry = processor_registry.read().map_err(|e| {
                crate::FoliantError::Other(format!("Post-processor registry lock poisoned: {}", e))
            })?;
            registry.get_for_stage(stage)
        };

        for processor in processors {
            let processor_name = processor.name();

            let should_run = if let Some(config) = pp_config {
                if let Some(ref enabled) = config.enabled_processors {
                    enabled.iter().any(|name| name == processor_name)
                } else if let Some(ref disabled) = config.disabled_processors {
                    !disabled.iter().any(|name| name == processor_name)
                } else {
                    true
                }
            } else {
                true
            };

            if !should_run {
                continue;
            }

            match processor.process(result.clone(), config).await {
                Ok(processed) => result = processed,
                Err(e) => {
                    tracing::warn!(
                        processor = %processor_name,
                        error = %e,
                        "Post-processor failed, continuing with unprocessed result"
                    );
                    let error_key = format!("processing_error_{}", processor_name);
                    result
                        .metadata
                        .insert(error_key, serde_json::Value::String(e.to_string()));
                }
            }
        }
    }

    Ok(result)
}

/// Tag a validator error with the validator's name, wrapping foreign error
/// kinds in `ValidationFailed` so the rejection source is never lost.
fn attach_validator_name(error: crate::FoliantError, name: &str) -> crate::FoliantError {
    match error {
        crate::FoliantError::ValidationFailed {
            message,
            validator,
            source,
        } => crate::FoliantError::ValidationFailed {
            message,
            validator: validator.or_else(|| Some(name.to_string())),
            source,
        },
        other => crate::FoliantError::ValidationFailed {
            message: other.to_string(),
            validator: Some(name.to_string()),
            source: Some(Box::new(other)),
        },
    }
}
