//! Plugin registration and discovery.
//!
//! This module provides registries for managing plugins of different types.
//! Each plugin type (OcrBackend, PostProcessor, Validator) has its own registry
//! with type-safe registration and lookup.

use crate::plugins::{OcrBackend, PostProcessor, ProcessingStage, Validator};
use crate::{FoliantError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Validate a plugin name before registration.
///
/// # Rules
///
/// - Name cannot be empty
/// - Name cannot contain whitespace
///
/// # Errors
///
/// Returns `FoliantError::InvalidPlugin` if the name is invalid.
fn validate_plugin_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FoliantError::invalid_plugin(name, "plugin name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(FoliantError::invalid_plugin(name, "plugin name cannot contain whitespace"));
    }

    Ok(())
}

/// Registry for OCR backend plugins.
///
/// Manages OCR backends keyed by name, with language-based selection.
///
/// # Thread Safety
///
/// The registry itself is not synchronized; the global instance is wrapped in
/// an `RwLock` and all mutation goes through that lock.
///
/// # Example
///
/// ```rust,no_run
/// use foliant::plugins::registry::OcrBackendRegistry;
/// use std::sync::Arc;
///
/// let mut registry = OcrBackendRegistry::new();
/// // registry.register(Arc::new(MyOcrBackend::new()))?;
/// # Ok::<(), foliant::FoliantError>(())
/// ```
pub struct OcrBackendRegistry {
    backends: HashMap<String, Arc<dyn OcrBackend>>,
}

impl OcrBackendRegistry {
    /// Create a new empty OCR backend registry.
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Register an OCR backend.
    ///
    /// If a backend with the same name is already registered, the old backend
    /// is shut down and replaced. A failing `shutdown()` on the old backend
    /// aborts the registration and leaves the old backend in place.
    ///
    /// # Arguments
    ///
    /// * `backend` - The OCR backend to register
    ///
    /// # Returns
    ///
    /// - `Ok(())` if registration succeeded
    /// - `Err(...)` if the name is invalid, initialization failed, or the
    ///   displaced backend failed to shut down
    pub fn register(&mut self, backend: Arc<dyn OcrBackend>) -> Result<()> {
        let name = backend.name().to_string();

        validate_plugin_name(&name)?;

        backend.initialize()?;

        if let Some(old) = self.backends.get(&name) {
            old.shutdown()?;
        }

        self.backends.insert(name, backend);
        Ok(())
    }

    /// Get an OCR backend by name.
    ///
    /// # Arguments
    ///
    /// * `name` - Backend name
    ///
    /// # Returns
    ///
    /// The backend if found, or an error if not registered.
    pub fn get(&self, name: &str) -> Result<Arc<dyn OcrBackend>> {
        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| FoliantError::invalid_plugin(name, format!("OCR backend '{}' not registered", name)))
    }

    /// Get an OCR backend that supports a specific language.
    ///
    /// Returns the first backend that supports the language.
    ///
    /// # Arguments
    ///
    /// * `language` - Language code (e.g., "eng", "deu")
    ///
    /// # Returns
    ///
    /// The first backend supporting the language, or an error if none found.
    pub fn get_for_language(&self, language: &str) -> Result<Arc<dyn OcrBackend>> {
        self.backends
            .values()
            .find(|backend| backend.supports_language(language))
            .cloned()
            .ok_or_else(|| {
                FoliantError::invalid_plugin(language, format!("No OCR backend supports language '{}'", language))
            })
    }

    /// List all registered backend names.
    pub fn list(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }

    /// Remove a backend from the registry.
    ///
    /// Calls `shutdown()` on the backend after removing. Absent names are a
    /// no-op.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if let Some(backend) = self.backends.remove(name) {
            backend.shutdown()?;
        }
        Ok(())
    }

    /// Shutdown all backends and clear the registry.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let names: Vec<_> = self.backends.keys().cloned().collect();
        for name in names {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for OcrBackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry for post-processor plugins.
///
/// Manages post-processors organized by processing stage. Within a stage,
/// processors keep their registration order; the pipeline runs the stages
/// Early, Middle, Late.
pub struct PostProcessorRegistry {
    processors: HashMap<ProcessingStage, IndexMap<String, Arc<dyn PostProcessor>>>,
    name_index: HashMap<String, ProcessingStage>,
}

impl PostProcessorRegistry {
    /// Create a new empty post-processor registry.
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
            name_index: HashMap::new(),
        }
    }

    /// Register a post-processor.
    ///
    /// The processor is stored under the stage reported by its
    /// `processing_stage()` method, after all previously registered processors
    /// of that stage. Re-registering a name displaces the old processor (its
    /// `shutdown()` is called first) and the replacement joins the end of its
    /// stage's order, even when the stage differs from the old one.
    ///
    /// # Arguments
    ///
    /// * `processor` - The post-processor to register
    ///
    /// # Returns
    ///
    /// - `Ok(())` if registration succeeded
    /// - `Err(...)` if the name is invalid, initialization failed, or the
    ///   displaced processor failed to shut down
    pub fn register(&mut self, processor: Arc<dyn PostProcessor>) -> Result<()> {
        let name = processor.name().to_string();
        let stage = processor.processing_stage();

        validate_plugin_name(&name)?;

        processor.initialize()?;

        if let Some(old_stage) = self.name_index.get(&name).copied() {
            if let Some(old) = self.processors.get(&old_stage).and_then(|stage_map| stage_map.get(&name)) {
                old.shutdown()?;
            }

            if let Some(stage_map) = self.processors.get_mut(&old_stage) {
                stage_map.shift_remove(&name);
                if stage_map.is_empty() {
                    self.processors.remove(&old_stage);
                }
            }
        }

        self.processors
            .entry(stage)
            .or_default()
            .insert(name.clone(), processor);
        self.name_index.insert(name, stage);

        Ok(())
    }

    /// Get all processors for a specific stage, in registration order.
    ///
    /// # Arguments
    ///
    /// * `stage` - The processing stage
    ///
    /// # Returns
    ///
    /// Vector of processors in the order they were registered.
    pub fn get_for_stage(&self, stage: ProcessingStage) -> Vec<Arc<dyn PostProcessor>> {
        self.processors
            .get(&stage)
            .map(|stage_map| stage_map.values().map(Arc::clone).collect())
            .unwrap_or_default()
    }

    /// List all registered processor names in execution order.
    ///
    /// Stages are listed Early, Middle, Late; names within a stage follow
    /// registration order.
    pub fn list(&self) -> Vec<String> {
        let mut names = Vec::new();
        for stage in [ProcessingStage::Early, ProcessingStage::Middle, ProcessingStage::Late] {
            if let Some(stage_map) = self.processors.get(&stage) {
                names.extend(stage_map.keys().cloned());
            }
        }
        names
    }

    /// Remove a processor from the registry.
    ///
    /// Calls `shutdown()` on the removed processor. Absent names are a no-op.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let stage = match self.name_index.remove(name) {
            Some(stage) => stage,
            None => return Ok(()),
        };

        let processor_to_shutdown = if let Some(stage_map) = self.processors.get_mut(&stage) {
            let processor = stage_map.shift_remove(name);
            if stage_map.is_empty() {
                self.processors.remove(&stage);
            }
            processor
        } else {
            None
        };

        if let Some(processor) = processor_to_shutdown {
            processor.shutdown()?;
        }

        Ok(())
    }

    /// Shutdown all processors and clear the registry.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let names = self.list();
        for name in names {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for PostProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry for validator plugins.
///
/// Manages validators with priority-based execution order. Higher priority
/// runs first; ties run in registration order.
pub struct ValidatorRegistry {
    validators: BTreeMap<i32, IndexMap<String, Arc<dyn Validator>>>,
}

impl ValidatorRegistry {
    /// Create a new empty validator registry.
    pub fn new() -> Self {
        Self {
            validators: BTreeMap::new(),
        }
    }

    /// Register a validator.
    ///
    /// The validator is stored under the priority reported by its `priority()`
    /// method. Re-registering a name displaces the old validator (its
    /// `shutdown()` is called first) even when the old validator lives under a
    /// different priority.
    ///
    /// # Arguments
    ///
    /// * `validator` - The validator to register
    ///
    /// # Returns
    ///
    /// - `Ok(())` if registration succeeded
    /// - `Err(...)` if the name is invalid, initialization failed, or the
    ///   displaced validator failed to shut down
    pub fn register(&mut self, validator: Arc<dyn Validator>) -> Result<()> {
        let name = validator.name().to_string();
        let priority = validator.priority();

        validate_plugin_name(&name)?;

        validator.initialize()?;

        let existing = self
            .validators
            .values()
            .find_map(|priority_map| priority_map.get(&name).cloned());
        if let Some(old) = existing {
            old.shutdown()?;
            for priority_map in self.validators.values_mut() {
                priority_map.shift_remove(&name);
            }
            self.validators.retain(|_, priority_map| !priority_map.is_empty());
        }

        self.validators.entry(priority).or_default().insert(name, validator);

        Ok(())
    }

    /// Get all validators in priority order.
    ///
    /// # Returns
    ///
    /// Vector of validators in priority order (highest first); validators
    /// sharing a priority appear in registration order.
    pub fn get_all(&self) -> Vec<Arc<dyn Validator>> {
        let mut result = Vec::new();

        for (_priority, validators) in self.validators.iter().rev() {
            for validator in validators.values() {
                result.push(Arc::clone(validator));
            }
        }

        result
    }

    /// List all registered validator names in execution order.
    pub fn list(&self) -> Vec<String> {
        self.validators
            .iter()
            .rev()
            .flat_map(|(_priority, validators)| validators.keys().cloned())
            .collect()
    }

    /// Remove a validator from the registry.
    ///
    /// Calls `shutdown()` on the removed validator. Absent names are a no-op.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let mut validator_to_shutdown: Option<Arc<dyn Validator>> = None;

        for validators in self.validators.values_mut() {
            if let Some(validator) = validators.shift_remove(name)
                && validator_to_shutdown.is_none()
            {
                validator_to_shutdown = Some(validator);
            }
        }

        self.validators.retain(|_, validators| !validators.is_empty());

        if let Some(validator) = validator_to_shutdown {
            validator.shutdown()?;
        }

        Ok(())
    }

    /// Shutdown all validators and clear the registry.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let names = self.list();
        for name in names {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global OCR backend registry singleton.
pub static OCR_BACKEND_REGISTRY: Lazy<Arc<RwLock<OcrBackendRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(OcrBackendRegistry::new())));

/// Global post-processor registry singleton.
pub static POST_PROCESSOR_REGISTRY: Lazy<Arc<RwLock<PostProcessorRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(PostProcessorRegistry::new())));

/// Global validator registry singleton.
pub static VALIDATOR_REGISTRY: Lazy<Arc<RwLock<ValidatorRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(ValidatorRegistry::new())));

/// Get the global OCR backend registry.
pub fn get_ocr_backend_registry() -> Arc<RwLock<OcrBackendRegistry>> {
    OCR_BACKEND_REGISTRY.clone()
}

/// Get the global post-processor registry.
pub fn get_post_processor_registry() -> Arc<RwLock<PostProcessorRegistry>> {
    POST_PROCESSOR_REGISTRY.clone()
}

/// Get the global validator registry.
pub fn get_validator_registry() -> Arc<RwLock<ValidatorRegistry>> {
    VALIDATOR_REGISTRY.clone()
}
