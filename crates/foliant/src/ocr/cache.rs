//! Process-wide cache of configured OCR backend instances.
//!
//! Spawning an OCR backend is expensive, so instances are cached by backend
//! name plus a fingerprint of their configuration options. The cache is a
//! bounded FIFO: once full, the oldest-inserted instance is dropped to make
//! room, with no promotion on hit.

use crate::core::config::{ExtractionConfig, OcrConfig};
use crate::error::{FoliantError, Result};
use crate::plugins::OcrBackend;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

/// Maximum number of backend instances held at once.
pub const MAX_CACHE_SIZE: usize = 10;

/// Name of the built-in backend. It is wired directly into extraction and
/// never goes through the cache or the plugin registry.
pub const BUILTIN_BACKEND: &str = "tesseract";

static BACKEND_CACHE: Lazy<OcrBackendCache> = Lazy::new(OcrBackendCache::new);

/// The process-wide backend cache.
pub fn backend_cache() -> &'static OcrBackendCache {
    &BACKEND_CACHE
}

/// Drop all cached backend instances without shutting them down.
pub fn clear_backend_cache() {
    backend_cache().clear();
}

/// Bounded FIFO cache keyed by backend name and option fingerprint.
pub struct OcrBackendCache {
    entries: Mutex<IndexMap<(String, String), Arc<dyn OcrBackend>>>,
}

impl OcrBackendCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
        }
    }

    /// Return a cached instance for `backend_name` and `options`, creating
    /// and publishing one on miss.
    ///
    /// The built-in backend short-circuits to `Ok(None)` untouched. On a
    /// miss, `factory` builds the instance from the options and
    /// `register_fn` publishes it; if either fails the error propagates and
    /// the cache is left unchanged. Only after both succeed is the oldest
    /// entry evicted (dropped without shutdown) when the cache is full, and
    /// the new instance inserted.
    pub fn get_or_create<R, F>(
        &self,
        backend_name: &str,
        options: &serde_json::Map<String, Value>,
        register_fn: R,
        factory: F,
    ) -> Result<Option<Arc<dyn OcrBackend>>>
    where
        R: FnOnce(Arc<dyn OcrBackend>) -> Result<()>,
        F: FnOnce(&serde_json::Map<String, Value>) -> Result<Arc<dyn OcrBackend>>,
    {
        if backend_name == BUILTIN_BACKEND {
            return Ok(None);
        }

        let key = (backend_name.to_string(), fingerprint(options));

        let mut entries = self
            .entries
            .lock()
            .map_err(|e| FoliantError::LockPoisoned(format!("OCR backend cache: {}", e)))?;

        if let Some(instance) = entries.get(&key) {
            tracing::debug!(backend = %backend_name, "Reusing cached OCR backend instance");
            return Ok(Some(Arc::clone(instance)));
        }

        let instance = factory(options)?;
        register_fn(Arc::clone(&instance))?;

        if entries.len() >= MAX_CACHE_SIZE {
            if let Some(((evicted_name, _), _)) = entries.shift_remove_index(0) {
                tracing::debug!(backend = %evicted_name, "Evicted oldest cached OCR backend instance");
            }
        }
        entries.insert(key, Arc::clone(&instance));

        Ok(Some(instance))
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("OCR backend cache lock poisoned - critical runtime error")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached instance. Instances are not shut down; shutdown is
    /// the plugin registry's job.
    pub fn clear(&self) {
        self.entries
            .lock()
            .expect("OCR backend cache lock poisoned - critical runtime error")
            .clear();
    }
}

impl Default for OcrBackendCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Order-independent fingerprint of a backend option map.
fn fingerprint(options: &serde_json::Map<String, Value>) -> String {
    let canonical: BTreeMap<&str, &Value> = options.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let serialized =
        serde_json::to_string(&canonical).unwrap_or_else(|_| format!("{:?}", canonical));
    compute_hash(&serialized)
}

fn compute_hash(input: &str) -> String {
    let mut hasher = ahash::AHasher::default();
    input.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Effective option map for a backend, derived from its configuration.
///
/// Explicit `backend_options` win. When absent, easyocr gets a `languages`
/// list and paddleocr a `lang` string seeded from the configured language.
pub fn backend_options(config: &OcrConfig) -> serde_json::Map<String, Value> {
    let mut options = config.backend_options.clone().unwrap_or_default();

    match config.backend.as_str() {
        "easyocr" => {
            if !options.contains_key("languages") {
                options.insert(
                    "languages".to_string(),
                    serde_json::json!([config.language]),
                );
            }
        }
        "paddleocr" => {
            if !options.contains_key("lang") {
                options.insert("lang".to_string(), serde_json::json!(config.language));
            }
        }
        _ => {}
    }

    options
}

/// Make sure the backend named by `config` is built, cached, and registered.
///
/// A missing OCR section and the built-in backend are both no-ops. For any
/// other backend the instance comes from the process-wide cache, with
/// `factory` invoked on miss; the instance it returns must report the
/// configured backend name so registration lands under that name.
pub fn ensure_backend_registered<F>(config: &ExtractionConfig, factory: F) -> Result<()>
where
    F: FnOnce(&serde_json::Map<String, Value>) -> Result<Arc<dyn OcrBackend>>,
{
    let Some(ocr) = &config.ocr else {
        return Ok(());
    };
    if ocr.backend == BUILTIN_BACKEND {
        return Ok(());
    }

    let options = backend_options(ocr);
    backend_cache().get_or_create(
        &ocr.backend,
        &options,
        crate::plugins::register_ocr_backend,
        factory,
    )?;

    Ok(())
}
