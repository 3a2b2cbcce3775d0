//! OCR (Optical Character Recognition) support types.
//!
//! This module carries the machinery shared by all OCR backends: a bounded
//! process-wide cache of configured backend instances and normalization of
//! raw engine output into plain text.
//!
//! # Features
//!
//! - **Instance caching**: Backend instances are cached by name and option
//!   fingerprint, FIFO-bounded at [`MAX_CACHE_SIZE`](cache::MAX_CACHE_SIZE)
//! - **Output normalization**: Flat pairs, geometry triples, and nested
//!   per-page shapes all collapse into [`NormalizedText`]
//! - **Line grouping**: Word boxes are grouped into lines with a rolling
//!   vertical anchor, so slightly sloped scans read naturally
//!
//! # Example
//!
//! ```rust
//! use foliant::ocr::normalize_result;
//! use serde_json::json;
//!
//! let entries = vec![json!(["Hello", 0.95]), json!(["world", 0.90])];
//!
//! let normalized = normalize_result(&entries);
//! assert_eq!(normalized.content, "Hello\nworld");
//! assert_eq!(normalized.region_count, 2);
//! ```
pub mod cache;
pub mod normalize;

pub use cache::{
    BUILTIN_BACKEND, MAX_CACHE_SIZE, OcrBackendCache, backend_cache, backend_options,
    clear_backend_cache, ensure_backend_registered,
};
pub use normalize::{
    NormalizedText, normalize_flat_pairs, normalize_geometry, normalize_nested_pages,
    normalize_result,
};
