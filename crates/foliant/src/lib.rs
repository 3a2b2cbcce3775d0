//! Foliant - Plugin-Driven OCR Result Processing Library
//!
//! Foliant is a Rust-first OCR result processing library with language-agnostic
//! plugin support. It normalizes raw OCR engine output, validates extraction
//! results, and enriches them through staged post-processing.
//!
//! # Quick Start
//!
//! ```rust
//! use foliant::{ExtractionConfig, ExtractionResult, run_pipeline};
//!
//! # async fn example() -> foliant::Result<()> {
//! // Validate and post-process an extraction result
//! let config = ExtractionConfig::default();
//! let result = ExtractionResult::new("scanned text", "text/plain");
//! let processed = run_pipeline(result, &config).await?;
//! println!("Processed: {}", processed.content);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): Pipeline orchestration and configuration loading
//! - **Plugin System** (`plugins`): OCR backends, post-processors, and validators
//!   behind process-wide registries
//! - **OCR** (`ocr`): Backend instance caching and raw output normalization
//!
//! # Features
//!
//! - Fail-fast validation in priority order, before any result mutation
//! - Staged post-processing (Early, Middle, Late) with per-processor error isolation
//! - Bounded FIFO caching of expensive OCR backend instances
//! - Cross-language OCR backend support (EasyOCR, PaddleOCR, custom engines)

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod ocr;
pub mod plugins;
pub mod types;

pub use error::{FoliantError, Result};
pub use types::*;

pub use core::config::{ExtractionConfig, OcrConfig, PostProcessorConfig};
pub use core::pipeline::{run_pipeline, run_post_processors, run_validators};

pub use plugins::registry::{get_ocr_backend_registry, get_post_processor_registry, get_validator_registry};
