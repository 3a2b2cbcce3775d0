//! Core orchestration module.
//!
//! This module contains the orchestration layer for Foliant. It loads the
//! extraction configuration and drives registered plugins over extraction
//! results in a fixed order.
//!
//! # Architecture
//!
//! The core module is responsible for:
//! - **Pipeline**: Running validators and staged post-processors over a
//!   result via `run_pipeline()`
//! - **Configuration**: Loading and managing extraction configuration,
//!   including `foliant.toml` discovery
//!
//! # Example
//!
//! ```rust
//! use foliant::core::pipeline::run_pipeline;
//! use foliant::{ExtractionConfig, ExtractionResult};
//!
//! # async fn example() -> foliant::Result<()> {
//! let config = ExtractionConfig::default();
//! let result = ExtractionResult::new("scanned text", "text/plain");
//!
//! let processed = run_pipeline(result, &config).await?;
//! println!("Processed content: {}", processed.content);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod pipeline;

pub use config::{ExtractionConfig, OcrConfig, PostProcessorConfig};
pub use pipeline::{run_pipeline, run_post_processors, run_validators};
