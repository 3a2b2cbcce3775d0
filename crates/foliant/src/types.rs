use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// MIME type assigned to plain-text OCR output.
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";

/// General extraction result passed through the processing pipeline.
///
/// This is the working record for one extraction call. The host engine creates
/// it, OCR backends populate the initial content, and validators and
/// post-processors read or rewrite it before it is returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted text content.
    pub content: String,

    /// MIME type of the source document.
    pub mime_type: String,

    /// Metadata attached by backends and post-processors.
    ///
    /// Insertion order is preserved and observable, so consumers can tell
    /// which pipeline stage wrote a key first.
    #[serde(default)]
    pub metadata: IndexMap<String, serde_json::Value>,

    /// Tables detected in the document.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tables: Vec<Table>,

    /// Images extracted from the document.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<ExtractedImage>,
}

impl ExtractionResult {
    /// Create a result with the given content and MIME type and no
    /// metadata, tables, or images.
    pub fn new(content: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mime_type: mime_type.into(),
            metadata: IndexMap::new(),
            tables: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// Extracted table structure.
///
/// Tables are converted to both structured cell data and Markdown format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table cells as a 2D vector (rows x columns)
    pub cells: Vec<Vec<String>>,
    /// Markdown representation of the table
    pub markdown: String,
    /// Page number where the table was found (1-indexed), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,
}

/// An image extracted from a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Image format (e.g. "png", "jpeg").
    pub format: String,
}
