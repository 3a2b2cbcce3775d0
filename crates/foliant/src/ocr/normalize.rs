//! Normalization of raw OCR engine output into plain text.
//!
//! OCR engines return word-level regions in one of three shapes: flat
//! `[text, confidence]` pairs, `[box, text, confidence]` triples with word
//! geometry, or nested per-page line lists. The functions in this module
//! collapse any of those shapes into a [`NormalizedText`] with line-grouped
//! content and an aggregate confidence.

use crate::types::ExtractionResult;
use serde_json::Value;

/// Maximum vertical distance, in pixels, between two word centers that still
/// land on the same output line. The anchor is the previous word, not the
/// line start, so gently sloping text stays grouped.
const LINE_GROUP_THRESHOLD: f64 = 20.0;

/// Plain-text rendition of one OCR result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedText {
    /// Line-grouped text, lines joined with `\n`.
    pub content: String,
    /// Mean word confidence, 0.0 when no words were found.
    pub confidence: f64,
    /// Number of text regions that contributed to the result.
    pub region_count: usize,
}

impl NormalizedText {
    /// Build an `ExtractionResult` carrying the confidence and region count
    /// in its metadata, the shape OCR backends return from `process_image`.
    pub fn into_result(self, mime_type: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new(self.content, mime_type);
        result
            .metadata
            .insert("confidence".to_string(), serde_json::json!(self.confidence));
        result
            .metadata
            .insert("text_regions".to_string(), serde_json::json!(self.region_count));
        result
    }
}

/// One recognized word with its bounding geometry.
struct WordBox {
    corners: [(f64, f64); 4],
    text: String,
    confidence: f64,
}

impl WordBox {
    /// Parse a `[box, text, confidence]` entry. Returns `None` for anything
    /// that does not match, including unparseable geometry.
    fn parse(entry: &Value) -> Option<Self> {
        let parts = entry.as_array()?;
        if parts.len() < 3 {
            return None;
        }

        let corners = parse_box(&parts[0])?;
        let text = parts[1].as_str()?.to_string();
        let confidence = parts[2].as_f64()?;

        Some(Self {
            corners,
            text,
            confidence,
        })
    }

    /// Mean of the four corner y coordinates.
    fn y_center(&self) -> f64 {
        self.corners.iter().map(|(_, y)| y).sum::<f64>() / 4.0
    }

    /// Vertical sort key. Top-left plus bottom-right y gives a stable
    /// top-to-bottom ordering for both quads and rectangles.
    fn sort_key(&self) -> f64 {
        self.corners[0].1 + self.corners[2].1
    }

    fn left(&self) -> f64 {
        self.corners[0].0
    }
}

/// Parse box geometry. Accepts a four-corner quad (`[[x, y]; 4]`) or an
/// `[x, y, w, h]` rectangle.
fn parse_box(value: &Value) -> Option<[(f64, f64); 4]> {
    let parts = value.as_array()?;
    if parts.len() != 4 {
        return None;
    }

    if parts[0].is_array() {
        let mut corners = [(0.0, 0.0); 4];
        for (corner, part) in corners.iter_mut().zip(parts) {
            let point = part.as_array()?;
            if point.len() < 2 {
                return None;
            }
            *corner = (point[0].as_f64()?, point[1].as_f64()?);
        }
        Some(corners)
    } else {
        let x = parts[0].as_f64()?;
        let y = parts[1].as_f64()?;
        let w = parts[2].as_f64()?;
        let h = parts[3].as_f64()?;
        Some([(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
    }
}

/// Normalize flat `[text, confidence]` pairs.
///
/// Well-formed pairs are two-element arrays holding a string and a number;
/// anything else is skipped. Non-empty texts are joined with newlines. The
/// confidence denominator counts every well-formed pair, so empty-text
/// regions drag the mean down; `region_count` likewise counts every
/// well-formed pair.
pub fn normalize_flat_pairs(entries: &[Value]) -> NormalizedText {
    let mut texts = Vec::new();
    let mut confidence_total = 0.0;
    let mut well_formed = 0usize;

    for entry in entries {
        let Some(pair) = entry.as_array() else { continue };
        if pair.len() != 2 {
            continue;
        }
        let (Some(text), Some(confidence)) = (pair[0].as_str(), pair[1].as_f64()) else {
            continue;
        };

        well_formed += 1;
        if !text.is_empty() {
            texts.push(text.to_string());
            confidence_total += confidence;
        }
    }

    let confidence = if well_formed == 0 {
        0.0
    } else {
        confidence_total / well_formed as f64
    };

    NormalizedText {
        content: texts.join("\n"),
        confidence,
        region_count: well_formed,
    }
}

/// Normalize `[box, text, confidence]` triples into line-grouped text.
///
/// Words are sorted top-to-bottom, then grouped into lines: a word starts a
/// new line when its vertical center is more than 20 pixels from the
/// previous word's center. Within a line, words are ordered left-to-right
/// and joined with single spaces. Lines whose joined text is empty are
/// dropped. Confidence and `region_count` consider only words with
/// non-empty text; malformed entries are skipped entirely.
pub fn normalize_geometry(entries: &[Value]) -> NormalizedText {
    let mut words: Vec<WordBox> = entries.iter().filter_map(WordBox::parse).collect();
    words.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));

    let mut confidence_total = 0.0;
    let mut region_count = 0usize;
    for word in &words {
        if !word.text.is_empty() {
            confidence_total += word.confidence;
            region_count += 1;
        }
    }

    let mut lines: Vec<Vec<WordBox>> = Vec::new();
    let mut current: Vec<WordBox> = Vec::new();
    let mut prev_center: Option<f64> = None;

    for word in words {
        let center = word.y_center();
        let starts_new_line = prev_center.is_some_and(|prev| (center - prev).abs() > LINE_GROUP_THRESHOLD);
        if starts_new_line && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        prev_center = Some(center);
        current.push(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let mut line_texts = Vec::new();
    for mut line in lines {
        line.sort_by(|a, b| a.left().total_cmp(&b.left()));
        let text = line
            .iter()
            .map(|word| word.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() {
            line_texts.push(text);
        }
    }

    let confidence = if region_count == 0 {
        0.0
    } else {
        confidence_total / region_count as f64
    };

    NormalizedText {
        content: line_texts.join("\n"),
        confidence,
        region_count,
    }
}

/// Normalize an OCR result whose shape is not known up front.
///
/// Empty input yields the zero result. When every entry is a two-element
/// array the flat path is taken; otherwise the entries are treated as
/// geometry triples.
pub fn normalize_result(entries: &[Value]) -> NormalizedText {
    if entries.is_empty() {
        return NormalizedText::default();
    }

    let all_pairs = entries.iter().all(|entry| entry.as_array().is_some_and(|a| a.len() == 2));
    if all_pairs {
        normalize_flat_pairs(entries)
    } else {
        normalize_geometry(entries)
    }
}

/// Normalize a nested per-page result shape.
///
/// Only the first page is read; a missing or null first page yields the
/// zero result. Each line must be an array whose second element is a
/// `[text, confidence]` array; malformed lines are skipped silently.
/// Confidence and `region_count` consider only non-empty texts.
pub fn normalize_nested_pages(result: &Value) -> NormalizedText {
    let Some(pages) = result.as_array() else {
        return NormalizedText::default();
    };
    let Some(lines) = pages.first().and_then(Value::as_array) else {
        return NormalizedText::default();
    };

    let mut texts = Vec::new();
    let mut confidence_total = 0.0;

    for line in lines {
        let Some(parts) = line.as_array() else { continue };
        if parts.len() < 2 {
            continue;
        }
        let Some(text_conf) = parts[1].as_array() else { continue };
        if text_conf.len() < 2 {
            continue;
        }
        let (Some(text), Some(confidence)) = (text_conf[0].as_str(), text_conf[1].as_f64()) else {
            continue;
        };

        if !text.is_empty() {
            texts.push(text.to_string());
            confidence_total += confidence;
        }
    }

    let region_count = texts.len();
    let confidence = if region_count == 0 {
        0.0
    } else {
        confidence_total / region_count as f64
    };

    NormalizedText {
        content: texts.join("\n"),
        confidence,
        region_count,
    }
}
