//! Composite AI readability scoring over rendered HTML.
//!
//! [`score`] is a pure function: given the rendered document and the URL it
//! came from, it computes five independent sub-scores and folds them into a
//! weighted final score. No network, no filesystem, deterministic for
//! identical inputs.

pub mod jsonld;
pub mod readability;
pub mod structure;
pub mod text;

use scraper::{Html, Selector};
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Weight of the semantic-structure signal in the final score.
pub const WEIGHT_SEMANTIC: f64 = 0.25;
/// Weight of the Flesch reading-ease signal (applied to `readability / 100`).
pub const WEIGHT_READABILITY: f64 = 0.25;
/// Weight of the JSON-LD presence signal.
pub const WEIGHT_JSONLD: f64 = 0.20;
/// Weight of the metadata-completeness signal.
pub const WEIGHT_META: f64 = 0.15;
/// Weight of the image alt-text coverage signal.
pub const WEIGHT_IMG_ALT: f64 = 0.15;

/// Errors raised while scoring a document.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The base URL the document was fetched from is not a valid URL.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// One evaluation's worth of scores. Produced once per page, never stored.
///
/// All numeric fields are rounded to two decimal places. `readability_score`
/// is the raw Flesch value and may fall outside [0, 100] in either direction;
/// only its weighted contribution is divided by 100, never clamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub semantic_score: f64,
    pub readability_score: f64,
    pub has_jsonld: bool,
    pub meta_score: f64,
    pub img_alt_score: f64,
    pub final_score: f64,
}

static BASE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("base[href]").expect("static selector"));

/// Score a rendered HTML document against the five readability signals.
pub fn score(html: &str, base_url: &str) -> Result<ScoreReport, ScoreError> {
    let fallback_base = Url::parse(base_url)?;
    let doc = Html::parse_document(html);
    let base = document_base(&doc, &fallback_base);

    let semantic = structure::semantic_score(&doc);
    let visible = text::visible_text(&doc);
    let readability = readability::flesch_reading_ease(&visible);
    let has_jsonld = jsonld::has_jsonld(&doc, &base);
    let meta = structure::meta_score(&doc);
    let img_alt = structure::img_alt_score(&doc);

    // Final score folds the raw (unrounded) sub-scores; rounding is for
    // reporting only.
    let final_score = 100.0
        * (WEIGHT_SEMANTIC * semantic
            + WEIGHT_READABILITY * (readability / 100.0)
            + WEIGHT_JSONLD * if has_jsonld { 1.0 } else { 0.0 }
            + WEIGHT_META * meta
            + WEIGHT_IMG_ALT * img_alt);

    debug!(
        %base,
        semantic,
        readability,
        has_jsonld,
        meta,
        img_alt,
        final_score,
        "scored document"
    );

    Ok(ScoreReport {
        semantic_score: round2(semantic),
        readability_score: round2(readability),
        has_jsonld,
        meta_score: round2(meta),
        img_alt_score: round2(img_alt),
        final_score: round2(final_score),
    })
}

/// Effective base for resolving relative URLs: the document's `<base href>`
/// if it declares one, else the URL the page was fetched from.
fn document_base(doc: &Html, fallback: &Url) -> Url {
    doc.select(&BASE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| fallback.join(href).ok())
        .unwrap_or_else(|| fallback.clone())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
