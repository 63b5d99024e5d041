//! ReadSight — AI readability scoring for web pages.
//!
//! Renders a page with headless Chromium, then scores the rendered DOM on
//! five signals: semantic structure, Flesch reading ease, JSON-LD presence,
//! metadata completeness, and image alt-text coverage. The five sub-scores
//! combine into a single weighted 0–100 score.
//!
//! The pipeline is stateless: [`fetch::fetch`] drives one browser session per
//! call, [`score::score`] is a pure function over the returned HTML.

pub mod cli;
pub mod fetch;
pub mod score;

pub use fetch::{fetch, FetchError};
pub use score::{score, ScoreError, ScoreReport};
