//! Flesch Reading Ease over extracted page text.
//!
//! The preferred path segments the text into sentences first and recomputes
//! the metric over the normalized rejoin; when segmentation produces nothing
//! usable the raw text is scored directly. Both paths use the same formula,
//! so the fallback only changes how sentence boundaries are normalized.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Sentence segmenter, compiled once per process. Matches runs of text up to
/// a terminal punctuation group (with trailing quotes/brackets), plus any
/// unterminated tail.
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^.!?]+[.!?]+["'”’)\]]*|[^.!?]+\z"#).expect("static pattern")
});

/// Flesch Reading Ease of the given text. Unbounded: real pages can score
/// below 0 or above 100 and the value is reported as-is.
pub fn flesch_reading_ease(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    match segment_sentences(text) {
        Some(sentences) => {
            let normalized = sentences.join(" ");
            trace!(sentences = sentences.len(), "segmented text for readability");
            flesch(&normalized, sentences.len())
        }
        None => {
            trace!("sentence segmentation produced nothing, scoring raw text");
            flesch(text, count_sentences(text))
        }
    }
}

/// Split text into trimmed sentences. Returns `None` when the segmenter
/// finds nothing, which callers treat as the fallback path.
fn segment_sentences(text: &str) -> Option<Vec<String>> {
    let sentences: Vec<String> = SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        None
    } else {
        Some(sentences)
    }
}

/// Count sentences by terminal punctuation runs; minimum one.
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut in_terminal = false;
    for c in text.chars() {
        let terminal = matches!(c, '.' | '!' | '?');
        if terminal && !in_terminal {
            count += 1;
        }
        in_terminal = terminal;
    }
    count.max(1)
}

/// 206.835 − 1.015·(words per sentence) − 84.6·(syllables per word).
fn flesch(text: &str, sentence_count: usize) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len().max(1) as f64;
    let sentence_count = sentence_count.max(1) as f64;
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

    206.835 - 1.015 * (word_count / sentence_count)
        - 84.6 * (syllable_count.max(1) as f64 / word_count)
}

/// Vowel-group syllable heuristic with silent-e handling; every word counts
/// at least one syllable.
fn syllables(word: &str) -> usize {
    let w: String = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_ascii_lowercase();
    if w.is_empty() {
        return 1;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for c in w.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    // Trailing silent e, except the consonant-le ending ("table", "little").
    if w.ends_with('e') && !w.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_counts() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("table"), 2);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("readability"), 5);
        assert_eq!(syllables("a"), 1);
        assert_eq!(syllables("rhythm"), 1);
        // Non-alphabetic tokens still count as one.
        assert_eq!(syllables("123"), 1);
    }

    #[test]
    fn segments_simple_prose() {
        let s = segment_sentences("One sentence. Another one! And a third?").unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], "One sentence.");
    }

    #[test]
    fn segmenter_keeps_trailing_quotes() {
        let s = segment_sentences(r#"He said "stop." Then he left."#).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], r#"He said "stop.""#);
    }

    #[test]
    fn unterminated_tail_is_a_sentence() {
        let s = segment_sentences("Finished here. unfinished tail").unwrap();
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn simple_text_scores_high() {
        // Short words, short sentences: well above the 60–70 "plain English" band.
        let score = flesch_reading_ease("The cat sat on the mat. The dog ran in the sun.");
        assert!(score > 90.0, "got {score}");
    }

    #[test]
    fn dense_text_scores_lower_than_simple_text() {
        let simple = flesch_reading_ease("We like short words. They read well.");
        let dense = flesch_reading_ease(
            "Institutional heterogeneity notwithstanding, organizational \
             interdependencies systematically exacerbate administrative \
             complexity considerations.",
        );
        assert!(dense < simple);
    }

    #[test]
    fn unbounded_in_both_directions() {
        // One long word per sentence drives the syllable term far negative.
        let hard = flesch_reading_ease("Incomprehensibilities. Antidisestablishmentarianism.");
        assert!(hard < 0.0, "got {hard}");

        let easy = flesch_reading_ease("Go. Run. Hide.");
        assert!(easy > 100.0, "got {easy}");
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(flesch_reading_ease(""), 0.0);
        assert_eq!(flesch_reading_ease("   "), 0.0);
    }

    #[test]
    fn deterministic() {
        let text = "Stable inputs give stable outputs. Every time.";
        assert_eq!(flesch_reading_ease(text), flesch_reading_ease(text));
    }
}
