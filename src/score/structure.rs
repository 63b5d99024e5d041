//! Structural signals: semantic tags, metadata completeness, alt coverage.

use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Landmark tags that convey document structure to readers and crawlers.
const SEMANTIC_TAGS: [&str; 5] = ["header", "main", "article", "section", "footer"];

static SEMANTIC_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    SEMANTIC_TAGS
        .iter()
        .map(|tag| Selector::parse(tag).expect("static selector"))
        .collect()
});

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).expect("static selector"));
static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("static selector"));
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("static selector"));

/// Fraction of the five landmark tags present at least once. Range [0, 1].
pub fn semantic_score(doc: &Html) -> f64 {
    let present = SEMANTIC_SELECTORS
        .iter()
        .filter(|sel| doc.select(sel).next().is_some())
        .count();
    present as f64 / SEMANTIC_TAGS.len() as f64
}

/// Fraction of `<title>`, `<meta name="description">`, and
/// `<meta property="og:title">` present. Range [0, 1].
pub fn meta_score(doc: &Html) -> f64 {
    let present = [&*TITLE, &*META_DESCRIPTION, &*OG_TITLE]
        .iter()
        .filter(|sel| doc.select(sel).next().is_some())
        .count();
    present as f64 / 3.0
}

/// Fraction of `<img>` elements carrying a non-empty `alt` attribute.
///
/// A document with no images at all is vacuously fully accessible (1.0).
pub fn img_alt_score(doc: &Html) -> f64 {
    let mut total = 0usize;
    let mut with_alt = 0usize;
    for img in doc.select(&IMG) {
        total += 1;
        if img.value().attr("alt").is_some_and(|alt| !alt.is_empty()) {
            with_alt += 1;
        }
    }
    if total == 0 {
        1.0
    } else {
        with_alt as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn semantic_all_present() {
        let d = doc(
            "<header></header><main></main><article></article>\
             <section></section><footer></footer>",
        );
        assert_eq!(semantic_score(&d), 1.0);
    }

    #[test]
    fn semantic_none_present() {
        let d = doc("<div><p>plain page</p></div>");
        assert_eq!(semantic_score(&d), 0.0);
    }

    #[test]
    fn semantic_counts_tags_not_occurrences() {
        // Three <section> elements still only count the tag once.
        let d = doc("<section></section><section></section><section></section>");
        assert_eq!(semantic_score(&d), 0.2);
    }

    #[test]
    fn meta_all_and_none() {
        let full = doc(
            r#"<head><title>T</title>
               <meta name="description" content="d">
               <meta property="og:title" content="t"></head>"#,
        );
        assert_eq!(meta_score(&full), 1.0);

        let none = doc("<head></head>");
        assert_eq!(meta_score(&none), 0.0);
    }

    #[test]
    fn meta_partial() {
        let d = doc("<head><title>T</title></head>");
        assert!((meta_score(&d) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn img_alt_no_images_is_vacuously_full() {
        let d = doc("<body><p>no pictures here</p></body>");
        assert_eq!(img_alt_score(&d), 1.0);
    }

    #[test]
    fn img_alt_fraction() {
        let d = doc(
            r#"<img src="a" alt="a cat"><img src="b"><img src="c" alt="">"#,
        );
        // One of three has a non-empty alt.
        assert!((img_alt_score(&d) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn img_alt_empty_attribute_does_not_count() {
        let d = doc(r#"<img src="a" alt="">"#);
        assert_eq!(img_alt_score(&d), 0.0);
    }
}
