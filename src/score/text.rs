//! Visible-text extraction from a parsed document.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static MAIN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("static selector"));

/// Extract the text a reader would see, with tag boundaries collapsed to
/// single spaces and the result trimmed.
///
/// Prefers the first `<main>` element when the page declares one; otherwise
/// takes the text content of the whole document.
pub fn visible_text(doc: &Html) -> String {
    let segments: Vec<&str> = match doc.select(&MAIN).next() {
        Some(main) => main.text().collect(),
        None => doc.root_element().text().collect(),
    };
    collapse_whitespace(&segments.join(" "))
}

/// Collapse all whitespace runs to single spaces and trim the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_first_main_element() {
        let doc = Html::parse_document(
            "<body><nav>skip me</nav><main><p>keep me</p></main>\
             <main><p>not me</p></main></body>",
        );
        assert_eq!(visible_text(&doc), "keep me");
    }

    #[test]
    fn falls_back_to_whole_document() {
        let doc = Html::parse_document("<body><div><p>all</p><p>of it</p></div></body>");
        assert_eq!(visible_text(&doc), "all of it");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        let doc = Html::parse_document("<main>  spaced\n\tout\n text  </main>");
        assert_eq!(visible_text(&doc), "spaced out text");
    }

    #[test]
    fn empty_document_yields_empty_text() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(visible_text(&doc), "");
    }
}
