//! JSON-LD structured-data detection.

use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::trace;
use url::Url;

static LD_SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector")
});

/// True iff the document embeds at least one JSON-LD block with content.
pub fn has_jsonld(doc: &Html, base: &Url) -> bool {
    !extract_jsonld(doc, base).is_empty()
}

/// Parse every JSON-LD script block, dropping blocks that are empty or fail
/// to parse. Relative `@id` and `url` values are resolved against `base`.
pub fn extract_jsonld(doc: &Html, base: &Url) -> Vec<Value> {
    doc.select(&LD_SCRIPT)
        .filter_map(|el| {
            let raw: String = el.text().collect();
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(raw) {
                Ok(value) if has_content(&value) => {
                    let mut value = value;
                    resolve_urls(&mut value, base);
                    Some(value)
                }
                Ok(_) => None,
                Err(e) => {
                    trace!("discarding malformed json-ld block: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Empty objects, arrays, strings, and nulls do not count as structured data.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        _ => true,
    }
}

/// Resolve relative `@id` / `url` fields in place, one level deep into
/// top-level arrays and `@graph`.
fn resolve_urls(value: &mut Value, base: &Url) {
    match value {
        Value::Object(obj) => {
            for key in ["@id", "url"] {
                if let Some(Value::String(s)) = obj.get_mut(key) {
                    if let Ok(resolved) = base.join(s) {
                        *s = resolved.to_string();
                    }
                }
            }
            if let Some(Value::Array(graph)) = obj.get_mut("@graph") {
                for item in graph {
                    resolve_urls(item, base);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                resolve_urls(item, base);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/articles/post").unwrap()
    }

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn detects_jsonld_block() {
        let d = doc(
            r#"<script type="application/ld+json">
               {"@type": "Article", "headline": "Hello"}
               </script>"#,
        );
        assert!(has_jsonld(&d, &base()));
    }

    #[test]
    fn plain_script_does_not_count() {
        let d = doc(r#"<script>var x = {"@type": "Article"};</script>"#);
        assert!(!has_jsonld(&d, &base()));
    }

    #[test]
    fn empty_and_malformed_blocks_do_not_count() {
        let d = doc(
            r#"<script type="application/ld+json"></script>
               <script type="application/ld+json">{}</script>
               <script type="application/ld+json">[]</script>
               <script type="application/ld+json">{not json</script>"#,
        );
        assert!(!has_jsonld(&d, &base()));
    }

    #[test]
    fn one_good_block_among_bad_ones_counts() {
        let d = doc(
            r#"<script type="application/ld+json">{}</script>
               <script type="application/ld+json">{"@type": "WebPage"}</script>"#,
        );
        assert!(has_jsonld(&d, &base()));
    }

    #[test]
    fn relative_ids_resolve_against_base() {
        let d = doc(
            r#"<script type="application/ld+json">
               {"@type": "Article", "@id": "/articles/post#article", "url": "post"}
               </script>"#,
        );
        let blocks = extract_jsonld(&d, &base());
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0]["@id"],
            "https://example.com/articles/post#article"
        );
        assert_eq!(blocks[0]["url"], "https://example.com/articles/post");
    }

    #[test]
    fn graph_items_resolve_too() {
        let d = doc(
            r#"<script type="application/ld+json">
               {"@graph": [{"@type": "WebSite", "@id": "/#site"}]}
               </script>"#,
        );
        let blocks = extract_jsonld(&d, &base());
        assert_eq!(blocks[0]["@graph"][0]["@id"], "https://example.com/#site");
    }
}
