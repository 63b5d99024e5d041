//! `readsight analyze <url>` — evaluate a single page.

use crate::cli::output::{self, Styled};
use crate::fetch;
use crate::score::{self, ScoreReport};
use anyhow::{Context, Result};

/// Fetch, score, and render the report for one URL.
pub async fn run(url: &str) -> Result<()> {
    if !output::is_quiet() && !output::is_json() {
        let s = Styled::new();
        eprintln!("  {} {url}", s.dim("Fetching"));
    }

    let html = fetch::fetch(url).await.context("fetching page")?;
    if output::is_verbose() && !output::is_json() {
        let s = Styled::new();
        eprintln!(
            "  {} {} bytes of rendered HTML",
            s.dim("Received"),
            html.len()
        );
    }
    let report = score::score(&html, url).context("scoring page")?;

    render(&report);
    Ok(())
}

/// Render a score report in the active output mode.
pub fn render(report: &ScoreReport) {
    if output::is_json() {
        if let Ok(value) = serde_json::to_value(report) {
            output::print_json(&value);
        }
        return;
    }

    let s = Styled::new();
    println!();
    output::print_score("Semantic score:", &format!("{:.2}", report.semantic_score));
    output::print_score(
        "Readability score:",
        &format!("{:.2}", report.readability_score),
    );
    output::print_score(
        "Has JSON-LD:",
        &if report.has_jsonld {
            s.green("yes")
        } else {
            s.yellow("no")
        },
    );
    output::print_score("Metadata score:", &format!("{:.2}", report.meta_score));
    output::print_score(
        "Image alt text score:",
        &format!("{:.2}", report.img_alt_score),
    );
    println!();
    println!(
        "  {} {} / 100",
        s.bold("Final AI Readability Score:"),
        s.bold(&grade_color(&s, report.final_score))
    );
    println!();
}

/// Color the final score by rough quality band.
fn grade_color(s: &Styled, score: f64) -> String {
    let text = format!("{score:.2}");
    if score >= 70.0 {
        s.green(&text)
    } else if score >= 40.0 {
        s.yellow(&text)
    } else {
        s.red(&text)
    }
}
