//! Interactive prompt — the default mode when no subcommand is given.
//!
//! Each line is a URL to evaluate. Slash commands: `/help`, `/doctor`,
//! `/exit`. An evaluation failure is printed and the prompt stays usable
//! for the next URL.

use crate::cli::output::{self, Styled};
use crate::cli::{analyze_cmd, doctor};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

/// History file location.
fn history_path() -> std::path::PathBuf {
    doctor::readsight_home().join("repl_history")
}

/// Print the welcome banner.
fn print_banner() {
    let s = Styled::new();

    eprintln!();
    eprintln!(
        "  {} {} {}",
        s.green("\u{25c9}"),
        s.bold(&format!("ReadSight v{}", env!("CARGO_PKG_VERSION"))),
        s.dim("— AI readability scoring for web pages")
    );
    eprintln!();
    eprintln!(
        "    Enter a URL to evaluate it, {} for commands, {} to quit.",
        s.cyan("/help"),
        s.dim("/exit")
    );
    eprintln!();
}

fn print_help() {
    let s = Styled::new();
    eprintln!("  {}", s.bold("Commands"));
    eprintln!("    <url>      evaluate a page (e.g. https://example.com)");
    eprintln!("    /doctor    check that headless Chromium is available");
    eprintln!("    /help      show this help");
    eprintln!("    /exit      quit");
    eprintln!();
}

/// Run the interactive prompt loop.
pub async fn run() -> Result<()> {
    print_banner();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl = DefaultEditor::with_config(config)?;

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let prompt = prompt_string(output::color_enabled());

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match dispatch(line).await {
                    Ok(true) => {
                        let s = Styled::new();
                        eprintln!("  {} Goodbye!", s.dim("\u{2728}"));
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        let s = Styled::new();
                        eprintln!("  {} {e:#}", s.fail_sym());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C — don't exit, just show hint
                let s = Styled::new();
                eprintln!("  {} Type {} to quit.", s.dim("(Ctrl+C)"), s.bold("/exit"));
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D — exit
                let s = Styled::new();
                eprintln!("  {} Goodbye!", s.dim("\u{2728}"));
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}

/// Prompt text, cyan when color is on.
fn prompt_string(use_color: bool) -> String {
    if use_color {
        " \x1b[36mreadsight>\x1b[0m ".to_string()
    } else {
        " readsight> ".to_string()
    }
}

/// Handle one input line. Returns `Ok(true)` when the loop should exit.
async fn dispatch(line: &str) -> Result<bool> {
    match line {
        "/exit" | "/quit" => return Ok(true),
        "/help" => print_help(),
        "/doctor" => doctor::run().await?,
        cmd if cmd.starts_with('/') => {
            anyhow::bail!("unknown command `{cmd}` — try /help");
        }
        url => {
            // Bare hostnames are common at an interactive prompt.
            let url = if url.contains("://") {
                url.to_string()
            } else {
                format!("https://{url}")
            };
            analyze_cmd::run(&url).await?;
        }
    }
    Ok(false)
}
