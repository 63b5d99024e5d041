//! Environment readiness check.
//!
//! Verifies the pieces an evaluation needs: a reachable Chromium binary and
//! a working headless launch. Every failure includes a specific fix
//! instruction.

use crate::cli::output::{self, Styled};
use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;

/// Run the doctor diagnostic.
pub async fn run() -> Result<()> {
    if output::is_json() {
        return run_json();
    }

    let s = Styled::new();
    let mut ready = true;

    eprintln!(
        "  {} {}",
        s.bold("ReadSight"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    eprintln!();

    output::print_section(&s, "System");
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    output::print_check(s.ok_sym(), "OS:", &format!("{os} ({arch})"));
    eprintln!();

    output::print_section(&s, "Browser");
    match find_chromium() {
        Some(path) => {
            let version = chromium_version(&path);
            let ver_str = version.as_deref().unwrap_or("unknown version");
            output::print_check(
                s.ok_sym(),
                "Chromium:",
                &format!("{ver_str} at {}", path.display()),
            );

            match test_headless_launch(&path) {
                Ok(ms) => {
                    output::print_check(
                        s.ok_sym(),
                        "Headless test:",
                        &format!("launched and closed in {ms}ms"),
                    );
                }
                Err(e) => {
                    output::print_check(s.fail_sym(), "Headless test:", &format!("FAILED — {e}"));
                    if is_docker() {
                        output::print_detail("Running in Docker? The launch already passes --no-sandbox.");
                    }
                    ready = false;
                }
            }
        }
        None => {
            output::print_check(s.fail_sym(), "Chromium:", "NOT FOUND");
            output::print_detail("Fix: install Google Chrome or Chromium");
            output::print_detail("Or set READSIGHT_CHROMIUM_PATH=/path/to/chrome");
            ready = false;
        }
    }

    eprintln!();
    if ready {
        eprintln!("  {}: {}", s.bold("Status"), s.green("READY"));
    } else {
        eprintln!(
            "  {}: {} (fix issues above)",
            s.bold("Status"),
            s.red("NOT READY")
        );
    }

    Ok(())
}

/// JSON output mode for doctor.
fn run_json() -> Result<()> {
    let chromium_path = find_chromium();
    let chromium_version = chromium_path.as_ref().and_then(chromium_version);
    let headless_ok = chromium_path
        .as_ref()
        .map(|p| test_headless_launch(p).is_ok())
        .unwrap_or(false);

    let json = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "chromium_path": chromium_path.map(|p| p.display().to_string()),
        "chromium_version": chromium_version,
        "headless_ok": headless_ok,
    });
    output::print_json(&json);
    Ok(())
}

/// Get the ReadSight home directory (~/.readsight/, or `READSIGHT_HOME`).
pub fn readsight_home() -> PathBuf {
    readsight_home_from(std::env::var("READSIGHT_HOME").ok().as_deref())
}

fn readsight_home_from(overridden: Option<&str>) -> PathBuf {
    if let Some(p) = overridden {
        return PathBuf::from(p);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".readsight")
}

/// Find a Chromium binary: env override, then PATH, then common locations.
pub fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("READSIGHT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    for name in ["google-chrome", "chromium", "chromium-browser", "chrome"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Get the Chromium version string.
fn chromium_version(path: &PathBuf) -> Option<String> {
    let output = Command::new(path).arg("--version").output().ok()?;
    if output.status.success() {
        let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Some(raw.replace("Google Chrome ", "").replace("Chromium ", ""))
    } else {
        None
    }
}

/// Test that Chromium can launch headless and close.
fn test_headless_launch(chromium_path: &PathBuf) -> Result<u64> {
    let start = std::time::Instant::now();
    let output = Command::new(chromium_path)
        .args([
            "--headless",
            "--no-sandbox",
            "--disable-gpu",
            "--dump-dom",
            "about:blank",
        ])
        .output()
        .map_err(|e| anyhow::anyhow!("failed to launch: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow::anyhow!(
            "{}",
            stderr.lines().next().unwrap_or("unknown error")
        ));
    }

    Ok(start.elapsed().as_millis() as u64)
}

/// Check if running inside Docker.
fn is_docker() -> bool {
    PathBuf::from("/.dockerenv").exists()
        || std::fs::read_to_string("/proc/1/cgroup")
            .map(|s| s.contains("docker") || s.contains("containerd"))
            .unwrap_or(false)
}
