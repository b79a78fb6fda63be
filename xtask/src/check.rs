//! Workspace-wide quality checks.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use xshell::{Shell, cmd};

/// Library crates whose `src/` must stay free of `unwrap`/`expect`.
const LIBRARY_CRATES: &[&str] = &["assembly/assembly-types", "assembly/assembly-plan"];

type Step = (&'static str, fn(&Shell) -> Result<()>);

const STEPS: &[Step] = &[
    ("Formatting", run_fmt_check),
    ("Clippy", run_clippy),
    ("Tests", run_tests),
    ("Documentation", run_doc_check),
    ("Safety", run_safety_scan),
];

/// Run every check, reporting each result.
///
/// Failures only change the exit code in CI mode.
pub fn run(ci_mode: bool) -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Assembly Planner Quality Check".bold());
    println!("{}", "==============================".bold());
    println!();

    let mut all_passed = true;
    for (name, step) in STEPS {
        println!("{}", format!("Running {}...", name.to_lowercase()).dimmed());
        match step(&sh) {
            Ok(()) => println!("  {} {name}", "✓".green()),
            Err(e) => {
                println!("  {} {name} - {e}", "✗".red());
                all_passed = false;
            }
        }
    }

    println!();
    if all_passed {
        println!("{}", "✓ All checks passed!".green().bold());
        Ok(())
    } else if ci_mode {
        println!("{}", "✗ Some checks failed.".red().bold());
        std::process::exit(1);
    } else {
        println!("{}", "⚠ Some checks failed. Fix before committing.".yellow());
        Ok(())
    }
}

/// Run every check and list all failures at the end.
pub fn run_ci() -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Assembly Planner CI Suite".bold());
    println!("{}", "=========================".bold());
    println!();

    let mut failures = Vec::new();
    for (i, (name, step)) in STEPS.iter().enumerate() {
        println!("{}", format!("Step {}/{}: {name}", i + 1, STEPS.len()).cyan());
        if let Err(e) = step(&sh) {
            failures.push(format!("{name}: {e}"));
            println!("  {} {name} failed", "✗".red());
        } else {
            println!("  {} {name} OK", "✓".green());
        }
    }

    println!();
    if failures.is_empty() {
        println!("{}", "  ✓ CI PASSED".green().bold());
        Ok(())
    } else {
        println!("{}", "  ✗ CI FAILED".red().bold());
        println!();
        for f in &failures {
            println!("  - {}", f.red());
        }
        std::process::exit(1);
    }
}

fn run_fmt_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("Formatting check failed")
}

fn run_clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets --all-features -- -D warnings")
        .run()
        .context("Clippy check failed")
}

fn run_tests(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace --all-features")
        .run()
        .context("Tests failed")
}

fn run_doc_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --workspace --no-deps --all-features")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()
        .context("Documentation build failed")
}

/// Count `.unwrap()`/`.expect(` calls in library code.
///
/// Everything from a file's first `#[cfg(test)]` onward is test code, as are
/// doc comments.
fn run_safety_scan(sh: &Shell) -> Result<()> {
    let root = sh.current_dir();
    let mut violations = Vec::new();

    for krate in LIBRARY_CRATES {
        for file in rust_files(&root.join(krate).join("src"))? {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Reading {}", file.display()))?;
            for (line_no, line) in text.lines().enumerate() {
                let trimmed = line.trim_start();
                if trimmed.starts_with("#[cfg(test)]") {
                    break;
                }
                if trimmed.starts_with("//") {
                    continue;
                }
                if line.contains(".unwrap()") || line.contains(".expect(") {
                    violations.push(format!("{}:{}", file.display(), line_no + 1));
                }
            }
        }
    }

    if violations.is_empty() {
        return Ok(());
    }
    for v in &violations {
        println!("    {}", v.dimmed());
    }
    anyhow::bail!(
        "Found {} unwrap/expect calls in library code",
        violations.len()
    )
}

fn rust_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(rust_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
