use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;

const DOMAIN_PACKAGE: &str = "chronicler-domain";

/// Crates the domain must never depend on (outside dev-dependencies).
const FORBIDDEN_DOMAIN_DEPS: &[&str] = &[
    "chronicler-engine",
    "rand",
    "rand_chacha",
    "tracing",
    "tracing-subscriber",
    "clap",
    "dotenvy",
    "anyhow",
];

// I/O, logging and ambient randomness in domain source
static FORBIDDEN_SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(rand::|rand_chacha::|tracing::|std::fs::|std::env::|println!|eprintln!)")
        .expect("valid regex")
});

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let domain = metadata
        .packages
        .iter()
        .find(|p| p.name == DOMAIN_PACKAGE)
        .with_context(|| format!("package {DOMAIN_PACKAGE} not found"))?;

    let mut violations = dependency_violations(domain);

    let src_dir = domain
        .manifest_path
        .parent()
        .map(|dir| dir.join("src"))
        .context("domain manifest has no parent directory")?;
    violations.extend(source_violations(&src_dir)?);

    if !violations.is_empty() {
        anyhow::bail!(
            "arch-check failed:\n{}",
            violations
                .iter()
                .map(|v| format!("  - {v}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("arch-check passed: {DOMAIN_PACKAGE} is free of infrastructure dependencies");
    Ok(())
}

fn dependency_violations(package: &Package) -> Vec<String> {
    package
        .dependencies
        .iter()
        .filter(|dep| dep.kind.as_deref() != Some("dev"))
        .filter(|dep| FORBIDDEN_DOMAIN_DEPS.contains(&dep.name.as_str()))
        .map(|dep| format!("{} depends on {}", package.name, dep.name))
        .collect()
}

fn source_violations(src_dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut violations = Vec::new();
    for path in rust_files(src_dir)? {
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        for (line_no, line) in code_lines(&source) {
            if let Some(found) = FORBIDDEN_SOURCE_RE.find(line) {
                violations.push(format!(
                    "{}:{} uses {}",
                    path.display(),
                    line_no,
                    found.as_str()
                ));
            }
        }
    }
    Ok(violations)
}

/// Numbered non-comment lines, stopping at the first `#[cfg(test)]`.
fn code_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(i, line)| (i + 1, line))
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
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
