//! Publish the site with git

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

use crate::Site;

/// Commit everything in the site directory and push it.
///
/// Without a message one is read from stdin. An empty message aborts
/// before git is touched.
pub fn run(site: &Site, message: Option<&str>) -> Result<()> {
    let message = match message {
        Some(m) => m.trim().to_string(),
        None => prompt_message(io::stdin().lock())?,
    };
    if message.is_empty() {
        anyhow::bail!("Commit message is empty, not deploying");
    }

    git(&site.base_dir, &["add", "."])?;
    git(&site.base_dir, &["commit", "-m", &message])?;
    git(&site.base_dir, &["push"])?;

    println!("Changes have been pushed successfully!");

    Ok(())
}

/// Ask for a commit message
fn prompt_message<R: BufRead>(mut input: R) -> Result<String> {
    print!("Enter commit message: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read commit message")?;
    Ok(line.trim().to_string())
}

/// Run a git subcommand, inheriting stdout and stderr
fn git(dir: &Path, args: &[&str]) -> Result<()> {
    tracing::debug!("git {}", args.join(" "));
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run 'git {}'", args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("'git {}' exited with {}", args.join(" "), status);
    }
    Ok(())
}
