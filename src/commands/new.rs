//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create `content/posts/<slug>.md` with a title and today's date.
///
/// The slug defaults to the slugified title. An existing post is never
/// overwritten.
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&site.posts_dir)
        .with_context(|| format!("Failed to create {:?}", site.posts_dir))?;

    let file_path = site.posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let content = format!("Title: {}\nDate: {}\n\n", title, today);
    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {:?}", file_path))?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}
