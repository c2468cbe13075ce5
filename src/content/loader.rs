//! Content loader - finds and reads posts from the posts directory

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use super::{Post, PostSource};
use crate::error::BuildError;
use crate::Site;

/// Loads posts from the site's posts directory
pub struct PostLoader<'a> {
    site: &'a Site,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// List every `.md` file in the posts directory, newest first.
    ///
    /// Ordering is by modification time descending with the slug as a
    /// tie-break, so every listing on the site agrees. Subdirectories and
    /// other files are ignored. Failing to read the directory itself is an
    /// error; nothing can be built without it.
    pub fn scan(&self) -> Result<Vec<PostSource>, BuildError> {
        let posts_dir = &self.site.posts_dir;
        let entries = fs::read_dir(posts_dir).map_err(|e| BuildError::read(posts_dir, e))?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BuildError::read(posts_dir, e))?;
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(&path) {
                continue;
            }

            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping post with non UTF-8 name: {:?}", path);
                continue;
            };

            let modified = match entry.metadata().and_then(|m| m.modified()) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("Cannot read modification time of {:?}: {}", path, e);
                    SystemTime::UNIX_EPOCH
                }
            };

            sources.push(PostSource {
                slug: slug.to_string(),
                path: path.clone(),
                modified,
            });
        }

        sources.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        tracing::debug!("Found {} posts in {:?}", sources.len(), posts_dir);
        Ok(sources)
    }

    /// Read and parse a single post
    pub fn load(&self, source: &PostSource) -> Result<Post, BuildError> {
        let raw =
            fs::read_to_string(&source.path).map_err(|e| BuildError::read(&source.path, e))?;
        Ok(Post::parse(&source.slug, &raw))
    }

    /// Scan and load every readable post, newest first.
    /// Unreadable posts are logged and left out.
    pub fn load_all(&self) -> Result<Vec<Post>, BuildError> {
        let posts = self
            .scan()?
            .iter()
            .filter_map(|source| match self.load(source) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {}: {}", source.slug, e);
                    None
                }
            })
            .collect();
        Ok(posts)
    }
}

/// Check if a file is a markdown post
fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
