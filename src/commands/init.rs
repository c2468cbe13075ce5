//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::templates::DEFAULT_THEME;
use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Site
author: John Doe

# Directory
content_dir: content
posts_dir: posts
assets_dir: assets
templates_dir: templates
public_dir: public

# Code blocks
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Portfolio page: YouTube playlist ids, in display order
# portfolio:
#   playlists:
#     - PLxxxxxxxxxxxxxxxx

# Tool pages
# music_tools:
#   - name: BeatMaker
#     link: /assets/tools/beatmaker.zip
# dev_tools:
#   - name: My Tool
#     link: https://github.com/me/my-tool
"#;

const SAMPLE_POST: &str = "Title: Hello World
Date: 2024-01-01

Welcome to your new site. This is your very first post.
Edit or delete it, then run `folio generate` to rebuild.

## Quick Start

```bash
folio new \"My New Post\"
folio server
```

#hello
#welcome
";

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let posts_dir = target_dir.join("content/posts");
    let assets_dir = target_dir.join("content/assets");
    let templates_dir = target_dir.join("templates");

    for dir in [&posts_dir, &assets_dir, &templates_dir] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    write_new(&target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;

    for (name, content) in DEFAULT_THEME {
        let path = templates_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_new(&path, content)?;
    }

    write_new(&posts_dir.join("hello-world.md"), SAMPLE_POST)?;

    Ok(())
}

/// Write a scaffold file unless the user already has one
fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::debug!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
