//! Generator module - builds every page of the site
//!
//! The build is a fixed, ordered list of [`Step`]s. Each step reads its own
//! inputs and writes exactly one output (one file, or the posts and assets
//! trees). Steps share nothing except the existence of the public directory,
//! so any one of them can be run on its own with [`Generator::run_step`].

mod assets;
mod blog;
mod pages;

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::content::MarkdownRenderer;
use crate::error::BuildError;
use crate::Site;

pub use assets::{copy_dir, copy_file};
pub use blog::BatchReport;

/// One unit of the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Home,
    Portfolio,
    BlogLanding,
    BlogIndex,
    Posts,
    MusicTools,
    DevTools,
    Style,
    Assets,
}

impl Step {
    /// Every step, in build order
    pub const ALL: [Step; 9] = [
        Step::Home,
        Step::Portfolio,
        Step::BlogLanding,
        Step::BlogIndex,
        Step::Posts,
        Step::MusicTools,
        Step::DevTools,
        Step::Style,
        Step::Assets,
    ];

    /// What the step writes, relative to the public directory
    pub fn output(&self) -> &'static str {
        match self {
            Step::Home => "index.html",
            Step::Portfolio => "portfolio.html",
            Step::BlogLanding => "blog.html",
            Step::BlogIndex => "blog-index.html",
            Step::Posts => "posts/",
            Step::MusicTools => "music-tools.html",
            Step::DevTools => "dev-tools.html",
            Step::Style => "styles.css",
            Step::Assets => "assets/",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.output())
    }
}

/// Static site generator
pub struct Generator {
    site: Site,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Self {
        Self {
            site: site.clone(),
            markdown: MarkdownRenderer::from_config(&site.config.highlight),
        }
    }

    /// Generate the entire site
    ///
    /// Stops at the first failing step; whatever was written before it
    /// stays in place. A post that fails on its own does not fail the build.
    pub fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)
            .map_err(|e| BuildError::create_dir(&self.site.public_dir, e))
            .context("Failed to create public directory")?;

        for step in Step::ALL {
            self.run_step(step)?;
        }

        Ok(())
    }

    /// Run a single step. The public directory must already exist.
    pub fn run_step(&self, step: Step) -> Result<()> {
        let result = match step {
            Step::Home => self.build_home(),
            Step::Portfolio => self.build_portfolio(),
            Step::BlogLanding => self.build_blog(),
            Step::BlogIndex => self.build_blog_index(),
            Step::Posts => self.build_posts().map(|report| {
                tracing::info!(
                    "Built {} posts ({} skipped)",
                    report.built.len(),
                    report.skipped.len()
                );
            }),
            Step::MusicTools => self.build_music_tools(),
            Step::DevTools => self.build_dev_tools(),
            Step::Style => self.copy_style(),
            Step::Assets => self.copy_assets(),
        };

        result.with_context(|| format!("Failed to build {}", step))
    }
}

/// Write a rendered page, replacing any previous version
fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    fs::write(path, html).map_err(|e| BuildError::write(path, e))?;
    tracing::info!("Generated: {:?}", path);
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::commands::init::init_site;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    /// A freshly initialised site with the default theme and no posts
    pub(crate) fn test_site() -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        for entry in fs::read_dir(dir.path().join("content/posts")).unwrap() {
            fs::remove_file(entry.unwrap().path()).unwrap();
        }
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    pub(crate) fn write_post(site: &Site, name: &str, content: &str) -> PathBuf {
        let path = site.posts_dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(dir)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(dir).unwrap().to_path_buf(),
                    fs::read(e.path()).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_generate_full_site() {
        let (_dir, site) = test_site();
        write_post(
            &site,
            "hello.md",
            "Title: Hello\nDate: 2024-01-01\nBody text.\n#greeting\n#demo",
        );
        fs::create_dir_all(site.assets_dir.join("img")).unwrap();
        fs::write(site.assets_dir.join("img/logo.svg"), "<svg/>").unwrap();

        Generator::new(&site).generate().unwrap();

        for name in [
            "index.html",
            "blog.html",
            "blog-index.html",
            "portfolio.html",
            "music-tools.html",
            "dev-tools.html",
            "styles.css",
            "posts/hello.html",
            "assets/img/logo.svg",
        ] {
            assert!(site.public_dir.join(name).is_file(), "missing {}", name);
        }

        let post = fs::read_to_string(site.public_dir.join("posts/hello.html")).unwrap();
        assert!(post.contains("<p>Body text.</p>"));
        assert!(post.contains("<h1>Hello</h1>"));
        assert!(post.contains("2024-01-01"));
        assert!(post.contains(r##"<li class="hashtag">#greeting</li>"##));
        assert!(post.contains(r##"<li class="hashtag">#demo</li>"##));
        assert!(!post.contains("<p>#greeting"));
    }

    #[test]
    fn test_every_markdown_file_gets_a_page() {
        let (_dir, site) = test_site();
        write_post(&site, "one.md", "Title: One\nDate: 2024-01-01\nFirst");
        write_post(&site, "two.md", "Second, with no header");
        write_post(&site, "readme.txt", "not a post");
        write_post(&site, "image.png", "not a post either");

        Generator::new(&site).generate().unwrap();

        let mut built: Vec<_> = fs::read_dir(site.public_dir.join("posts"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        built.sort();
        assert_eq!(built, vec!["one.html", "two.html"]);

        let two = fs::read_to_string(site.public_dir.join("posts/two.html")).unwrap();
        assert!(two.contains("<h1>two</h1>"));
        assert!(two.contains("Second, with no header"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let (_dir, site) = test_site();
        write_post(&site, "a.md", "Title: A\nDate: 2024-01-01\nAlpha\n#x");
        write_post(&site, "b.md", "Title: B\nDate: March 3, 2024\n## Beta\n\n```rust\nfn b() {}\n```\n");

        let generator = Generator::new(&site);
        generator.generate().unwrap();
        let first = snapshot(&site.public_dir);
        generator.generate().unwrap();
        let second = snapshot(&site.public_dir);

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_template_halts_build() {
        let (_dir, site) = test_site();
        fs::remove_file(site.templates_dir.join("portfolio.html")).unwrap();

        let err = Generator::new(&site).generate().unwrap_err();
        assert!(format!("{:#}", err).contains("portfolio.html"));

        // Steps before the failure ran, steps after it did not
        assert!(site.public_dir.join("index.html").exists());
        assert!(!site.public_dir.join("blog.html").exists());
    }

    #[test]
    fn test_missing_assets_dir_halts_build() {
        let (_dir, site) = test_site();
        fs::remove_dir_all(&site.assets_dir).unwrap();

        assert!(Generator::new(&site).generate().is_err());
        // Everything up to the asset copy was still written
        assert!(site.public_dir.join("styles.css").exists());
    }

    #[test]
    fn test_run_single_step() {
        let (_dir, site) = test_site();
        fs::create_dir_all(&site.public_dir).unwrap();

        Generator::new(&site).run_step(Step::DevTools).unwrap();

        assert!(site.public_dir.join("dev-tools.html").exists());
        assert!(!site.public_dir.join("index.html").exists());
    }

    #[test]
    fn test_step_order() {
        assert_eq!(Step::ALL.first(), Some(&Step::Home));
        assert_eq!(Step::ALL.last(), Some(&Step::Assets));
        assert_eq!(Step::BlogIndex.to_string(), "blog-index.html");
    }
}
