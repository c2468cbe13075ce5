//! Page templates using the Tera template engine
//!
//! Templates live in the site's templates directory. Each page loads only
//! the files it needs, so a broken template only takes down the pages that
//! use it. A default theme is embedded in the binary and written out by
//! `init`.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

use crate::config::ToolLink;
use crate::content::Post;
use crate::error::BuildError;
use crate::Site;

/// Default theme, written by `folio init`
pub const DEFAULT_THEME: &[(&str, &str)] = &[
    ("master.html", include_str!("default/master.html")),
    ("contact.html", include_str!("default/contact.html")),
    ("nav.html", include_str!("default/nav.html")),
    ("portfolio.html", include_str!("default/portfolio.html")),
    ("blog.html", include_str!("default/blog.html")),
    ("blog_index.html", include_str!("default/blog_index.html")),
    ("posts.html", include_str!("default/posts.html")),
    ("music-tools.html", include_str!("default/music-tools.html")),
    ("dev-tools.html", include_str!("default/dev-tools.html")),
    ("styles.css", include_str!("default/styles.css")),
    (
        "partials/portfolio.html",
        include_str!("default/partials/portfolio.html"),
    ),
    ("partials/blog.html", include_str!("default/partials/blog.html")),
    (
        "partials/music-tools.html",
        include_str!("default/partials/music-tools.html"),
    ),
    (
        "partials/dev-tools.html",
        include_str!("default/partials/dev-tools.html"),
    ),
];

/// Template renderer for one page
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Load the named templates from the site's templates directory
    pub fn load(site: &Site, names: &[&str]) -> Result<Self, BuildError> {
        Self::load_from(&site.templates_dir, names, SiteData::from(site))
    }

    /// Load the named templates from an arbitrary directory
    pub fn load_from(dir: &Path, names: &[&str], site: SiteData) -> Result<Self, BuildError> {
        let mut tera = Tera::default();

        // Page content is already HTML; templates escape text fields explicitly
        tera.autoescape_on(vec![]);

        let files: Vec<(PathBuf, Option<&str>)> = names
            .iter()
            .map(|name| (dir.join(name), Some(*name)))
            .collect();
        tera.add_template_files(files)
            .map_err(|source| BuildError::Template {
                name: names.join(", "),
                source,
            })?;

        Ok(Self { tera, site })
    }

    /// Render a template with the given page data. `site` is always in scope.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, BuildError> {
        let render_error = |source| BuildError::Render {
            name: name.to_string(),
            source,
        };

        let mut context = Context::from_serialize(data).map_err(render_error)?;
        context.insert("site", &self.site);
        self.tera.render(name, &context).map_err(render_error)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub author: String,
}

impl From<&Site> for SiteData {
    fn from(site: &Site) -> Self {
        Self {
            title: site.config.title.clone(),
            author: site.config.author.clone(),
        }
    }
}

/// A single post page, also embedded as the blog landing preview
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub slug: String,
    pub title: String,
    pub date: String,
    /// ISO date for `<time datetime>`, when the date could be parsed
    pub datetime: Option<String>,
    /// Rendered HTML body
    pub content: String,
    pub hashtags: Vec<String>,
}

impl PostPage {
    pub fn new(post: &Post, content: String) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
            datetime: post
                .published_on()
                .map(|d| d.format("%Y-%m-%d").to_string()),
            content,
            hashtags: post.hashtags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListing {
    pub slug: String,
    pub title: String,
    pub date: String,
}

impl From<&Post> for PostListing {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogPage {
    pub posts: Vec<PostListing>,
    /// The newest post, rendered in full
    pub post: Option<PostPage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogIndexPage {
    pub posts: Vec<PostListing>,
}

/// Home page partials, embedded verbatim
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub portfolio: String,
    pub blog: String,
    pub music_tools: String,
    pub dev_tools: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPage {
    pub playlists: Vec<Playlist>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    pub id: String,
    pub embed_url: String,
}

impl Playlist {
    pub fn youtube(id: &str) -> Self {
        Self {
            id: id.to_string(),
            embed_url: format!("https://www.youtube.com/embed/videoseries?list={}", id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolsPage {
    pub tools: Vec<ToolLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site_data() -> SiteData {
        SiteData {
            title: "Test Site".to_string(),
            author: "Tester".to_string(),
        }
    }

    fn write_default_theme(dir: &Path) {
        for (name, content) in DEFAULT_THEME {
            let path = dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn test_render_with_site_data() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("page.html"),
            "{{ site.title }}: {% for p in posts %}{{ p.title }};{% endfor %}",
        )
        .unwrap();

        let renderer = TemplateRenderer::load_from(dir.path(), &["page.html"], site_data()).unwrap();
        let html = renderer
            .render(
                "page.html",
                &BlogIndexPage {
                    posts: vec![PostListing {
                        slug: "a".to_string(),
                        title: "A".to_string(),
                        date: String::new(),
                    }],
                },
            )
            .unwrap();
        assert_eq!(html, "Test Site: A;");
    }

    #[test]
    fn test_missing_template_is_error() {
        let dir = TempDir::new().unwrap();
        let result = TemplateRenderer::load_from(dir.path(), &["nope.html"], site_data());
        assert!(matches!(result, Err(BuildError::Template { .. })));
    }

    #[test]
    fn test_syntax_error_is_template_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.html"), "{% for x in %}").unwrap();
        let result = TemplateRenderer::load_from(dir.path(), &["bad.html"], site_data());
        assert!(matches!(result, Err(BuildError::Template { .. })));
    }

    #[test]
    fn test_missing_include_is_render_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("page.html"), r#"{% include "nav.html" %}"#).unwrap();
        let renderer = TemplateRenderer::load_from(dir.path(), &["page.html"], site_data()).unwrap();
        let result = renderer.render("page.html", &BlogIndexPage { posts: vec![] });
        assert!(matches!(result, Err(BuildError::Render { .. })));
    }

    #[test]
    fn test_default_post_template() {
        let dir = TempDir::new().unwrap();
        write_default_theme(dir.path());

        let renderer =
            TemplateRenderer::load_from(dir.path(), &["posts.html", "nav.html"], site_data())
                .unwrap();
        let post = Post::parse("hello", "Title: Hello <3\nDate: 2024-01-01\nBody\n#greeting");
        let html = renderer
            .render("posts.html", &PostPage::new(&post, "<p>Body</p>".to_string()))
            .unwrap();

        assert!(html.contains("<h1>Hello &lt;3</h1>"));
        assert!(html.contains(r#"<time datetime="2024-01-01">2024-01-01</time>"#));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("#greeting"));
        assert!(html.contains(r#"href="/blog.html""#));
    }

    #[test]
    fn test_playlist_embed_url() {
        let playlist = Playlist::youtube("PL123");
        assert_eq!(
            playlist.embed_url,
            "https://www.youtube.com/embed/videoseries?list=PL123"
        );
    }
}
