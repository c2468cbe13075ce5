//! Blog pages: one page per post, the landing page and the index

use std::fs;

use super::{write_page, Generator};
use crate::content::{Post, PostLoader, PostSource};
use crate::error::BuildError;
use crate::templates::{BlogIndexPage, BlogPage, PostListing, PostPage, TemplateRenderer};

/// Outcome of building the post pages
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Slugs written, newest first
    pub built: Vec<String>,
    /// Slugs that failed and were skipped
    pub skipped: Vec<String>,
}

impl Generator {
    /// Render a post's body and wrap it in page data
    fn post_page(&self, post: &Post) -> PostPage {
        PostPage::new(post, self.markdown.render(&post.body))
    }

    /// posts/<slug>.html for every post
    ///
    /// Only a missing posts directory, an uncreatable output directory or a
    /// broken template fail the step. Individual posts are skipped.
    pub fn build_posts(&self) -> Result<BatchReport, BuildError> {
        let renderer = TemplateRenderer::load(&self.site, &["posts.html", "nav.html"])?;

        let out_dir = self.site.public_dir.join("posts");
        fs::create_dir_all(&out_dir).map_err(|e| BuildError::create_dir(&out_dir, e))?;

        let loader = PostLoader::new(&self.site);
        let mut report = BatchReport::default();

        for source in loader.scan()? {
            match self.build_post(&loader, &renderer, &source) {
                Ok(()) => {
                    tracing::debug!("Built post {}", source.slug);
                    report.built.push(source.slug);
                }
                Err(e) => {
                    tracing::warn!("Skipping post {}: {}", source.slug, e);
                    report.skipped.push(source.slug);
                }
            }
        }

        Ok(report)
    }

    fn build_post(
        &self,
        loader: &PostLoader,
        renderer: &TemplateRenderer,
        source: &PostSource,
    ) -> Result<(), BuildError> {
        let post = loader.load(source)?;
        let html = renderer.render("posts.html", &self.post_page(&post))?;

        let path = self
            .site
            .public_dir
            .join("posts")
            .join(format!("{}.html", source.slug));
        fs::write(&path, html).map_err(|e| BuildError::write(&path, e))
    }

    /// blog.html: the newest post in full, then every post
    pub(super) fn build_blog(&self) -> Result<(), BuildError> {
        let loader = PostLoader::new(&self.site);
        let sources = loader.scan()?;

        let mut posts = Vec::with_capacity(sources.len());
        let mut latest = None;
        for (i, source) in sources.iter().enumerate() {
            let post = match loader.load(source) {
                Ok(post) => post,
                Err(e) => {
                    tracing::warn!("Leaving {} out of the blog page: {}", source.slug, e);
                    continue;
                }
            };
            if i == 0 {
                latest = Some(self.post_page(&post));
            }
            posts.push(PostListing::from(&post));
        }

        if latest.is_none() && !sources.is_empty() {
            tracing::warn!("Newest post could not be read, blog page has no preview");
        }

        let data = BlogPage {
            posts,
            post: latest,
        };

        let renderer =
            TemplateRenderer::load(&self.site, &["blog.html", "nav.html", "contact.html"])?;
        let html = renderer.render("blog.html", &data)?;
        write_page(&self.site.public_dir.join("blog.html"), &html)
    }

    /// blog-index.html: every post, no content
    pub(super) fn build_blog_index(&self) -> Result<(), BuildError> {
        let posts = PostLoader::new(&self.site)
            .load_all()?
            .iter()
            .map(PostListing::from)
            .collect();

        let renderer = TemplateRenderer::load(&self.site, &["blog_index.html"])?;
        let html = renderer.render("blog_index.html", &BlogIndexPage { posts })?;
        write_page(&self.site.public_dir.join("blog-index.html"), &html)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{test_site, write_post};
    use super::*;
    use std::path::Path;
    use std::time::{Duration, SystemTime};

    fn set_mtime(path: &Path, secs: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_build_posts_scenario() {
        let (_dir, site) = test_site();
        write_post(
            &site,
            "hello.md",
            "Title: Hello\nDate: 2024-01-01\nBody text.\n#greeting\n#demo",
        );
        fs::create_dir_all(&site.public_dir).unwrap();

        let report = Generator::new(&site).build_posts().unwrap();
        assert_eq!(report.built, vec!["hello"]);
        assert!(report.skipped.is_empty());

        let html = fs::read_to_string(site.public_dir.join("posts/hello.html")).unwrap();
        assert!(html.contains("<title>Hello | "));
        assert!(html.contains("<p>Body text.</p>"));
        assert!(!html.contains("<p>Body text.<br />"));
        assert!(html.contains(r#"datetime="2024-01-01""#));
        assert!(html.contains("#greeting"));
    }

    #[test]
    fn test_header_only_post_renders_empty_body() {
        let (_dir, site) = test_site();
        write_post(&site, "empty.md", "Title: Empty\nDate: 2024-02-02");
        fs::create_dir_all(&site.public_dir).unwrap();

        let report = Generator::new(&site).build_posts().unwrap();
        assert_eq!(report.built, vec!["empty"]);

        let html = fs::read_to_string(site.public_dir.join("posts/empty.html")).unwrap();
        assert!(html.contains("<h1>Empty</h1>"));
        assert!(!html.contains("<p>"));
        assert!(!html.contains("Title:"));
    }

    #[test]
    fn test_bad_post_is_skipped() {
        let (_dir, site) = test_site();
        write_post(&site, "good.md", "Title: Good\nDate: 2024-01-01\nFine");
        fs::write(site.posts_dir.join("bad.md"), [0xc3, 0x28]).unwrap();
        fs::create_dir_all(&site.public_dir).unwrap();

        let report = Generator::new(&site).build_posts().unwrap();
        assert_eq!(report.built, vec!["good"]);
        assert_eq!(report.skipped, vec!["bad"]);
        assert!(!site.public_dir.join("posts/bad.html").exists());
    }

    #[test]
    fn test_build_posts_missing_dir_is_error() {
        let (_dir, site) = test_site();
        fs::remove_dir_all(&site.posts_dir).unwrap();
        fs::create_dir_all(&site.public_dir).unwrap();

        assert!(matches!(
            Generator::new(&site).build_posts(),
            Err(BuildError::Read { .. })
        ));
    }

    #[test]
    fn test_blog_landing_shows_newest_post() {
        let (_dir, site) = test_site();
        let older = write_post(&site, "older.md", "Title: Older\nDate: 2023-05-01\nOld news");
        let newer = write_post(
            &site,
            "newer.md",
            "Title: Newer\nDate: 2024-05-01\nFresh *news*\n#update",
        );
        set_mtime(&older, 1_000);
        set_mtime(&newer, 2_000);
        fs::create_dir_all(&site.public_dir).unwrap();

        Generator::new(&site).build_blog().unwrap();
        let html = fs::read_to_string(site.public_dir.join("blog.html")).unwrap();

        assert!(html.contains("<p>Fresh <em>news</em></p>"));
        assert!(!html.contains("Old news"));
        let newer_link = html.find(r#"href="/posts/newer.html">Newer</a> <span"#).unwrap();
        let older_link = html.find(r#"href="/posts/older.html">Older</a>"#).unwrap();
        assert!(newer_link < older_link);
    }

    #[test]
    fn test_blog_landing_without_posts() {
        let (_dir, site) = test_site();
        fs::create_dir_all(&site.public_dir).unwrap();

        Generator::new(&site).build_blog().unwrap();
        let html = fs::read_to_string(site.public_dir.join("blog.html")).unwrap();
        assert!(!html.contains("class=\"post latest\""));
        assert!(html.contains("All posts"));
    }

    #[test]
    fn test_blog_landing_unreadable_newest_has_no_preview() {
        let (_dir, site) = test_site();
        let ok = write_post(&site, "ok.md", "Title: Ok\nDate: 2024-01-01\nReadable");
        let broken = site.posts_dir.join("broken.md");
        fs::write(&broken, [0xff, 0xff]).unwrap();
        set_mtime(&ok, 1_000);
        set_mtime(&broken, 2_000);
        fs::create_dir_all(&site.public_dir).unwrap();

        Generator::new(&site).build_blog().unwrap();
        let html = fs::read_to_string(site.public_dir.join("blog.html")).unwrap();
        assert!(!html.contains("class=\"post latest\""));
        assert!(html.contains(r#"href="/posts/ok.html">Ok</a>"#));
        assert!(!html.contains("broken.html"));
    }

    #[test]
    fn test_post_links_are_url_encoded() {
        let (_dir, site) = test_site();
        write_post(&site, "say \"hi\" & bye.md", "Title: Q\nDate: 2024-01-01\nquoted");
        fs::create_dir_all(&site.public_dir).unwrap();

        let generator = Generator::new(&site);
        generator.build_blog_index().unwrap();
        generator.build_blog().unwrap();
        generator.build_posts().unwrap();

        let link = r#"<a href="/posts/say%20%22hi%22%20%26%20bye.html">Q</a>"#;
        let index = fs::read_to_string(site.public_dir.join("blog-index.html")).unwrap();
        assert!(index.contains(link));
        let landing = fs::read_to_string(site.public_dir.join("blog.html")).unwrap();
        assert!(landing.contains(link));
        assert!(!landing.contains(r#"href="/posts/say "hi""#));
        assert!(site.public_dir.join("posts/say \"hi\" & bye.html").is_file());
    }

    #[test]
    fn test_blog_index_uses_same_order_as_landing() {
        let (_dir, site) = test_site();
        for (name, secs) in [("b.md", 3_000), ("a.md", 1_000), ("c.md", 2_000)] {
            let path = write_post(&site, name, "Date: 2024-01-01\nx");
            set_mtime(&path, secs);
        }
        fs::create_dir_all(&site.public_dir).unwrap();

        let generator = Generator::new(&site);
        generator.build_blog_index().unwrap();
        generator.build_blog().unwrap();

        let order = |file: &str| {
            let html = fs::read_to_string(site.public_dir.join(file)).unwrap();
            let mut found: Vec<_> = ["a", "b", "c"]
                .into_iter()
                .map(|slug| (html.find(&format!("/posts/{}.html\">", slug)).unwrap(), slug))
                .collect();
            found.sort();
            found.into_iter().map(|(_, slug)| slug).collect::<Vec<_>>()
        };

        assert_eq!(order("blog-index.html"), vec!["b", "c", "a"]);
        assert_eq!(order("blog.html"), vec!["b", "c", "a"]);
    }
}
