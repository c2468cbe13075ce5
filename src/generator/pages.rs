//! Fixed pages: home, portfolio and the tool pages

use std::fs;

use super::{write_page, Generator};
use crate::config::ToolLink;
use crate::error::BuildError;
use crate::templates::{HomePage, PortfolioPage, Playlist, TemplateRenderer, ToolsPage};

/// Partials embedded verbatim into the home page
const HOME_PARTIALS: [&str; 4] = [
    "partials/portfolio.html",
    "partials/blog.html",
    "partials/music-tools.html",
    "partials/dev-tools.html",
];

impl Generator {
    /// index.html: master template with the four home page partials
    pub(super) fn build_home(&self) -> Result<(), BuildError> {
        let [portfolio, blog, music_tools, dev_tools] = HOME_PARTIALS.map(|name| {
            let path = self.site.templates_dir.join(name);
            fs::read_to_string(&path).map_err(|e| BuildError::read(path, e))
        });

        let data = HomePage {
            portfolio: portfolio?,
            blog: blog?,
            music_tools: music_tools?,
            dev_tools: dev_tools?,
        };

        let renderer = TemplateRenderer::load(&self.site, &["master.html", "contact.html"])?;
        let html = renderer.render("master.html", &data)?;
        write_page(&self.site.public_dir.join("index.html"), &html)
    }

    /// portfolio.html: embedded playlists from the configuration
    pub(super) fn build_portfolio(&self) -> Result<(), BuildError> {
        let data = PortfolioPage {
            playlists: self
                .site
                .config
                .portfolio
                .playlists
                .iter()
                .map(|id| Playlist::youtube(id))
                .collect(),
        };

        let renderer = TemplateRenderer::load(
            &self.site,
            &["portfolio.html", "nav.html", "contact.html"],
        )?;
        let html = renderer.render("portfolio.html", &data)?;
        write_page(&self.site.public_dir.join("portfolio.html"), &html)
    }

    /// music-tools.html
    pub(super) fn build_music_tools(&self) -> Result<(), BuildError> {
        self.build_tools_page("music-tools.html", &self.site.config.music_tools)
    }

    /// dev-tools.html
    pub(super) fn build_dev_tools(&self) -> Result<(), BuildError> {
        self.build_tools_page("dev-tools.html", &self.site.config.dev_tools)
    }

    /// A tool page; the template and the output share a name
    fn build_tools_page(&self, name: &str, tools: &[ToolLink]) -> Result<(), BuildError> {
        let data = ToolsPage {
            tools: tools.to_vec(),
        };

        let renderer = TemplateRenderer::load(&self.site, &[name, "nav.html", "contact.html"])?;
        let html = renderer.render(name, &data)?;
        write_page(&self.site.public_dir.join(name), &html)
    }
}
