//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // Directory
    pub content_dir: String,
    /// Relative to `content_dir`
    pub posts_dir: String,
    /// Relative to `content_dir`
    pub assets_dir: String,
    pub templates_dir: String,
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Pages
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    pub music_tools: Vec<ToolLink>,
    pub dev_tools: Vec<ToolLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            author: "John Doe".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            assets_dir: "assets".to_string(),
            templates_dir: "templates".to_string(),
            public_dir: "public".to_string(),

            highlight: HighlightConfig::default(),

            portfolio: PortfolioConfig::default(),
            music_tools: vec![
                ToolLink::new("BeatMaker", "/assets/tools/beatmaker.zip"),
                ToolLink::new("Chord Generator", "/assets/tools/chordgen.zip"),
                ToolLink::new("Synth Pack", "/assets/tools/synthpack.zip"),
            ],
            dev_tools: vec![
                ToolLink::new(
                    "Gorani Coding Agent",
                    "https://github.com/johnjallday/gorani-coder",
                ),
                ToolLink::new(
                    "Flow Workspace Manager",
                    "https://github.com/johnjallday/flow-workspace",
                ),
            ],
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Name of a syntect default theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Portfolio page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// YouTube playlist ids, embedded in order
    pub playlists: Vec<String>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            playlists: vec![
                "PLXmbGsvEq-1DqQtHyOqedD8dfUGbWLrR5".to_string(),
                "PLXmbGsvEq-1D37iuSB7Cahw-HuMB2_Wa6".to_string(),
            ],
        }
    }
}

/// A named download or project link on one of the tool pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLink {
    pub name: String,
    pub link: String,
}

impl ToolLink {
    pub fn new(name: &str, link: &str) -> Self {
        Self {
            name: name.to_string(),
            link: link.to_string(),
        }
    }
}
