//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::PortfolioConfig;
pub use site::SiteConfig;
pub use site::ToolLink;
