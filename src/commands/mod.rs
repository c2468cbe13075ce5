//! CLI commands

pub mod clean;
pub mod deploy;
pub mod generate;
pub mod init;
pub mod list;
pub mod new;
