pub mod command;

pub use command::Command;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Base URL of the backend
    #[arg(long, env = "CHIRPER_BACKEND_URL", default_value = "http://localhost:8080/api")]
    backend_url: String,
    /// Project the records belong to
    #[arg(long, env = "CHIRPER_PROJECT_ID", default_value = "")]
    project_id: String,
    /// Public key sent along with every request
    #[arg(long, env = "CHIRPER_PUBLIC_KEY", default_value = "", hide_env_values = true)]
    public_key: String,
    /// Where settings and the signed-in user are kept
    #[arg(long, env = "CHIRPER_STORAGE", default_value = "./chirper.db")]
    storage: PathBuf,
    /// Limit concurrent requests
    #[arg(long, default_value = "5")]
    limit: usize,
    /// Retry transient failures this many times
    #[arg(long, default_value = "0")]
    retries: u32,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .format_timestamp(None)
            .init();
    }
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }
    pub fn project_id(&self) -> &str {
        &self.project_id
    }
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
    pub const fn storage(&self) -> &PathBuf {
        &self.storage
    }
    pub const fn limit(&self) -> usize {
        self.limit
    }
    pub const fn retries(&self) -> u32 {
        self.retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_settings_command() {
        let config = <Config as Parser>::try_parse_from([
            "chirper",
            "--backend-url",
            "https://backend.example.com/api/",
            "--retries",
            "2",
            "settings",
            "--language",
            "Spanish",
            "--font-size",
            "large",
        ])
        .unwrap();

        assert_eq!(config.backend_url(), "https://backend.example.com/api/");
        assert_eq!(config.retries(), 2);
        assert_eq!(config.limit(), 5);
        let Command::Settings { language, font_size, .. } = config.command else {
            panic!("expected settings command");
        };
        assert_eq!(language.as_deref(), Some("Spanish"));
        assert_eq!(font_size, Some(crate::store::FontSize::Large));
    }
}
