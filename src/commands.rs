pub mod check;
pub mod serve;
pub mod show_config;

use crate::config::{Config, Mode, Overrides};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Configuration flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a YAML config file (defaults to ./portfolio.yml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Backend API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Backend API base URL used in development mode
    #[arg(long)]
    pub dev_api_url: Option<String>,

    /// Which backend URL to use: development or production
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Address to bind the web server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config> {
        let overrides = Overrides {
            mode: self.mode,
            api_url: self.api_url.clone(),
            dev_api_url: self.dev_api_url.clone(),
            host: self.host.clone(),
            port: self.port,
        };
        Config::load(self.config.as_deref(), &overrides).context("Failed to load configuration")
    }
}
