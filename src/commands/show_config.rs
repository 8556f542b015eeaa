use crate::config::Config;
use anyhow::{Context, Result};

pub fn execute_show_config(config: &Config) -> Result<()> {
    let yaml = config
        .to_yaml()
        .context("Failed to serialize configuration")?;
    print!("{yaml}");
    println!("# resolved backend url: {}", config.backend_url());
    Ok(())
}
