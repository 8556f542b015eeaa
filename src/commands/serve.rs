use crate::config::Config;
use crate::web;
use anyhow::Result;

pub async fn execute_serve(config: Config) -> Result<()> {
    println!(
        "Starting portfolio on http://{} (backend: {})",
        config.bind_addr(),
        config.backend_url()
    );
    println!("Press Ctrl+C to stop");

    web::serve(config).await
}
