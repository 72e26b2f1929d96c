use anyhow::{Context, Result};
use textbook_infrastructure::ConfigService;

use crate::context::AppContext;

/// Prints the effective configuration, environment overrides included.
pub fn show(ctx: &AppContext) -> Result<()> {
    println!("# {}", ctx.paths.config_file().display());
    print!(
        "{}",
        toml::to_string_pretty(&ctx.config).context("Failed to render config")?
    );
    println!(
        "# resolved endpoint: {} ({})",
        ctx.endpoint.base_url(),
        ctx.endpoint.environment()
    );
    Ok(())
}

/// Writes the default `config.toml` unless one already exists.
pub fn init(ctx: &AppContext) -> Result<()> {
    let path = ctx.paths.config_file();
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    ConfigService::new(&path).save(&Default::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Probes `GET /health`.
pub async fn health(ctx: &AppContext) -> Result<()> {
    ctx.backend
        .health()
        .await
        .with_context(|| format!("Backend at {} is not reachable", ctx.endpoint.base_url()))?;
    println!("Backend at {} is healthy", ctx.endpoint.base_url());
    Ok(())
}
