use anyhow::Context;

use crate::config::Config;
use crate::db::Catalog;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!(
            "Created default config at {}",
            Config::default_config_path().display()
        );
    } else {
        println!(
            "Config already exists at {}",
            Config::default_config_path().display()
        );
    }
    Ok(())
}

pub async fn cmd_bootstrap_catalog(config: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::bootstrap(&config.catalog.database_url)
        .await
        .context("Failed to create catalog schema")?;
    catalog.ping().await?;

    println!("Catalog schema ready.");
    Ok(())
}
