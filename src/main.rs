use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use riverboard::app::ambient::AmbientScene;
use riverboard::utils::{logger, validation::Validate};
use riverboard::{
    CliConfig, CycleDriver, FileCatalogProvider, HttpCatalogProvider, NoOpObserver,
    PhaseSequencer, ProductCardRenderer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting riverboard");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.resolve().context("failed to load display configuration")?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // Ambient motion lives for the whole process; it never touches the cycle.
    let ambient_config = config.ambient.clone().unwrap_or_default();
    let _ambient = ambient_config
        .enabled
        .then(|| AmbientScene::launch(&ambient_config, &config.layout));

    let renderer = ProductCardRenderer;
    let sequencer = PhaseSequencer::new(config.cycle.clone(), config.layout.clone());
    let limit = (cli.max_cycles > 0).then_some(cli.max_cycles);
    let mut observer = NoOpObserver;

    match config.catalog.source.as_str() {
        "http" => {
            let provider = HttpCatalogProvider::new(
                config.catalog.endpoint.clone(),
                Duration::from_secs(config.catalog.timeout_seconds),
            )?;
            let mut driver = CycleDriver::new(provider, renderer, sequencer, &config.cycle);
            driver.run_cycles(limit, &mut observer).await?;
        }
        _ => {
            let provider = FileCatalogProvider::new(&config.catalog.path);
            let mut driver = CycleDriver::new(provider, renderer, sequencer, &config.cycle);
            driver.run_cycles(limit, &mut observer).await?;
        }
    }

    tracing::info!("✅ Display loop finished");
    Ok(())
}
