//! Settings panel on the desktop.
//!
//! ```text
//! settings-panel                         # 480x480 window
//! settings-panel --scale 2               # 960x960 window
//! settings-panel --screenshot menu.png   # one frame, no window
//! RUST_LOG=debug settings-panel --config panel.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use panel::{hal_init, run, App, Cli, PanelConfig};
use tracing_subscriber::EnvFilter;
use touch_emulator::{Emulator, EmulatorConfig, FsAssetResolver};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = PanelConfig::resolve(&cli).context("failed to load panel configuration")?;
    tracing::info!(
        title = %platform::config::app_title(),
        resources = %config.resource_dir.display(),
        "starting"
    );
    let assets = FsAssetResolver::new(config.resource_dir.clone());

    if let Some(path) = &cli.screenshot {
        let hal = hal_init(Emulator::headless(config.width, config.height));
        let mut app = App::new(hal, &config, assets).context("failed to build settings screen")?;
        app.tick()?;
        app.screenshot(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        return Ok(());
    }

    let emulator = if cli.headless {
        Emulator::headless(config.width, config.height)
    } else {
        let emulator_config = EmulatorConfig::NATIVE.with_scale(config.scale).hide_host_cursor(true);
        Emulator::new(config.width, config.height, emulator_config).context("failed to open emulator window")?
    };

    let mut app = App::new(hal_init(emulator), &config, assets).context("failed to build settings screen")?;
    let ticks = run(&mut app, cli.frames).await?;
    tracing::info!(ticks, frames = app.presented(), "panel stopped");
    Ok(())
}
