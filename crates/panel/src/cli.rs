//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// Touch settings panel running in a desktop window.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "settings-panel")]
#[command(about = "Touch settings panel emulator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON panel configuration; missing fields use the reference values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory that `/res/...` icon paths resolve against
    #[arg(long, value_name = "DIR")]
    pub res_dir: Option<PathBuf>,

    /// Window upscaling factor
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub scale: Option<u32>,

    /// Run without a window (no input, frames are still rendered)
    #[arg(long)]
    pub headless: bool,

    /// Render one frame headless, write it as PNG and exit
    #[arg(long, value_name = "PNG")]
    pub screenshot: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long)]
    pub frames: Option<u64>,
}
