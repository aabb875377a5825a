//! CLI args

use std::{num::NonZeroUsize, path::PathBuf};

#[derive(Clone, Debug, clap::Parser)]
#[command(
    version,
    about,
    after_help = "Examples:
  google-fonts-woff2 \"Roboto\"
  google-fonts-woff2 \"https://fonts.google.com/specimen/Roboto\"
  google-fonts-woff2 \"https://fonts.googleapis.com/css2?family=Roboto\" -o my-fonts"
)]
pub struct Args {
    /// Google Fonts URL or font family name
    pub font: String,
    /// Output directory for downloaded fonts
    #[arg(short, long, default_value = "fonts")]
    pub output: PathBuf,
    /// Number of font files to download at once
    #[arg(short, long, default_value = "1")]
    pub jobs: NonZeroUsize,
    /// Timeout for each request, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
    /// Print the summary as json
    #[arg(long)]
    pub json: bool,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
