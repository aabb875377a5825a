//! settings for a download run

use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use crate::Args;

/// How a family should be downloaded.
///
/// There is no config file; this is built from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory the font files are written to, created if missing
    pub output_dir: PathBuf,
    /// Number of files downloaded at once; with `1` files are fetched
    /// strictly in the order they appear in the stylesheet
    pub jobs: NonZeroUsize,
    /// Timeout for each http request
    pub timeout: Duration,
}

impl Config {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            jobs: NonZeroUsize::MIN,
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            output_dir: args.output.clone(),
            jobs: args.jobs,
            timeout: Duration::from_secs(args.timeout),
        }
    }
}
