use std::{fmt::Display, path::PathBuf};

/// A little helper trait for reporting results we can't recover from
pub(crate) trait UnwrapOrDie<T, E> {
    // print_msg should be a closure that eprints a message before termination
    fn unwrap_or_die(self, print_msg: impl FnOnce(E)) -> T;
}

impl<T, E: Display> UnwrapOrDie<T, E> for Result<T, E> {
    fn unwrap_or_die(self, print_msg: impl FnOnce(E)) -> T {
        match self {
            Ok(val) => val,
            Err(e) => {
                print_msg(e);
                std::process::exit(1)
            }
        }
    }
}

/// The input could not be turned into a font family name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unable to extract font family from URL '{input}'")]
pub struct ResolutionError {
    pub input: String,
}

/// A single HTTP request failed
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    // boxed because ureq's error carries a whole response
    #[error("request to '{url}' failed: {source}")]
    Http {
        url: String,
        source: Box<ureq::Error>,
    },
    #[error("failed to read response from '{url}': {source}")]
    Read {
        url: String,
        source: std::io::Error,
    },
}

/// Ways downloading a single font file can fail.
///
/// These never abort a run; they end up in [`crate::DownloadOutcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to write font file: {0}")]
    Filesystem(#[from] std::io::Error),
    #[error("refusing to write unsafe filename '{0}'")]
    UnsafeFilename(String),
}

/// Errors that stop a run before any font is downloaded
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no WOFF2 fonts found for '{family}'. The font might not be available.")]
    NoResults { family: String },
    #[error("failed to create output directory '{}': {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to start download workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
