//! Downloading Google Fonts families as WOFF2 files

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::mpsc::channel,
};

use kdam::{tqdm, BarExt};
use rayon::prelude::*;

mod args;
mod config;
mod css;
mod download;
mod error;
mod family;
mod fetch;

pub use args::Args;
pub use config::Config;
pub use css::{css_request_url, extract_woff2_urls};
pub use download::{download_font, font_filename, DownloadOutcome};
pub use error::{DownloadError, Error, FetchError, ResolutionError};
pub use family::resolve_family;
pub use fetch::{Fetch, HttpFetcher};

use error::UnwrapOrDie;

/// A font file that could not be downloaded
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FailedDownload {
    pub url: String,
    pub error: String,
}

/// The result of downloading a family.
///
/// Each list is in the order the urls appeared in the stylesheet.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub family: String,
    pub output_dir: PathBuf,
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedDownload>,
}

impl Summary {
    fn new(family: String, output_dir: PathBuf, outcomes: Vec<DownloadOutcome>) -> Self {
        let mut summary = Summary {
            family,
            output_dir,
            downloaded: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        };
        for outcome in outcomes {
            match outcome {
                DownloadOutcome::Downloaded(path) => summary.downloaded.push(path),
                DownloadOutcome::Skipped(path) => summary.skipped.push(path),
                DownloadOutcome::Failed { url, error } => summary.failed.push(FailedDownload {
                    url,
                    error: error.to_string(),
                }),
            }
        }
        summary
    }

    /// The number of font files found in the stylesheet
    pub fn total(&self) -> usize {
        self.downloaded.len() + self.skipped.len() + self.failed.len()
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} of {} font file(s) for '{}' saved ({} downloaded, {} already present, {} failed)",
            self.downloaded.len() + self.skipped.len(),
            self.total(),
            self.family,
            self.downloaded.len(),
            self.skipped.len(),
            self.failed.len(),
        )?;
        for failed in &self.failed {
            writeln!(f, "  failed: {} ({})", failed.url, failed.error)?;
        }
        write!(f, "location: {}", self.output_dir.display())
    }
}

/// entry point for the cli tool
pub fn run(args: &Args) {
    let config = Config::from(args);
    let fetcher = HttpFetcher::new(config.timeout);
    let summary = download_family(&fetcher, &args.font, &config)
        .unwrap_or_die(|e| eprintln!("error: {e}"));

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .unwrap_or_die(|e| eprintln!("failed to serialize summary: '{e}'"));
        println!("{json}");
    } else {
        println!("{summary}");
    }
}

/// Download every WOFF2 file of the family named by `font`.
///
/// `font` is a family name or a Google Fonts url (see [`resolve_family`]).
///
/// This fails if the family can't be resolved, the stylesheet can't be
/// fetched, or it contains no WOFF2 urls; in that last case the output
/// directory is not created. Failures of individual files do not fail the
/// run, they are listed in the returned [`Summary`].
pub fn download_family<F: Fetch>(
    fetcher: &F,
    font: &str,
    config: &Config,
) -> Result<Summary, Error> {
    let family = resolve_family(font)?;
    eprintln!("font family: {family}");

    let css_url = css_request_url(&family);
    log::info!("requesting stylesheet {css_url}");
    eprintln!("fetching font data from Google Fonts...");
    let css = fetcher.fetch_text(&css_url)?;

    let urls = extract_woff2_urls(&css);
    if urls.is_empty() {
        log::debug!("stylesheet for '{family}' had no woff2 urls:\n{css}");
        return Err(Error::NoResults { family });
    }
    eprintln!("found {} WOFF2 font file(s)", urls.len());

    std::fs::create_dir_all(&config.output_dir).map_err(|source| Error::Filesystem {
        path: config.output_dir.clone(),
        source,
    })?;
    let output_dir = config
        .output_dir
        .canonicalize()
        .unwrap_or_else(|_| config.output_dir.clone());
    eprintln!("saving fonts to {}", output_dir.display());

    let outcomes = download_all(fetcher, &urls, &output_dir, config.jobs.get())?;
    Ok(Summary::new(family, output_dir, outcomes))
}

/// Download each url, returning outcomes in the same order as `urls`.
///
/// With more than one job, files are fetched on a dedicated pool and progress
/// is reported as they finish.
fn download_all<F: Fetch>(
    fetcher: &F,
    urls: &[&str],
    out_dir: &Path,
    jobs: usize,
) -> Result<Vec<DownloadOutcome>, Error> {
    let mut progressbar = tqdm!(total = urls.len(), desc = "downloading");

    if jobs <= 1 {
        let outcomes: Vec<_> = urls
            .iter()
            .map(|url| {
                let outcome = download_font(fetcher, url, out_dir);
                report(&mut progressbar, &outcome);
                outcome
            })
            .collect();
        return Ok(outcomes);
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let mut outcomes = urls
        .iter()
        .map(|_| None)
        .collect::<Vec<Option<DownloadOutcome>>>();
    std::thread::scope(|s| {
        let (tx, rx) = channel();
        s.spawn(move || {
            pool.install(|| {
                urls.par_iter()
                    .enumerate()
                    .for_each_with(tx, |tx, (i, url)| {
                        // only fails if the receiving thread is gone
                        let _ = tx.send((i, download_font(fetcher, url, out_dir)));
                    })
            })
        });
        for (i, outcome) in rx {
            report(&mut progressbar, &outcome);
            outcomes[i] = Some(outcome);
        }
    });
    Ok(outcomes.into_iter().flatten().collect())
}

fn report(progressbar: &mut kdam::Bar, outcome: &DownloadOutcome) {
    let msg = match outcome {
        DownloadOutcome::Downloaded(path) => format!("downloaded {}", file_name(path)),
        DownloadOutcome::Skipped(path) => format!("already exists: {}", file_name(path)),
        DownloadOutcome::Failed { url, error } => format!("failed to download {url}: '{error}'"),
    };
    if let Err(e) = progressbar
        .write(msg)
        .and_then(|_| progressbar.update(1).map(|_| ()))
    {
        log::warn!("failed to draw progress: '{e}'");
    }
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}
