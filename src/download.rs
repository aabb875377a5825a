//! saving individual font files

use std::{
    io::Write,
    path::{Component, Path, PathBuf},
};

use crate::{error::DownloadError, fetch::Fetch};

/// What happened when we tried to download one font file
#[derive(Debug)]
pub enum DownloadOutcome {
    /// A file with this name was already in the output directory
    Skipped(PathBuf),
    /// The file was fetched and written to this path
    Downloaded(PathBuf),
    Failed { url: String, error: DownloadError },
}

/// The local filename for a font url.
///
/// This is the last path segment of the url, without any query string.
pub fn font_filename(url: &str) -> &str {
    let last = url.rsplit('/').next().unwrap_or(url);
    last.split('?').next().unwrap_or(last)
}

/// Download the font at `url` into `out_dir`, which must already exist.
///
/// Existing files are never touched: if the target exists we skip without
/// making a request. Failures are reported in the outcome, never returned.
pub fn download_font<F: Fetch + ?Sized>(fetcher: &F, url: &str, out_dir: &Path) -> DownloadOutcome {
    match try_download(fetcher, url, out_dir) {
        Ok(outcome) => outcome,
        Err(error) => {
            log::debug!("failed to download {url}: '{error}'");
            DownloadOutcome::Failed {
                url: url.to_owned(),
                error,
            }
        }
    }
}

fn try_download<F: Fetch + ?Sized>(
    fetcher: &F,
    url: &str,
    out_dir: &Path,
) -> Result<DownloadOutcome, DownloadError> {
    let filename = font_filename(url);
    if !is_plain_filename(filename) {
        return Err(DownloadError::UnsafeFilename(filename.to_owned()));
    }

    let target = out_dir.join(filename);
    if target.exists() {
        return Ok(DownloadOutcome::Skipped(target));
    }

    let bytes = fetcher.fetch_bytes(url)?;

    // write next to the target and move it into place, so an interrupted
    // write never leaves a truncated font behind
    let mut temp = tempfile::Builder::new()
        .prefix(".download-")
        .tempfile_in(out_dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    match temp.persist_noclobber(&target) {
        Ok(_) => Ok(DownloadOutcome::Downloaded(target)),
        // someone else (another worker, for a duplicate url) got there first
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
            Ok(DownloadOutcome::Skipped(target))
        }
        Err(e) => Err(e.error.into()),
    }
}

// a single normal path component: no separators, no '..'
fn is_plain_filename(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
