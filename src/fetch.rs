//! http requests, dressed up as a browser
//!
//! The CSS API picks the font format based on the user agent; only clients
//! that look like a modern browser are given WOFF2 urls.

use std::{io::Read, time::Duration};

use crate::error::FetchError;

static BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
static REFERER: &str = "https://fonts.googleapis.com/";
static ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
static ACCEPT_CSS: &str = "text/css,*/*;q=0.1";
static ACCEPT_ANY: &str = "*/*";

/// Something that can GET a url.
///
/// This is a trait so that downloads can be exercised without a network.
pub trait Fetch: Sync {
    /// Fetch a stylesheet, returning the body as text
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
    /// Fetch a binary resource
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// A [`Fetch`] implementation that performs real, blocking http requests.
///
/// Each request is attempted exactly once.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Create a new fetcher; `timeout` applies to each whole request.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build();
        Self { agent }
    }

    fn get(&self, url: &str, accept: &str) -> Result<ureq::Response, FetchError> {
        log::debug!("GET {url}");
        self.agent
            .get(url)
            .set("Accept", accept)
            .set("Accept-Language", ACCEPT_LANGUAGE)
            .set("Referer", REFERER)
            .call()
            .map_err(|e| FetchError::Http {
                url: url.to_owned(),
                source: Box::new(e),
            })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.get(url, ACCEPT_CSS)?;
        resp.into_string().map_err(|source| FetchError::Read {
            url: url.to_owned(),
            source,
        })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.get(url, ACCEPT_ANY)?;
        let mut bytes = Vec::new();
        resp.into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| FetchError::Read {
                url: url.to_owned(),
                source,
            })?;
        log::debug!("read {} bytes from {url}", bytes.len());
        Ok(bytes)
    }
}

/// An in-memory [`Fetch`] for tests.
///
/// Unknown urls fail like a connection error would. Every request is recorded.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    pub(crate) css: Option<String>,
    pub(crate) files: std::collections::HashMap<String, Vec<u8>>,
    pub(crate) requests: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl FakeFetcher {
    pub(crate) fn with_css(css: &str) -> Self {
        Self {
            css: Some(css.to_owned()),
            ..Default::default()
        }
    }

    pub(crate) fn with_file(mut self, url: &str, bytes: &[u8]) -> Self {
        self.files.insert(url.to_owned(), bytes.to_vec());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_owned());
    }

    fn unreachable(url: &str) -> FetchError {
        FetchError::Read {
            url: url.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "no route"),
        }
    }
}

#[cfg(test)]
impl Fetch for FakeFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.record(url);
        self.css.clone().ok_or_else(|| Self::unreachable(url))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.record(url);
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| Self::unreachable(url))
    }
}
