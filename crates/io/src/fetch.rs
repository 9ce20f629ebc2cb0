use crate::{Error, RealizedHref, Result};
use bytes::Bytes;
use reqwest::{StatusCode, blocking::Client};
use std::{collections::HashMap, fmt::Debug, path::Path, sync::Arc, time::Duration};

/// The default timeout for network requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the bytes behind an href.
///
/// Every read the validator does goes through this trait: STAC documents,
/// schemas, schema `$ref`s, and link and asset reachability checks.
pub trait Fetch: Debug + Send + Sync {
    /// Fetches the content at an href.
    fn fetch(&self, href: &str) -> Result<Bytes>;

    /// Checks that an href can be retrieved, without necessarily reading it.
    ///
    /// The default implementation fetches the content and throws it away.
    fn check(&self, href: &str) -> Result<()> {
        self.fetch(href).map(|_| ())
    }
}

impl<T: Fetch + ?Sized> Fetch for Arc<T> {
    fn fetch(&self, href: &str) -> Result<Bytes> {
        (**self).fetch(href)
    }

    fn check(&self, href: &str) -> Result<()> {
        (**self).check(href)
    }
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, href: &str) -> Result<Bytes> {
        (**self).fetch(href)
    }

    fn check(&self, href: &str) -> Result<()> {
        (**self).check(href)
    }
}

/// Fetches from the local filesystem and over http(s).
///
/// All network requests share one client and one timeout. Local files can be
/// turned off, e.g. when hrefs come from untrusted clients.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    local_files: bool,
}

/// Fetches from an in-memory map of hrefs to bytes.
///
/// Useful for tests and for validating documents that didn't come from
/// anywhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    contents: HashMap<String, Bytes>,
}

impl Fetcher {
    /// Creates a new fetcher with the [DEFAULT_TIMEOUT].
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_io::Fetcher;
    ///
    /// let fetcher = Fetcher::new().unwrap();
    /// ```
    pub fn new() -> Result<Fetcher> {
        Fetcher::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new fetcher whose network requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Fetcher> {
        let client = Client::builder()
            .user_agent(crate::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Fetcher {
            client,
            local_files: true,
        })
    }

    /// Sets whether local paths (and `file://` urls) can be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_io::{Error, Fetch, Fetcher};
    ///
    /// let fetcher = Fetcher::new().unwrap().with_local_files(false);
    /// assert!(matches!(fetcher.fetch("Cargo.toml").unwrap_err(), Error::LocalPath(_)));
    /// ```
    pub fn with_local_files(mut self, local_files: bool) -> Fetcher {
        self.local_files = local_files;
        self
    }

    fn allow_path(&self, path: &Path) -> Result<()> {
        if self.local_files {
            Ok(())
        } else {
            tracing::warn!("refusing to read local path={}", path.display());
            Err(Error::LocalPath(path.to_string_lossy().into_owned()))
        }
    }
}

impl Fetch for Fetcher {
    fn fetch(&self, href: &str) -> Result<Bytes> {
        match RealizedHref::from(href) {
            RealizedHref::Url(url) => {
                tracing::debug!("fetching url={url}");
                let response = self.client.get(url).send()?.error_for_status()?;
                let bytes = response.bytes()?;
                Ok(bytes)
            }
            RealizedHref::PathBuf(path) => {
                self.allow_path(&path)?;
                tracing::debug!("reading path={}", path.display());
                std::fs::read(&path)
                    .map(Bytes::from)
                    .map_err(|io| Error::FromPath {
                        io,
                        path: path.to_string_lossy().into_owned(),
                    })
            }
        }
    }

    fn check(&self, href: &str) -> Result<()> {
        match RealizedHref::from(href) {
            RealizedHref::Url(url) => {
                tracing::debug!("checking url={url}");
                let response = self.client.head(url.clone()).send()?;
                if matches!(
                    response.status(),
                    StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
                ) {
                    let _ = self.client.get(url).send()?.error_for_status()?;
                } else {
                    let _ = response.error_for_status()?;
                }
                Ok(())
            }
            RealizedHref::PathBuf(path) => {
                self.allow_path(&path)?;
                let _ = std::fs::metadata(&path).map_err(|io| Error::FromPath {
                    io,
                    path: path.to_string_lossy().into_owned(),
                })?;
                Ok(())
            }
        }
    }
}

impl MemoryFetcher {
    /// Creates a new, empty memory fetcher.
    pub fn new() -> MemoryFetcher {
        MemoryFetcher::default()
    }

    /// Adds some bytes at an href.
    pub fn insert(&mut self, href: impl ToString, bytes: impl Into<Bytes>) {
        let _ = self.contents.insert(href.to_string(), bytes.into());
    }

    /// Adds a JSON value at an href.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_io::{Fetch, MemoryFetcher};
    ///
    /// let mut fetcher = MemoryFetcher::new();
    /// fetcher.insert_json("https://stac.test/catalog.json", &serde_json::json!({}));
    /// assert_eq!(&fetcher.fetch("https://stac.test/catalog.json").unwrap()[..], b"{}");
    /// ```
    pub fn insert_json(&mut self, href: impl ToString, value: &serde_json::Value) {
        self.insert(href, value.to_string());
    }

    /// Adds a JSON value at an href, builder style.
    pub fn with_json(mut self, href: impl ToString, value: serde_json::Value) -> MemoryFetcher {
        self.insert_json(href, &value);
        self
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, href: &str) -> Result<Bytes> {
        self.contents
            .get(href)
            .cloned()
            .ok_or_else(|| Error::NotFound(href.to_string()))
    }
}
