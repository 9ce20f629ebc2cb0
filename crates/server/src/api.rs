use crate::Result;
use stac_validator::{Config, Report};
use stac_validator_io::{DEFAULT_TIMEOUT, Fetch, Fetcher};
use std::{sync::Arc, time::Duration};

/// Validates hrefs on behalf of http requests.
///
/// Validation is blocking, so each one runs on tokio's blocking thread pool.
#[derive(Debug, Clone)]
pub struct Api {
    fetcher: Option<Arc<dyn Fetch>>,
    timeout: Duration,
}

impl Api {
    /// Creates a new api that only reads urls.
    ///
    /// Local paths are refused everywhere, including extension schemas a
    /// document names in `stac_extensions`, so clients can't read files off
    /// the server.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_server::Api;
    ///
    /// let api = Api::new();
    /// ```
    pub fn new() -> Api {
        Api {
            fetcher: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads everything through `fetcher` instead.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Api {
        self.fetcher = Some(fetcher);
        self
    }

    /// Sets the network timeout for each validation.
    pub fn with_timeout(mut self, timeout: Duration) -> Api {
        self.timeout = timeout;
        self
    }

    /// Validates an href in the default mode, without recursing.
    pub async fn validate(&self, href: String) -> Result<Report> {
        let config = Config::new(href).with_timeout(self.timeout);
        let fetcher = self.fetcher.clone();
        let report = tokio::task::spawn_blocking(move || {
            let fetcher: Arc<dyn Fetch> = match fetcher {
                Some(fetcher) => fetcher,
                None => Arc::new(Fetcher::with_timeout(config.timeout)?.with_local_files(false)),
            };
            stac_validator::run_with(&config, fetcher, |_| {})
        })
        .await??;
        Ok(report)
    }
}

impl Default for Api {
    fn default() -> Api {
        Api::new()
    }
}
