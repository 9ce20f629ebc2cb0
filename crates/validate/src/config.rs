use crate::{Checks, Mode};
use stac_validator_io::DEFAULT_TIMEOUT;
use std::time::Duration;

/// Everything one validation run needs to know.
///
/// # Examples
///
/// ```
/// use stac_validator::{Config, Mode};
///
/// let config = Config::new("catalog.json")
///     .with_mode(Mode::Core)
///     .with_recursive(true)
///     .with_max_depth(Some(3));
/// assert!(config.recursive);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The local path or url of the root document.
    pub href: String,

    /// Which schemas to validate against.
    pub mode: Mode,

    /// Which reachability checks to run.
    pub checks: Checks,

    /// Follow `child` and `item` links.
    pub recursive: bool,

    /// How deep to follow links, if recursive. `None` is unbounded.
    pub max_depth: Option<usize>,

    /// Report each result as it is produced.
    pub verbose: bool,

    /// The timeout for each network request.
    pub timeout: Duration,
}

impl Config {
    /// Creates a default configuration for an href.
    pub fn new(href: impl ToString) -> Config {
        Config {
            href: href.to_string(),
            mode: Mode::default(),
            checks: Checks::default(),
            recursive: false,
            max_depth: None,
            verbose: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the mode.
    pub fn with_mode(mut self, mode: Mode) -> Config {
        self.mode = mode;
        self
    }

    /// Sets whether links are checked.
    pub fn with_links(mut self, links: bool) -> Config {
        self.checks.links = links;
        self
    }

    /// Sets whether assets are checked.
    pub fn with_assets(mut self, assets: bool) -> Config {
        self.checks.assets = assets;
        self
    }

    /// Sets whether to recurse.
    pub fn with_recursive(mut self, recursive: bool) -> Config {
        self.recursive = recursive;
        self
    }

    /// Sets the maximum depth.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Config {
        self.max_depth = max_depth;
        self
    }

    /// Sets verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Config {
        self.verbose = verbose;
        self
    }

    /// Sets the network timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Config {
        self.timeout = timeout;
        self
    }
}
