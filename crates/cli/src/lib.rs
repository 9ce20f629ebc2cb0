// The verbosity stuff is cribbed from https://github.com/clap-rs/clap-verbosity-flag/blob/c621a6a8a7c0b6df8f1464a985a5d076b4915693/src/lib.rs and updated for tracing

#![deny(unused_crate_dependencies)]

use anyhow::{Error, Result, anyhow};
use clap::{Parser, Subcommand};
use stac_validator::{Config, Mode, Report, ValidationResult};
use stac_validator_io::Fetcher;
use stac_validator_lint::{LintReport, Linter};
use stac_validator_server::Api;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;
use tracing::metadata::Level;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// stac-validator: validate SpatioTemporal Asset Catalog (STAC) documents
#[derive(Debug, Parser)]
#[command(name = "stac-validator", version)]
pub struct StacValidator {
    #[command(subcommand)]
    command: Command,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = ErrorLevel::verbose_help(),
        long_help = ErrorLevel::verbose_long_help(),
    )]
    verbose: u8,

    #[arg(
        long,
        short = 'q',
        action = clap::ArgAction::Count,
        global = true,
        help = ErrorLevel::quiet_help(),
        long_help = ErrorLevel::quiet_long_help(),
        conflicts_with = "verbose",
    )]
    quiet: u8,
}

/// A stac-validator subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validates a STAC catalog, collection, or item.
    ///
    /// By default, the document is validated against its core schema and
    /// the schemas of every extension it declares. Exits with an error if a
    /// single (non-recursive) document is invalid.
    Validate {
        /// The local path or url of the document to validate.
        stac_file: String,

        /// Validate against the core schema only.
        #[arg(long = "core", conflicts_with = "extensions")]
        core: bool,

        /// Validate against extension schemas only.
        #[arg(long = "extensions")]
        extensions: bool,

        /// Check that every link can be retrieved.
        #[arg(long = "links")]
        links: bool,

        /// Check that every asset can be retrieved.
        #[arg(long = "assets")]
        assets: bool,

        /// Validate against this schema (a local path or url) instead.
        #[arg(short = 'c', long = "custom")]
        custom: Option<String>,

        /// Follow `child` and `item` links, validating everything.
        ///
        /// The exit code only reflects problems with the invocation itself,
        /// never the validity of any document.
        #[arg(short = 'r', long = "recursive")]
        recursive: bool,

        /// How deep to follow links when recursing. The root is depth zero.
        #[arg(short = 'm', long = "max-depth")]
        max_depth: Option<usize>,

        /// Don't print the report to standard output.
        #[arg(long = "no_output")]
        no_output: bool,

        /// Also write the report to this file.
        #[arg(long = "log_file")]
        log_file: Option<PathBuf>,

        /// Print best-practice warnings instead of a validation report.
        #[arg(
            long = "lint",
            conflicts_with_all = [
                "core", "extensions", "links", "assets", "custom",
                "recursive", "max_depth", "log_file",
            ]
        )]
        lint: bool,

        /// The timeout for each network request, in seconds.
        #[arg(long = "timeout", default_value_t = 10)]
        timeout: u64,
    },

    /// Serves validation over http.
    Serve {
        /// The address to serve on.
        #[arg(short = 'a', long = "addr", default_value = stac_validator_server::DEFAULT_ADDR)]
        addr: String,

        /// The timeout for each network request, in seconds.
        #[arg(long = "timeout", default_value_t = 10)]
        timeout: u64,
    },
}

#[derive(Copy, Clone, Debug, Default)]
struct ErrorLevel;

impl StacValidator {
    /// Runs this command.
    ///
    /// If `init_tracing_subscriber` is `false`, it is expected that the caller
    /// is setting up the appropriate logging.
    pub async fn run(self, init_tracing_subscriber: bool) -> Result<()> {
        if init_tracing_subscriber {
            let indicatif_layer = IndicatifLayer::new();
            tracing_subscriber::registry()
                .with(LevelFilter::from(self.log_level()))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(indicatif_layer.get_stderr_writer()),
                )
                .with(indicatif_layer)
                .init();
        }
        match self.command {
            Command::Validate {
                ref stac_file,
                lint,
                no_output,
                timeout,
                ..
            } if lint => {
                let report = lint_href(stac_file.clone(), Duration::from_secs(timeout)).await?;
                if !no_output {
                    println!("{report}");
                }
                Ok(())
            }
            Command::Validate {
                no_output,
                ref log_file,
                ..
            } => {
                let config = self
                    .config()
                    .ok_or_else(|| anyhow!("not a validate command"))?;
                let recursive = config.recursive;
                let href = config.href.clone();
                let report = tokio::task::spawn_blocking(move || {
                    stac_validator::run_observed(&config, print_result)
                })
                .await??;
                if !no_output {
                    let mut stdout = std::io::stdout().lock();
                    serde_json::to_writer_pretty(&mut stdout, &report)?;
                    writeln!(stdout)?;
                    stdout.flush()?;
                }
                if let Some(log_file) = log_file {
                    write_report(log_file, &report)?;
                }
                if recursive || report.overall_valid() {
                    Ok(())
                } else {
                    Err(anyhow!("{href} is not valid STAC"))
                }
            }
            Command::Serve { ref addr, timeout } => {
                let api = Api::new().with_timeout(Duration::from_secs(timeout));
                let router = stac_validator_server::routes::from_api(api);
                let listener = TcpListener::bind(addr).await?;
                eprintln!("Serving stac-validator at http://{addr}");
                axum::serve(listener, router).await.map_err(Error::from)
            }
        }
    }

    /// Returns the validation configuration, if this is a `validate` command.
    pub fn config(&self) -> Option<Config> {
        if let Command::Validate {
            ref stac_file,
            core,
            extensions,
            links,
            assets,
            ref custom,
            recursive,
            max_depth,
            timeout,
            ..
        } = self.command
        {
            let mode = if let Some(custom) = custom {
                Mode::Custom(custom.clone())
            } else if core {
                Mode::Core
            } else if extensions {
                Mode::Extensions
            } else {
                Mode::Default
            };
            let config = Config::new(stac_file)
                .with_mode(mode)
                .with_links(links)
                .with_assets(assets)
                .with_recursive(recursive)
                .with_max_depth(max_depth)
                .with_verbose(self.verbose > 0)
                .with_timeout(Duration::from_secs(timeout));
            Some(config)
        } else {
            None
        }
    }

    pub fn log_level(&self) -> Option<Level> {
        level_enum(self.verbosity())
    }

    fn verbosity(&self) -> i8 {
        level_value(ErrorLevel::default()) - (self.quiet as i8) + (self.verbose as i8)
    }
}

impl ErrorLevel {
    fn default() -> Option<Level> {
        Some(Level::WARN)
    }

    fn verbose_help() -> Option<&'static str> {
        Some("Increase verbosity, and print each result as it is produced")
    }

    fn verbose_long_help() -> Option<&'static str> {
        None
    }

    fn quiet_help() -> Option<&'static str> {
        Some("Decrease verbosity")
    }

    fn quiet_long_help() -> Option<&'static str> {
        None
    }
}

async fn lint_href(href: String, timeout: Duration) -> Result<LintReport> {
    let report = tokio::task::spawn_blocking(move || {
        let fetcher = Fetcher::with_timeout(timeout)?;
        let mut linter = Linter::new(Arc::new(fetcher));
        linter.lint(&href).map_err(Error::from)
    })
    .await??;
    Ok(report)
}

fn print_result(result: &ValidationResult) {
    match serde_json::to_string(result) {
        Ok(json) => eprintln!("{json}"),
        Err(err) => tracing::warn!("could not serialize result for {}: {err}", result.path()),
    }
}

fn write_report(path: &Path, report: &Report) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    tracing::info!("wrote report to {}", path.display());
    Ok(())
}

fn level_enum(verbosity: i8) -> Option<Level> {
    match verbosity {
        i8::MIN..=-1 => None,
        0 => Some(Level::ERROR),
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        4..=i8::MAX => Some(Level::TRACE),
    }
}

fn level_value(level: Option<Level>) -> i8 {
    match level {
        None => -1,
        Some(Level::ERROR) => 0,
        Some(Level::WARN) => 1,
        Some(Level::INFO) => 2,
        Some(Level::DEBUG) => 3,
        Some(Level::TRACE) => 4,
    }
}

#[cfg(test)]
use {assert_cmd as _, predicates as _, rstest as _, tempfile as _};
