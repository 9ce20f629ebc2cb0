use crate::{Result, check::CHECKS};
use serde::Serialize;
use stac_validator::{Checks, Mode, Validator, Violation};
use stac_validator_core::{Document, SelfHref, Type, Version};
use stac_validator_io::Fetch;
use std::{fmt::Display, sync::Arc};

/// Lints STAC documents.
pub struct Linter {
    validator: Validator,
}

/// A best practice that a document doesn't follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// The name of the check.
    pub check: &'static str,

    /// What's wrong.
    pub message: String,
}

/// Everything the linter found out about one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintReport {
    /// The href of the document.
    pub path: String,

    /// The document's STAC version.
    pub version: Option<Version>,

    /// The document's type.
    pub asset_type: Type,

    /// Did the document pass core and extension validation?
    pub valid_stac: bool,

    /// Validation violations, if any.
    pub validation_errors: Vec<Violation>,

    /// Best-practice warnings, in check order.
    pub warnings: Vec<Warning>,
}

impl Linter {
    /// Creates a new linter that reads through `fetcher`.
    pub fn new(fetcher: Arc<dyn Fetch>) -> Linter {
        Linter {
            validator: Validator::new(fetcher),
        }
    }

    /// Reads and lints the document at an href.
    ///
    /// Unlike validation, an unreadable document is an error, since there's
    /// nothing to lint.
    pub fn lint(&mut self, href: &str) -> Result<LintReport> {
        let href = stac_validator_io::normalize_href(href);
        let document = stac_validator_io::read(self.validator.fetcher(), &href)?;
        Ok(self.lint_document(&document))
    }

    /// Lints one document.
    pub fn lint_document(&mut self, document: &Document) -> LintReport {
        let result = self
            .validator
            .validate_node(document, &Mode::Default, Checks::default());
        let warnings: Vec<_> = CHECKS
            .iter()
            .filter_map(|&(name, check)| {
                check(document).map(|message| Warning {
                    check: name,
                    message,
                })
            })
            .collect();
        tracing::info!(
            "linted href={} valid={} warnings={}",
            result.path(),
            result.is_valid(),
            warnings.len()
        );
        LintReport {
            path: document.self_href().unwrap_or_default().to_string(),
            version: document.version().cloned(),
            asset_type: document.r#type(),
            valid_stac: result.is_valid(),
            validation_errors: result.violations().to_vec(),
            warnings,
        }
    }
}

impl LintReport {
    /// Returns true if the document is valid and follows every best practice.
    pub fn is_clean(&self) -> bool {
        self.valid_stac && self.warnings.is_empty()
    }
}

impl Display for LintReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.path)?;
        writeln!(
            f,
            "  {} (STAC {})",
            self.asset_type,
            self.version
                .as_ref()
                .map(|version| version.as_str())
                .unwrap_or("unknown")
        )?;
        if self.valid_stac {
            writeln!(f, "  valid: yes")?;
        } else {
            writeln!(f, "  valid: no")?;
            for violation in &self.validation_errors {
                writeln!(f, "    {violation}")?;
            }
        }
        if self.warnings.is_empty() {
            write!(f, "  no best practice warnings")
        } else {
            write!(f, "  best practice warnings:")?;
            for warning in &self.warnings {
                write!(f, "\n    {}: {}", warning.check, warning.message)?;
            }
            Ok(())
        }
    }
}
