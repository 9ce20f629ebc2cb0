use crate::{
    Error, HrefChecks, Mode, Result, ValidationResult, Violation, ViolationKind, schema,
};
use fluent_uri::Uri;
use jsonschema::{Retrieve, ValidationOptions, Validator as JsonschemaValidator};
use serde_json::Value;
use stac_validator_core::{Document, SelfHref, href};
use stac_validator_io::Fetch;
use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

/// Which reachability checks to run on each document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checks {
    /// Check that every non-`self` link can be retrieved.
    pub links: bool,

    /// Check that every asset can be retrieved.
    pub assets: bool,
}

/// Validates STAC documents against their schemas.
///
/// Compiled schemas are cached by href, as are schemas that failed to
/// resolve, so re-use one validator for every document in a walk.
pub struct Validator {
    fetcher: Arc<dyn Fetch>,
    validators: HashMap<String, JsonschemaValidator>,
    failures: HashMap<String, String>,
    validation_options: ValidationOptions,
}

#[derive(Debug)]
struct Retriever(Arc<dyn Fetch>);

impl Validator {
    /// Creates a new validator that reads everything through `fetcher`,
    /// including any `$ref`s inside schemas.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator::Validator;
    /// use stac_validator_io::MemoryFetcher;
    /// use std::sync::Arc;
    ///
    /// let validator = Validator::new(Arc::new(MemoryFetcher::new()));
    /// ```
    pub fn new(fetcher: Arc<dyn Fetch>) -> Validator {
        let validation_options = jsonschema::options().with_retriever(Retriever(fetcher.clone()));
        Validator {
            fetcher,
            validators: HashMap::new(),
            failures: HashMap::new(),
            validation_options,
        }
    }

    /// Returns this validator's fetcher.
    pub fn fetcher(&self) -> &Arc<dyn Fetch> {
        &self.fetcher
    }

    /// Reads and validates the document at an href.
    ///
    /// If the document can't be read, the result is invalid with a single
    /// fetch or parse violation.
    pub fn validate_href(&mut self, href: &str, mode: &Mode, checks: Checks) -> ValidationResult {
        match stac_validator_io::read(&self.fetcher, href) {
            Ok(document) => self.validate_node(&document, mode, checks),
            Err(err) => {
                tracing::warn!("could not read href={href}: {err}");
                ValidationResult::from_read_error(href, mode, &err)
            }
        }
    }

    /// Validates one document.
    ///
    /// The document is valid only if it conforms to every schema that `mode`
    /// selects and passes every requested check. Nothing here fails: problems
    /// become violations on the result.
    pub fn validate_node(
        &mut self,
        document: &Document,
        mode: &Mode,
        checks: Checks,
    ) -> ValidationResult {
        let mut result = ValidationResult::for_document(document, mode);
        match schema::sources(document, mode) {
            Ok(sources) => {
                let value = document.to_value();
                for source in sources {
                    result.push_schema(&source.href);
                    match self.validator(&source.href) {
                        Ok(validator) => {
                            for error in validator.iter_errors(&value) {
                                result.push(Violation::from_jsonschema(&error, &source.href));
                            }
                        }
                        Err(err) => result.push(Violation::from_resolution_error(&err)),
                    }
                }
            }
            Err(err) => result.push(Violation::from_resolution_error(&err)),
        }
        if checks.links {
            let hrefs = document
                .links()
                .iter()
                .filter(|link| !link.is_self())
                .map(|link| (link.href.as_str(), format!("link to {}", link.href)));
            let (href_checks, violations) =
                self.check_hrefs(document.self_href(), hrefs, ViolationKind::LinkError);
            for violation in violations {
                result.push(violation);
            }
            result.set_links(href_checks);
        }
        if checks.assets {
            let hrefs = document
                .assets()
                .iter()
                .map(|(key, asset)| {
                    (asset.href.as_str(), format!("asset {key} at {}", asset.href))
                });
            let (href_checks, violations) =
                self.check_hrefs(document.self_href(), hrefs, ViolationKind::AssetError);
            for violation in violations {
                result.push(violation);
            }
            result.set_assets(href_checks);
        }
        result
    }

    fn check_hrefs<'a>(
        &self,
        base: Option<&str>,
        hrefs: impl Iterator<Item = (&'a str, String)>,
        kind: ViolationKind,
    ) -> (HrefChecks, Vec<Violation>) {
        let mut checks = HrefChecks::default();
        let mut violations = Vec::new();
        for (href, description) in hrefs {
            let resolved = base
                .and_then(|base| href::make_absolute(href, base).ok())
                .map(|href| href.into_owned())
                .unwrap_or_else(|| href.to_string());
            match self.fetcher.check(&resolved) {
                Ok(()) => checks.valid.push(resolved),
                Err(err) => {
                    tracing::warn!("{description} unreachable: {err}");
                    violations.push(Violation::new(
                        kind,
                        format!("{description} unreachable: {err}"),
                    ));
                    checks.invalid.push(resolved);
                }
            }
        }
        (checks, violations)
    }

    fn validator(&mut self, href: &str) -> Result<&JsonschemaValidator> {
        if let Some(message) = self.failures.get(href) {
            return Err(Error::SchemaResolution {
                schema: href.to_string(),
                message: message.clone(),
            });
        }
        match self.validators.entry(href.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                match build_validator(&self.fetcher, &self.validation_options, href) {
                    Ok(validator) => {
                        tracing::debug!("compiled schema={href}");
                        Ok(entry.insert(validator))
                    }
                    Err(err) => {
                        let message = err.to_string();
                        tracing::warn!("could not resolve schema={href}: {message}");
                        let _ = self.failures.insert(href.to_string(), message.clone());
                        Err(Error::SchemaResolution {
                            schema: href.to_string(),
                            message,
                        })
                    }
                }
            }
        }
    }
}

fn build_validator(
    fetcher: &Arc<dyn Fetch>,
    options: &ValidationOptions,
    href: &str,
) -> Result<JsonschemaValidator> {
    let value = stac_validator_io::read_json(fetcher, href)?;
    let validator = options.build(&value).map_err(Box::new)?;
    Ok(validator)
}

impl Retrieve for Retriever {
    fn retrieve(
        &self,
        uri: &Uri<String>,
    ) -> std::result::Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        tracing::debug!("retrieving schema reference uri={}", uri.as_str());
        let value = stac_validator_io::read_json(&self.0, uri.as_str())?;
        Ok(value)
    }
}
