use crate::{Mode, Violation, ViolationKind};
use serde::Serialize;
use stac_validator_core::{Document, SelfHref, Type, Version};

/// The outcome of validating one document.
///
/// A result is valid until a violation is pushed onto it, so `valid_stac`
/// and `violations` can't disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<Version>,

    #[serde(skip_serializing_if = "Option::is_none")]
    asset_type: Option<Type>,

    validation_method: &'static str,

    schema: Vec<String>,

    valid_stac: bool,

    depth: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    error_type: Option<ViolationKind>,

    violations: Vec<Violation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    links_validated: Option<HrefChecks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    assets_validated: Option<HrefChecks>,
}

/// Which hrefs could and couldn't be retrieved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HrefChecks {
    /// Hrefs that were retrieved.
    pub valid: Vec<String>,

    /// Hrefs that weren't.
    pub invalid: Vec<String>,
}

/// Every result from one invocation, in the order the documents were
/// visited.
///
/// The first result is always the root.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    results: Vec<ValidationResult>,
}

impl ValidationResult {
    /// Creates a new, valid result for an href.
    pub fn new(path: impl ToString, mode: &Mode) -> ValidationResult {
        ValidationResult {
            path: path.to_string(),
            version: None,
            asset_type: None,
            validation_method: mode.name(),
            schema: Vec::new(),
            valid_stac: true,
            depth: 0,
            error_type: None,
            violations: Vec::new(),
            links_validated: None,
            assets_validated: None,
        }
    }

    /// Creates a new, valid result for a parsed document.
    pub fn for_document(document: &Document, mode: &Mode) -> ValidationResult {
        let mut result = ValidationResult::new(document.self_href().unwrap_or_default(), mode);
        result.version = document.version().cloned();
        result.asset_type = Some(document.r#type());
        result
    }

    /// Creates a result for an href that couldn't be read.
    pub fn from_read_error(
        path: impl ToString,
        mode: &Mode,
        error: &stac_validator_io::Error,
    ) -> ValidationResult {
        let mut result = ValidationResult::new(path, mode);
        result.push(Violation::from_read_error(error));
        result
    }

    /// Adds a violation, which makes this result invalid.
    pub fn push(&mut self, violation: Violation) {
        self.valid_stac = false;
        if self.error_type.is_none() {
            self.error_type = Some(violation.kind);
        }
        self.violations.push(violation);
    }

    pub(crate) fn push_schema(&mut self, href: impl ToString) {
        self.schema.push(href.to_string());
    }

    pub(crate) fn set_links(&mut self, checks: HrefChecks) {
        self.links_validated = Some(checks);
    }

    pub(crate) fn set_assets(&mut self, checks: HrefChecks) {
        self.assets_validated = Some(checks);
    }

    /// Sets this result's depth in the walk.
    pub fn with_depth(mut self, depth: usize) -> ValidationResult {
        self.depth = depth;
        self
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Returns true if the document passed every check.
    pub fn is_valid(&self) -> bool {
        self.valid_stac
    }

    /// Returns the href of the validated document.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the document's type, if it could be parsed.
    pub fn r#type(&self) -> Option<Type> {
        self.asset_type
    }

    /// Returns the document's depth in the walk (the root is zero).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the schema hrefs that were used, in order.
    pub fn schemas(&self) -> &[String] {
        &self.schema
    }

    /// Returns the kind of the first violation, if any.
    pub fn error_type(&self) -> Option<ViolationKind> {
        self.error_type
    }

    /// Returns every violation, in the order they were found.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the link checks, if links were checked.
    pub fn links(&self) -> Option<&HrefChecks> {
        self.links_validated.as_ref()
    }

    /// Returns the asset checks, if assets were checked.
    pub fn assets(&self) -> Option<&HrefChecks> {
        self.assets_validated.as_ref()
    }
}

impl Report {
    /// Returns the overall validity, which is the validity of the root.
    ///
    /// In recursive mode this does **not** look at descendants: a valid root
    /// with invalid children is still "valid" here. This matches the exit
    /// code of the command line interface. Use [Report::invalid_count] to
    /// look at the whole tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator::{Mode, Report, ValidationResult, Violation, ViolationKind};
    ///
    /// let root = ValidationResult::new("catalog.json", &Mode::Default);
    /// let mut child = ValidationResult::new("item.json", &Mode::Default).with_depth(1);
    /// child.push(Violation::new(ViolationKind::ValidationError, "bad"));
    /// let report = Report::from(vec![root, child]);
    /// assert!(report.overall_valid());
    /// assert_eq!(report.invalid_count(), 1);
    /// ```
    pub fn overall_valid(&self) -> bool {
        self.results.first().is_some_and(|result| result.is_valid())
    }

    /// Returns the root result.
    pub fn root(&self) -> Option<&ValidationResult> {
        self.results.first()
    }

    /// Returns all results, in visit order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Returns the number of invalid results anywhere in the report.
    pub fn invalid_count(&self) -> usize {
        self.results.iter().filter(|result| !result.is_valid()).count()
    }

    /// Returns the number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if there are no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl From<Vec<ValidationResult>> for Report {
    fn from(results: Vec<ValidationResult>) -> Report {
        Report { results }
    }
}

impl IntoIterator for Report {
    type Item = ValidationResult;
    type IntoIter = std::vec::IntoIter<ValidationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Report, ValidationResult};
    use crate::{Mode, Violation, ViolationKind};
    use serde_json::json;

    #[test]
    fn push_invalidates() {
        let mut result = ValidationResult::new("item.json", &Mode::Core);
        assert!(result.is_valid());
        result.push(Violation::new(ViolationKind::FetchError, "gone"));
        result.push(Violation::new(ViolationKind::ValidationError, "bad"));
        assert!(!result.is_valid());
        assert_eq!(result.error_type(), Some(ViolationKind::FetchError));
        assert_eq!(result.violations().len(), 2);
    }

    #[test]
    fn empty_report_is_invalid() {
        assert!(!Report::default().overall_valid());
    }

    #[test]
    fn serialize() {
        let report = Report::from(vec![ValidationResult::new("catalog.json", &Mode::Default)]);
        assert_eq!(
            serde_json::to_value(report).unwrap(),
            json!([{
                "path": "catalog.json",
                "validation_method": "default",
                "schema": [],
                "valid_stac": true,
                "depth": 0,
                "violations": []
            }])
        );
    }
}
