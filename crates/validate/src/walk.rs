use crate::{Checks, Mode, ValidationResult, Validator};
use stac_validator_core::href;
use stac_validator_io::normalize_href;
use std::collections::HashMap;

/// Walks a tree (or graph) of STAC documents, validating each one once.
///
/// The walk is depth-first, in document link order, and uses an explicit
/// stack. Every href is normalized before it is checked against the visited
/// set, so cycles and repeated links are validated once, and a link is
/// scheduled only if it hasn't already been scheduled at the same or a
/// shallower depth.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    mode: Mode,
    checks: Checks,
    max_depth: Option<usize>,
}

#[derive(Debug)]
struct VisitRecord {
    href: String,
    depth: usize,
}

#[derive(Debug)]
struct Visited {
    index: usize,
    children: Vec<String>,
}

impl Walker {
    /// Creates a new walker that validates with `mode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator::{Mode, Walker};
    ///
    /// let walker = Walker::new(Mode::Core).with_max_depth(Some(2));
    /// ```
    pub fn new(mode: Mode) -> Walker {
        Walker {
            mode,
            ..Default::default()
        }
    }

    /// Sets the reachability checks run on every document.
    pub fn with_checks(mut self, checks: Checks) -> Walker {
        self.checks = checks;
        self
    }

    /// Sets the maximum depth. The root is at depth zero.
    ///
    /// Documents at the maximum depth are validated, but their children
    /// aren't visited.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Walker {
        self.max_depth = max_depth;
        self
    }

    /// Walks from `root`, returning one result per visited document.
    pub fn walk(&self, validator: &mut Validator, root: &str) -> Vec<ValidationResult> {
        self.walk_with(validator, root, |_| {})
    }

    /// Walks from `root`, calling `observer` with each result as soon as it
    /// is produced.
    ///
    /// Each document is validated once and reported at the shallowest depth
    /// it was reached. If a document is reached again by a shorter path after
    /// it was validated, its children are visited again from the shallower
    /// depth (without revalidating it), so `max_depth` never hides a
    /// document that is within reach.
    pub fn walk_with(
        &self,
        validator: &mut Validator,
        root: &str,
        mut observer: impl FnMut(&ValidationResult),
    ) -> Vec<ValidationResult> {
        let root = normalize_href(root);
        let mut depths = HashMap::from([(root.clone(), 0)]);
        let mut visited: HashMap<String, Visited> = HashMap::new();
        let mut results: Vec<ValidationResult> = Vec::new();
        let mut stack = vec![VisitRecord {
            href: root,
            depth: 0,
        }];
        while let Some(record) = stack.pop() {
            if depths
                .get(&record.href)
                .is_some_and(|&depth| depth < record.depth)
            {
                tracing::debug!("already scheduled shallower href={}", record.href);
                continue;
            }
            if let Some(node) = visited.get(&record.href) {
                let result = &mut results[node.index];
                if result.depth() <= record.depth {
                    continue;
                }
                tracing::debug!(
                    "reached href={} at depth={} (was {})",
                    record.href,
                    record.depth,
                    result.depth()
                );
                result.set_depth(record.depth);
                self.push_children(&mut stack, &mut depths, &node.children, record.depth);
                continue;
            }
            let read = stac_validator_io::read(validator.fetcher(), &record.href);
            let (result, children) = match read {
                Ok(document) => {
                    let result = validator.validate_node(&document, &self.mode, self.checks);
                    let children: Vec<_> = document
                        .child_links()
                        .map(|link| child_href(&link.href, &record.href))
                        .collect();
                    (result, children)
                }
                Err(err) => {
                    tracing::warn!("could not read href={}: {err}", record.href);
                    let result = ValidationResult::from_read_error(&record.href, &self.mode, &err);
                    (result, Vec::new())
                }
            };
            let result = result.with_depth(record.depth);
            tracing::info!(
                "validated href={} depth={} valid={}",
                result.path(),
                result.depth(),
                result.is_valid()
            );
            observer(&result);
            self.push_children(&mut stack, &mut depths, &children, record.depth);
            let _ = visited.insert(
                record.href,
                Visited {
                    index: results.len(),
                    children,
                },
            );
            results.push(result);
        }
        results
    }

    fn push_children(
        &self,
        stack: &mut Vec<VisitRecord>,
        depths: &mut HashMap<String, usize>,
        children: &[String],
        depth: usize,
    ) {
        if children.is_empty() {
            return;
        }
        if self.max_depth.is_some_and(|max_depth| depth >= max_depth) {
            tracing::debug!("max depth reached, not visiting {} children", children.len());
            return;
        }
        let depth = depth + 1;
        let mut records = Vec::new();
        for href in children {
            if depths.get(href).is_some_and(|&scheduled| scheduled <= depth) {
                continue;
            }
            let _ = depths.insert(href.clone(), depth);
            records.push(VisitRecord {
                href: href.clone(),
                depth,
            });
        }
        stack.extend(records.into_iter().rev());
    }
}

fn child_href(href: &str, base: &str) -> String {
    match href::make_absolute(href, base) {
        Ok(href) => normalize_href(&href),
        Err(err) => {
            tracing::warn!("could not resolve href={href} against base={base}: {err}");
            href.to_string()
        }
    }
}
