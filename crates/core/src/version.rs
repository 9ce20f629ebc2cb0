use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The most recent STAC version this crate knows about.
pub const LATEST_VERSION: &str = "1.1.0";

/// A STAC version, e.g. `1.0.0` or `1.0.0-rc.2`.
///
/// A leading `v` is accepted and dropped when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    /// Returns the version as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `(major, minor, patch)` triple, ignoring any pre-release
    /// suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_core::Version;
    ///
    /// let version: Version = "1.0.0-rc.2".parse().unwrap();
    /// assert_eq!(version.triple(), Some((1, 0, 0)));
    /// ```
    pub fn triple(&self) -> Option<(u64, u64, u64)> {
        let core = self.0.split(['-', '+']).next().unwrap_or_default();
        let mut parts = core.split('.').map(|part| part.parse::<u64>().ok());
        let major = parts.next()??;
        let minor = parts.next().flatten().unwrap_or(0);
        let patch = parts.next().flatten().unwrap_or(0);
        Some((major, minor, patch))
    }

    /// Returns true if this version predates STAC 1.0.0 (and its
    /// pre-releases).
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_core::Version;
    ///
    /// assert!("0.9.0".parse::<Version>().unwrap().is_legacy());
    /// assert!(!"1.0.0-beta.2".parse::<Version>().unwrap().is_legacy());
    /// ```
    pub fn is_legacy(&self) -> bool {
        self.triple().is_some_and(|(major, _, _)| major == 0)
    }

    /// Returns true if this is the latest known version.
    pub fn is_latest(&self) -> bool {
        self.0 == LATEST_VERSION
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Version> {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);
        if s.starts_with(|c: char| c.is_ascii_digit()) {
            Ok(Version(s.to_string()))
        } else {
            Err(Error::InvalidVersion(s.to_string()))
        }
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(s: String) -> Result<Version> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> String {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::Version;

    #[test]
    fn strip_v() {
        let version: Version = "v1.1.0".parse().unwrap();
        assert_eq!(version.as_str(), "1.1.0");
        assert!(version.is_latest());
    }

    #[test]
    fn invalid() {
        let _ = "latest".parse::<Version>().unwrap_err();
        let _ = "".parse::<Version>().unwrap_err();
    }

    #[test]
    fn triple_without_patch() {
        let version: Version = "0.8".parse().unwrap();
        assert_eq!(version.triple(), Some((0, 8, 0)));
    }
}
