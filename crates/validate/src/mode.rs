use std::fmt::Display;

/// Which schemas a document is validated against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// The core schema followed by every extension schema.
    #[default]
    Default,

    /// Only the core schema for the document's type and version.
    Core,

    /// Only the extension schemas declared in `stac_extensions`.
    Extensions,

    /// A single user-supplied schema, as a local path or a url.
    Custom(String),
}

impl Mode {
    /// Returns the name of this mode, as used in reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator::Mode;
    ///
    /// assert_eq!(Mode::default().name(), "default");
    /// assert_eq!(Mode::Custom("schema.json".to_string()).name(), "custom");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::Core => "core",
            Mode::Extensions => "extensions",
            Mode::Custom(_) => "custom",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
