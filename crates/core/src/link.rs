//! Links between STAC documents.

use serde::{Deserialize, Serialize};

/// Child relation type.
pub const CHILD_REL: &str = "child";

/// Item relation type.
pub const ITEM_REL: &str = "item";

/// Self relation type.
pub const SELF_REL: &str = "self";

/// A reference from a STAC document to another document or resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The actual link in the format of an URL.
    ///
    /// Relative and absolute links are both allowed.
    pub href: String,

    /// Relationship between the current document and the linked document.
    pub rel: String,

    /// Media type of the referenced entity.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// A human readable title to be used in rendered displays of the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Creates a new link with the provided href and rel type.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_core::Link;
    ///
    /// let link = Link::new("an-href", "a-rel");
    /// assert_eq!(link.href, "an-href");
    /// assert_eq!(link.rel, "a-rel");
    /// ```
    pub fn new(href: impl ToString, rel: impl ToString) -> Link {
        Link {
            href: href.to_string(),
            rel: rel.to_string(),
            r#type: None,
            title: None,
        }
    }

    /// Returns true if this link's rel is `"child"`.
    pub fn is_child(&self) -> bool {
        self.rel == CHILD_REL
    }

    /// Returns true if this link's rel is `"item"`.
    pub fn is_item(&self) -> bool {
        self.rel == ITEM_REL
    }

    /// Returns true if this link's rel is `"self"`.
    pub fn is_self(&self) -> bool {
        self.rel == SELF_REL
    }
}
