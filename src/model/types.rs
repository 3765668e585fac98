use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::uri::Uri;

/// A hyperlink attached to a feed or item.
///
/// `relationship_type` selects how the link is serialized: RSS enclosures,
/// comments and sources, Atom content and source links, and guid links all
/// have their own element shapes. `None` and `alternate` mean a plain link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub uri: Uri,
    pub title: Option<String>,
    pub relationship_type: Option<String>,
    pub media_type: Option<String>,
    /// Size in bytes, 0 when unknown.
    #[serde(default)]
    pub length: u64,
    pub last_updated: Option<DateTime<FixedOffset>>,
}

impl Link {
    pub fn new(uri: Uri) -> Self {
        Self {
            uri,
            title: None,
            relationship_type: None,
            media_type: None,
            length: 0,
            last_updated: None,
        }
    }

    pub fn with_relationship(uri: Uri, relationship_type: impl Into<String>) -> Self {
        Self {
            relationship_type: Some(relationship_type.into()),
            ..Self::new(uri)
        }
    }
}

/// An author, contributor or editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: Option<String>,
    pub email: Option<String>,
    pub uri: Option<String>,
    pub relationship_type: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_relationship(mut self, relationship_type: impl Into<String>) -> Self {
        self.relationship_type = Some(relationship_type.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: Option<String>,
    pub scheme: Option<String>,
    pub label: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A feed image (RSS `image`, Atom `logo` or `icon`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: Uri,
    pub title: Option<String>,
    pub link: Option<Link>,
    pub description: Option<String>,
    pub relationship_type: Option<String>,
}

impl Image {
    pub fn new(url: Uri) -> Self {
        Self {
            url,
            title: None,
            link: None,
            description: None,
            relationship_type: None,
        }
    }
}
