use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Base used only to check that a relative reference resolves.
const RESOLUTION_BASE: &str = "http://resolution.invalid/";

/// Errors that can occur while parsing a [`Uri`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// The text was empty or whitespace only.
    #[error("URI is empty")]
    Empty,
    /// The text contains whitespace or control characters.
    #[error("URI contains whitespace or control characters: {0}")]
    IllegalCharacter(String),
    /// The text could not be parsed as an absolute or relative URI.
    #[error("Invalid URI: {0}")]
    Invalid(#[from] url::ParseError),
}

/// An absolute URI or a relative reference as found in feeds.
///
/// Absolute URIs are normalized by the `url` crate (`http://a.com` becomes
/// `http://a.com/`). Relative references such as `/icon.png` or a bare
/// guid are kept verbatim once they are known to resolve against a base.
///
/// # Examples
///
/// ```
/// use syndfeed::model::Uri;
///
/// let uri: Uri = "https://example.com".parse().unwrap();
/// assert_eq!(uri.as_str(), "https://example.com/");
/// assert!(uri.is_absolute());
///
/// let relative = Uri::parse("/images/logo.png").unwrap();
/// assert!(!relative.is_absolute());
///
/// assert!(Uri::parse("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uri(String);

impl Uri {
    pub fn parse(text: &str) -> Result<Self, UriError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(UriError::Empty);
        }
        if text.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UriError::IllegalCharacter(text.to_string()));
        }

        match Url::parse(text) {
            Ok(url) => Ok(Self(url.to_string())),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(RESOLUTION_BASE)?;
                base.join(text)?;
                Ok(Self(text.to_string()))
            }
            Err(e) => Err(UriError::Invalid(e)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the URI carries a scheme.
    pub fn is_absolute(&self) -> bool {
        Url::parse(&self.0).is_ok()
    }

    /// The parsed URL for absolute URIs, `None` for relative references.
    pub fn to_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uri {
    type Error = UriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Uri {
    type Error = UriError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.0
    }
}

impl From<Url> for Uri {
    fn from(url: Url) -> Self {
        Self(url.to_string())
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
