use thiserror::Error;

/// Errors produced while reading, parsing, formatting or writing feeds.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Input does not conform to the feed format at a structural point
    /// (unknown root, unparsable required field, malformed person string).
    #[error("{0}")]
    Format(String),

    /// A domain object violates the target format's field contract.
    #[error("{0}")]
    Argument(String),

    /// A required field of a domain object is missing or empty.
    #[error("Missing required {0}")]
    MissingField(&'static str),

    /// Reader or writer protocol misuse.
    #[error("{0}")]
    InvalidOperation(String),

    /// Element nesting exceeds the configured limit.
    #[error("Element nesting depth exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),

    /// The underlying XML tokenizer or emitter failed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Raw input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Names or serialized output were not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl FeedError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    pub(crate) fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    /// True for failures of the XML source or sink itself, as opposed to
    /// feed-level validation errors.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Self::Xml(_) | Self::Io(_) | Self::Utf8(_) | Self::MaxDepthExceeded(_)
        )
    }
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
