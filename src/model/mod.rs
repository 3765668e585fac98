//! Strongly typed feed objects.
//!
//! These are plain values owned by the caller. Parsers produce them from a
//! [`ContentNode`](crate::content::ContentNode) and formatters turn them
//! back into one; no value keeps a reference to the tree it came from.

mod item;
mod types;
mod uri;

pub use item::{Entry, FeedItem, Item};
pub use types::{Category, Image, Link, Person};
pub use uri::{Uri, UriError};

/// Well-known `relationship_type` values.
pub mod rel {
    pub const ALTERNATE: &str = "alternate";
    pub const AUTHOR: &str = "author";
    pub const COMMENTS: &str = "comments";
    pub const CONTENT: &str = "content";
    pub const CONTRIBUTOR: &str = "contributor";
    pub const ENCLOSURE: &str = "enclosure";
    pub const GUID: &str = "guid";
    pub const ICON: &str = "icon";
    pub const IMAGE: &str = "image";
    pub const LOGO: &str = "logo";
    pub const MANAGING_EDITOR: &str = "managingEditor";
    pub const SOURCE: &str = "source";
}
