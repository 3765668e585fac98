//! Atom 1.0 (RFC 4287) support.
//!
//! Atom elements live in the `http://www.w3.org/2005/Atom` namespace. The
//! feed body is the `<feed>` element itself; entries, links, people,
//! categories and the `logo`/`icon` images are classified for typed
//! reading.
//!
//! Text constructs follow the Atom media type rules in both directions:
//!
//! - `type="xhtml"` content is wrapped in an XHTML `<div>`; the value is
//!   the div's inner markup
//! - `<content>` with an XML media type carries its markup verbatim
//! - anything else is escaped text
//!
//! # Example
//!
//! ```
//! use syndfeed::atom::AtomFeedReader;
//! use syndfeed::feed::ElementType;
//!
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
//!     <title>Example</title>
//!     <entry>
//!         <id>urn:1</id>
//!         <title>First</title>
//!         <content type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml"><p>Hi</p></div></content>
//!     </entry>
//! </feed>"#;
//!
//! let mut reader = AtomFeedReader::from_str(xml);
//! while reader.read().unwrap() {
//!     if reader.element_type() == ElementType::Item {
//!         let entry = reader.read_entry().unwrap();
//!         assert_eq!(entry.item.description.as_deref(), Some("<p>Hi</p>"));
//!         assert_eq!(entry.content_type.as_deref(), Some("xhtml"));
//!     }
//! }
//! ```

mod format;
mod formatter;
mod parser;
mod reader;
mod writer;

pub use format::{classify, AtomFormat};
pub use formatter::AtomFormatter;
pub use parser::AtomParser;
pub use reader::AtomFeedReader;
pub use writer::AtomFeedWriter;

pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Content type assumed when `<content>` has no `type` attribute.
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text";

/// Element names.
pub mod elements {
    pub const FEED: &str = "feed";
    pub const ENTRY: &str = "entry";
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const SUBTITLE: &str = "subtitle";
    pub const UPDATED: &str = "updated";
    pub const PUBLISHED: &str = "published";
    pub const LINK: &str = "link";
    pub const CATEGORY: &str = "category";
    pub const CONTENT: &str = "content";
    pub const SUMMARY: &str = "summary";
    pub const RIGHTS: &str = "rights";
    pub const SOURCE: &str = "source";
    pub const AUTHOR: &str = "author";
    pub const CONTRIBUTOR: &str = "contributor";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const URI: &str = "uri";
    pub const LOGO: &str = "logo";
    pub const ICON: &str = "icon";
    pub const GENERATOR: &str = "generator";
    pub const DIV: &str = "div";
}

/// Attribute names.
pub mod attributes {
    pub const HREF: &str = "href";
    pub const REL: &str = "rel";
    pub const TYPE: &str = "type";
    pub const LENGTH: &str = "length";
    pub const TITLE: &str = "title";
    pub const TERM: &str = "term";
    pub const SCHEME: &str = "scheme";
    pub const LABEL: &str = "label";
    pub const SOURCE: &str = "source";
    pub const SRC: &str = "src";
    pub const URI: &str = "uri";
    pub const VERSION: &str = "version";
}

pub(crate) fn is_atom(namespace: Option<&str>) -> bool {
    namespace == Some(ATOM_NAMESPACE)
}
