//! RSS 2.0 support.
//!
//! RSS elements live in no namespace. The feed body is the `<channel>`
//! element of an `<rss version="2.0">` document; items, links, people,
//! categories and the channel image are classified for typed reading,
//! everything else (including extension elements in other namespaces) is
//! plain content.
//!
//! # Example
//!
//! ```
//! use syndfeed::model::{Item, Link, Uri};
//! use syndfeed::rss::RssFeedWriter;
//!
//! let mut writer = RssFeedWriter::from_writer(Vec::new());
//! writer.write_title("Example").unwrap();
//! writer.write_description("An example feed").unwrap();
//!
//! let item = Item {
//!     title: Some("Hello".into()),
//!     links: vec![Link::new(Uri::parse("https://example.com/hello").unwrap())],
//!     ..Item::default()
//! };
//! writer.write(&item).unwrap();
//! writer.flush().unwrap();
//!
//! let xml = String::from_utf8(writer.into_output()).unwrap();
//! assert!(xml.contains("<item><title>Hello</title><link>https://example.com/hello</link></item>"));
//! ```

mod format;
mod formatter;
mod parser;
mod reader;
mod writer;

pub use format::{classify, RssFormat};
pub use formatter::RssFormatter;
pub use parser::RssParser;
pub use reader::RssFeedReader;
pub use writer::RssFeedWriter;

pub const VERSION: &str = "2.0";

/// Element names.
pub mod elements {
    pub const RSS: &str = "rss";
    pub const CHANNEL: &str = "channel";
    pub const ITEM: &str = "item";
    pub const TITLE: &str = "title";
    pub const LINK: &str = "link";
    pub const DESCRIPTION: &str = "description";
    pub const AUTHOR: &str = "author";
    pub const MANAGING_EDITOR: &str = "managingEditor";
    pub const CATEGORY: &str = "category";
    pub const COMMENTS: &str = "comments";
    pub const ENCLOSURE: &str = "enclosure";
    pub const SOURCE: &str = "source";
    pub const GUID: &str = "guid";
    pub const PUB_DATE: &str = "pubDate";
    pub const IMAGE: &str = "image";
    pub const URL: &str = "url";
    pub const LANGUAGE: &str = "language";
    pub const COPYRIGHT: &str = "copyright";
    pub const LAST_BUILD_DATE: &str = "lastBuildDate";
    pub const GENERATOR: &str = "generator";
    pub const DOCS: &str = "docs";
    pub const TIME_TO_LIVE: &str = "ttl";
    pub const CLOUD: &str = "cloud";
    pub const SKIP_HOURS: &str = "skipHours";
    pub const HOUR: &str = "hour";
    pub const SKIP_DAYS: &str = "skipDays";
    pub const DAY: &str = "day";
}

/// Attribute names.
pub mod attributes {
    pub const VERSION: &str = "version";
    pub const IS_PERMA_LINK: &str = "isPermaLink";
    pub const LENGTH: &str = "length";
    pub const TYPE: &str = "type";
    pub const DOMAIN: &str = "domain";
    pub const URL: &str = "url";
    pub const PORT: &str = "port";
    pub const PATH: &str = "path";
    pub const REGISTER_PROCEDURE: &str = "registerProcedure";
    pub const PROTOCOL: &str = "protocol";
}
