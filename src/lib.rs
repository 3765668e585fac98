//! Streaming RSS 2.0 and Atom 1.0 reader and writer.
//!
//! Feeds are processed one element at a time on top of a pull-style XML
//! source. A [`FeedReader`](feed::FeedReader) walks the children of the
//! feed body, classifies each element by name and namespace, and lets the
//! caller decide whether to materialize it as a typed object (item, link,
//! person, category, image), as a generic [`ContentNode`](content::ContentNode)
//! tree, or to skip it. Writing is the reverse: domain objects are turned
//! into content trees by a formatter and streamed to an XML sink.
//!
//! # Example
//!
//! ```
//! use syndfeed::feed::ElementType;
//! use syndfeed::rss::RssFeedReader;
//!
//! let xml = r#"<rss version="2.0"><channel>
//!     <title>Example</title>
//!     <item><title>Hello</title><link>https://example.com/hello</link></item>
//! </channel></rss>"#;
//!
//! let mut reader = RssFeedReader::from_str(xml);
//! let mut titles = Vec::new();
//! while reader.read().unwrap() {
//!     if reader.element_type() == ElementType::Item {
//!         let item = reader.read_item().unwrap();
//!         titles.push(item.item().title.clone());
//!     }
//! }
//! assert_eq!(titles, vec![Some("Hello".to_string())]);
//! ```

pub mod atom;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod model;
pub mod rss;
pub mod util;
pub mod xml;

pub use config::FeedOptions;
pub use content::{Attribute, ContentNode};
pub use error::{FeedError, Result};
pub use feed::ElementType;
pub use model::{Category, Entry, FeedItem, Image, Item, Link, Person, Uri};
