//! Format-neutral feed engine.
//!
//! This module provides the machinery shared by RSS and Atom:
//!
//! - **Classification**: [`FeedFormat`] validates the document root and
//!   maps each body element to an [`ElementType`]
//! - **Parsing**: [`FeedParser`] turns content trees into typed objects
//! - **Formatting**: [`FeedFormatter`] turns typed objects into content
//!   trees and serializes them
//! - **Streaming**: [`FeedReader`] and [`FeedWriter`] drive an XML source
//!   or sink one element at a time
//!
//! # Architecture
//!
//! The reader and writer are generic over the format, the parser or
//! formatter, and the XML backend. The RSS and Atom modules supply the
//! concrete strategies; neither subclasses the engine.
//!
//! ```text
//! FeedReader<S: XmlSource, F: FeedFormat, P: FeedParser>
//! FeedWriter<K: XmlSink, F: FeedFormat, T: FeedFormatter>
//! ```

mod reader;
mod writer;

pub use reader::FeedReader;
pub use writer::FeedWriter;

use crate::config::FeedOptions;
use crate::content::{read_node, Attribute, ContentNode};
use crate::error::Result;
use crate::model::{Category, Entry, FeedItem, Image, Item, Link, Person};
use crate::xml::{QuickXmlSink, XmlSink, XmlSource};

/// Semantic role of a feed body element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementType {
    /// Nothing is pending.
    #[default]
    None,
    /// Any element without a typed representation.
    Content,
    Item,
    Link,
    Person,
    Category,
    Image,
}

/// Format-specific root handling and element classification.
pub trait FeedFormat {
    /// Namespace of the format's own elements, `None` for RSS.
    fn namespace(&self) -> Option<&str>;

    /// Maps an element name to its role. Must be pure.
    fn classify(&self, namespace: Option<&str>, name: &str) -> ElementType;

    /// Validates the document root and consumes everything up to the first
    /// child of the feed body.
    fn enter_body(&self, source: &mut dyn XmlSource) -> Result<()>;

    /// Writes the document root, returning how many elements were opened.
    fn open_body(&self, sink: &mut dyn XmlSink, attributes: &[Attribute]) -> Result<usize>;
}

/// Content tree → domain object conversion.
pub trait FeedParser {
    /// Nesting limit applied by [`read_content`](Self::read_content).
    fn max_depth(&self) -> usize {
        FeedOptions::DEFAULT_MAX_DEPTH
    }

    /// Materializes the next element of `source`.
    fn read_content(&self, source: &mut dyn XmlSource) -> Result<ContentNode> {
        read_node(source, self.max_depth())
    }

    fn create_item(&self, content: &ContentNode) -> Result<FeedItem>;

    fn create_link(&self, content: &ContentNode) -> Result<Link>;

    fn create_person(&self, content: &ContentNode) -> Result<Person>;

    fn create_category(&self, content: &ContentNode) -> Result<Category>;

    fn create_image(&self, content: &ContentNode) -> Result<Image>;
}

/// Domain object → content tree conversion and serialization.
///
/// Conversions validate strictly and fail before anything is written.
pub trait FeedFormatter {
    fn create_item_content(&self, item: &Item) -> Result<ContentNode>;

    /// Full entries default to their item part.
    fn create_entry_content(&self, entry: &Entry) -> Result<ContentNode> {
        self.create_item_content(&entry.item)
    }

    fn create_link_content(&self, link: &Link) -> Result<ContentNode>;

    fn create_person_content(&self, person: &Person) -> Result<ContentNode>;

    fn create_category_content(&self, category: &Category) -> Result<ContentNode>;

    fn create_image_content(&self, image: &Image) -> Result<ContentNode>;

    /// Streams `content` to `sink`.
    fn write_content(&self, content: &ContentNode, sink: &mut dyn XmlSink) -> Result<()>;

    /// Serializes `content` to a standalone fragment.
    ///
    /// The output buffer lives only for the duration of the call.
    fn format(&self, content: &ContentNode) -> Result<String> {
        let mut sink = QuickXmlSink::new(Vec::new());
        self.write_content(content, &mut sink)?;
        sink.flush()?;
        Ok(String::from_utf8(sink.into_inner()).map_err(|e| e.utf8_error())?)
    }

    /// Converts and serializes a domain object.
    fn format_value<V: ToContent + ?Sized>(&self, value: &V) -> Result<String>
    where
        Self: Sized,
    {
        let content = value.to_content(self)?;
        self.format(&content)
    }
}

/// Anything a [`FeedWriter`] can write.
pub trait ToContent {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode>;
}

impl ToContent for ContentNode {
    fn to_content(&self, _formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        Ok(self.clone())
    }
}

impl ToContent for Item {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        formatter.create_item_content(self)
    }
}

impl ToContent for Entry {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        formatter.create_entry_content(self)
    }
}

impl ToContent for FeedItem {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        match self {
            FeedItem::Item(item) => formatter.create_item_content(item),
            FeedItem::Entry(entry) => formatter.create_entry_content(entry),
        }
    }
}

impl ToContent for Link {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        formatter.create_link_content(self)
    }
}

impl ToContent for Person {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        formatter.create_person_content(self)
    }
}

impl ToContent for Category {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        formatter.create_category_content(self)
    }
}

impl ToContent for Image {
    fn to_content(&self, formatter: &dyn FeedFormatter) -> Result<ContentNode> {
        formatter.create_image_content(self)
    }
}

/// Shared low-level emission: start tag, attributes in order, then either
/// the scalar value (escaped or CDATA) or the fields, then the end tag.
pub fn write_node(content: &ContentNode, sink: &mut dyn XmlSink, use_cdata: bool) -> Result<()> {
    sink.write_start_element(&content.name, content.namespace.as_deref())?;
    for attribute in &content.attributes {
        sink.write_attribute(attribute.name(), attribute.namespace(), attribute.value())?;
    }
    match &content.value {
        Some(value) => write_text(value, sink, use_cdata)?,
        None => {
            for field in &content.fields {
                write_node(field, sink, use_cdata)?;
            }
        }
    }
    sink.write_end_element()
}

pub(crate) fn write_text(value: &str, sink: &mut dyn XmlSink, use_cdata: bool) -> Result<()> {
    if use_cdata {
        sink.write_cdata(value)
    } else {
        sink.write_string(value)
    }
}
