//! Pull-style XML source and push-style XML sink.
//!
//! The feed engine never touches the tokenizer directly. It drives an
//! [`XmlSource`] (peek, consume, skip, inner-markup passthrough) and an
//! [`XmlSink`] (start tag, attribute, text, raw markup, end tag). The
//! `quick-xml` backed adapters [`QuickXmlSource`] and [`QuickXmlSink`] are
//! the default implementations; any other tokenizer can be plugged in by
//! implementing the traits.
//!
//! # Architecture
//!
//! ```text
//! bytes ──> QuickXmlSource ──> FeedReader ──> parser ──> Item, Link, ...
//! Item, Link, ... ──> formatter ──> FeedWriter ──> QuickXmlSink ──> bytes
//! ```

mod media;
mod sink;
mod source;

use std::fmt;

use crate::content::Attribute;
use crate::error::{FeedError, Result};

pub use media::{is_xhtml_media_type, is_xml_media_type, XHTML_NAMESPACE};
pub use sink::QuickXmlSink;
pub use source::QuickXmlSource;

/// An element start tag with resolved names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Local name, without prefix.
    pub name: String,
    /// Resolved namespace URI, `None` when unbound.
    pub namespace: Option<String>,
    /// Attributes in document order, namespace declarations excluded.
    pub attributes: Vec<Attribute>,
}

impl StartTag {
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace().is_none() && a.name() == name)
            .map(Attribute::value)
    }

    pub fn is(&self, name: &str, namespace: Option<&str>) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }
}

/// A significant node reported by an [`XmlSource`].
///
/// Comments, processing instructions, the XML declaration, the doctype and
/// whitespace-only text between markup are never reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Start(StartTag),
    End,
    Text(String),
    Eof,
}

impl XmlNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Start(_) => NodeKind::Start,
            Self::End => NodeKind::End,
            Self::Text(_) => NodeKind::Text,
            Self::Eof => NodeKind::Eof,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Start,
    End,
    Text,
    Eof,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start element",
            Self::End => "end element",
            Self::Text => "text",
            Self::Eof => "end of document",
        };
        f.write_str(name)
    }
}

/// Pull-style XML token source.
///
/// Every method is a suspension point for the underlying input; an error
/// from any of them leaves the source in an unspecified position.
pub trait XmlSource {
    /// Returns the next node without consuming it.
    fn peek(&mut self) -> Result<&XmlNode>;

    /// Consumes and returns the next node.
    fn next_node(&mut self) -> Result<XmlNode>;

    /// Consumes the next node. A start tag is consumed together with its
    /// whole subtree and matching end tag.
    fn skip(&mut self) -> Result<()>;

    /// Consumes everything up to and including the end tag of the element
    /// whose start tag was consumed last, returning the markup in between
    /// verbatim.
    fn read_inner_xml(&mut self) -> Result<String>;

    fn peek_kind(&mut self) -> Result<NodeKind> {
        Ok(self.peek()?.kind())
    }

    /// Consumes a start tag, failing on any other node.
    fn read_start_element(&mut self) -> Result<StartTag> {
        match self.next_node()? {
            XmlNode::Start(tag) => Ok(tag),
            other => Err(FeedError::format(format!(
                "Expected start element, found {}",
                other.kind()
            ))),
        }
    }

    /// Consumes an end tag, failing on any other node.
    fn read_end_element(&mut self) -> Result<()> {
        match self.next_node()? {
            XmlNode::End => Ok(()),
            other => Err(FeedError::format(format!(
                "Expected end element, found {}",
                other.kind()
            ))),
        }
    }

    /// Consumes a whole element and returns its concatenated direct text.
    /// Child elements are skipped.
    fn read_element_text(&mut self) -> Result<String> {
        self.read_start_element()?;
        let mut text = String::new();
        loop {
            match self.next_node()? {
                XmlNode::Text(t) => text.push_str(&t),
                XmlNode::Start(_) => {
                    // Child subtree still pending in the source.
                    skip_open_element(self)?;
                }
                XmlNode::End => return Ok(text),
                XmlNode::Eof => return Err(FeedError::format("Unexpected end of document")),
            }
        }
    }
}

/// Consumes the rest of an element whose start tag was already consumed.
pub(crate) fn skip_open_element<S: XmlSource + ?Sized>(source: &mut S) -> Result<()> {
    source.read_inner_xml().map(|_| ())
}

/// Push-style XML token sink.
///
/// Attributes must be written right after their start element. Namespace
/// prefixes are chosen by the sink.
pub trait XmlSink {
    fn write_declaration(&mut self) -> Result<()>;

    fn write_start_element(&mut self, name: &str, namespace: Option<&str>) -> Result<()>;

    fn write_attribute(&mut self, name: &str, namespace: Option<&str>, value: &str) -> Result<()>;

    /// Writes escaped text.
    fn write_string(&mut self, text: &str) -> Result<()>;

    /// Writes text inside one or more CDATA sections.
    fn write_cdata(&mut self, text: &str) -> Result<()>;

    /// Writes markup verbatim.
    fn write_raw(&mut self, markup: &str) -> Result<()>;

    fn write_end_element(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}
