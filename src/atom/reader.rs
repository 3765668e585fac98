use std::io::BufRead;

use super::{AtomFormat, AtomParser};
use crate::config::FeedOptions;
use crate::content::ContentNode;
use crate::error::{FeedError, Result};
use crate::feed::{ElementType, FeedParser, FeedReader};
use crate::model::{Category, Entry, FeedItem, Image, Link, Person};
use crate::xml::{QuickXmlSource, XmlSource};

/// Streaming reader over the children of an Atom `<feed>`.
pub struct AtomFeedReader<S, P = AtomParser> {
    inner: FeedReader<S, AtomFormat, P>,
}

impl<'a> AtomFeedReader<QuickXmlSource<&'a [u8]>> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(QuickXmlSource::from_str(xml))
    }
}

impl<R: BufRead> AtomFeedReader<QuickXmlSource<R>> {
    pub fn from_reader(input: R) -> Self {
        Self::new(QuickXmlSource::new(input))
    }

    pub fn from_reader_with_options(input: R, options: &FeedOptions) -> Self {
        Self::with_parser(QuickXmlSource::new(input), AtomParser::with_options(options))
    }
}

impl<S: XmlSource> AtomFeedReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_parser(source, AtomParser::default())
    }
}

impl<S: XmlSource, P: FeedParser> AtomFeedReader<S, P> {
    pub fn with_parser(source: S, parser: P) -> Self {
        Self {
            inner: FeedReader::new(source, AtomFormat, parser),
        }
    }

    /// See [`FeedReader::read`].
    pub fn read(&mut self) -> Result<bool> {
        self.inner.read()
    }

    pub fn element_type(&self) -> ElementType {
        self.inner.element_type()
    }

    pub fn element_name(&self) -> Option<&str> {
        self.inner.element_name()
    }

    pub fn element_namespace(&self) -> Option<&str> {
        self.inner.element_namespace()
    }

    pub fn is_at_end(&self) -> bool {
        self.inner.is_at_end()
    }

    pub fn is_faulted(&self) -> bool {
        self.inner.is_faulted()
    }

    pub fn read_item(&mut self) -> Result<FeedItem> {
        self.inner.read_item()
    }

    /// Reads the pending `<entry>` as a full [`Entry`].
    ///
    /// Fails with [`FeedError::Format`] when the parser produced a plain
    /// item instead.
    pub fn read_entry(&mut self) -> Result<Entry> {
        match self.inner.read_item()? {
            FeedItem::Entry(entry) => Ok(entry),
            FeedItem::Item(_) => Err(FeedError::format("Invalid Atom entry")),
        }
    }

    pub fn read_link(&mut self) -> Result<Link> {
        self.inner.read_link()
    }

    pub fn read_person(&mut self) -> Result<Person> {
        self.inner.read_person()
    }

    pub fn read_category(&mut self) -> Result<Category> {
        self.inner.read_category()
    }

    pub fn read_image(&mut self) -> Result<Image> {
        self.inner.read_image()
    }

    pub fn read_content(&mut self) -> Result<ContentNode> {
        self.inner.read_content()
    }

    pub fn parser(&self) -> &P {
        self.inner.parser()
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}
