use std::io::BufRead;

use super::{RssFormat, RssParser};
use crate::config::FeedOptions;
use crate::content::ContentNode;
use crate::error::Result;
use crate::feed::{ElementType, FeedParser, FeedReader};
use crate::model::{Category, FeedItem, Image, Link, Person};
use crate::xml::{QuickXmlSource, XmlSource};

/// Streaming reader over the `<channel>` of an RSS 2.0 document.
///
/// ```
/// use syndfeed::feed::ElementType;
/// use syndfeed::rss::RssFeedReader;
///
/// let xml = r#"<rss version="2.0"><channel>
///     <title>Example</title>
///     <item><title>First</title></item>
/// </channel></rss>"#;
///
/// let mut reader = RssFeedReader::from_str(xml);
/// let mut titles = Vec::new();
/// while reader.read().unwrap() {
///     match reader.element_type() {
///         ElementType::Item => {
///             let item = reader.read_item().unwrap().into_item();
///             titles.extend(item.title);
///         }
///         _ => {
///             let content = reader.read_content().unwrap();
///             titles.extend(content.value);
///         }
///     }
/// }
/// assert_eq!(titles, vec!["Example", "First"]);
/// ```
pub struct RssFeedReader<S, P = RssParser> {
    inner: FeedReader<S, RssFormat, P>,
}

impl<'a> RssFeedReader<QuickXmlSource<&'a [u8]>> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(QuickXmlSource::from_str(xml))
    }
}

impl<R: BufRead> RssFeedReader<QuickXmlSource<R>> {
    pub fn from_reader(input: R) -> Self {
        Self::new(QuickXmlSource::new(input))
    }

    pub fn from_reader_with_options(input: R, options: &FeedOptions) -> Self {
        Self::with_parser(QuickXmlSource::new(input), RssParser::with_options(options))
    }
}

impl<S: XmlSource> RssFeedReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_parser(source, RssParser::default())
    }
}

impl<S: XmlSource, P: FeedParser> RssFeedReader<S, P> {
    /// Reader with a custom parser, for example one that understands
    /// extension elements.
    pub fn with_parser(source: S, parser: P) -> Self {
        Self {
            inner: FeedReader::new(source, RssFormat, parser),
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
