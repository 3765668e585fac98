use std::io::Write;

use chrono::{DateTime, FixedOffset};

use super::{attributes, elements, AtomFormat, AtomFormatter, ATOM_NAMESPACE};
use crate::config::FeedOptions;
use crate::content::{Attribute, ContentNode};
use crate::error::Result;
use crate::feed::{FeedFormatter, FeedWriter, ToContent};
use crate::model::Uri;
use crate::util::to_rfc3339;
use crate::xml::{QuickXmlSink, XmlSink};

/// Streaming writer producing an Atom feed document.
///
/// ```
/// use chrono::DateTime;
/// use syndfeed::atom::AtomFeedWriter;
///
/// let mut writer = AtomFeedWriter::from_writer(Vec::new());
/// writer.write_id("urn:feed").unwrap();
/// writer.write_title("Example").unwrap();
/// writer
///     .write_updated(&DateTime::parse_from_rfc3339("2017-07-06T20:25:00Z").unwrap())
///     .unwrap();
/// writer.flush().unwrap();
///
/// let xml = String::from_utf8(writer.into_output()).unwrap();
/// assert!(xml.ends_with(
///     r#"<feed xmlns="http://www.w3.org/2005/Atom"><id>urn:feed</id><title>Example</title><updated>2017-07-06T20:25:00Z</updated></feed>"#
/// ));
/// ```
pub struct AtomFeedWriter<K, T = AtomFormatter> {
    inner: FeedWriter<K, AtomFormat, T>,
}

impl<W: Write> AtomFeedWriter<QuickXmlSink<W>> {
    pub fn from_writer(output: W) -> Self {
        Self::from_writer_with_options(output, &FeedOptions::default())
    }

    pub fn from_writer_with_options(output: W, options: &FeedOptions) -> Self {
        Self::with_formatter(
            QuickXmlSink::with_options(output, options),
            AtomFormatter::with_options(options),
            options.namespace_attributes(),
        )
    }
}

impl<W: Write, T: FeedFormatter> AtomFeedWriter<QuickXmlSink<W>, T> {
    /// Unwraps the sink and returns the underlying output.
    pub fn into_output(self) -> W {
        self.inner.into_inner().into_inner()
    }
}

impl<K: XmlSink> AtomFeedWriter<K> {
    pub fn new(sink: K, attributes: Vec<Attribute>) -> Self {
        Self::with_formatter(sink, AtomFormatter::default(), attributes)
    }
}

impl<K: XmlSink, T: FeedFormatter> AtomFeedWriter<K, T> {
    pub fn with_formatter(sink: K, formatter: T, attributes: Vec<Attribute>) -> Self {
        Self {
            inner: FeedWriter::new(sink, AtomFormat, formatter, attributes),
        }
    }

    pub fn write<V: ToContent + ?Sized>(&mut self, value: &V) -> Result<()> {
        self.inner.write(value)
    }

    pub fn write_content(&mut self, content: &ContentNode) -> Result<()> {
        self.inner.write_content(content)
    }

    pub fn write_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.inner.write_value(name, value)
    }

    pub fn write_raw(&mut self, markup: &str) -> Result<()> {
        self.inner.write_raw(markup)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    pub fn formatter(&self) -> &T {
        self.inner.formatter()
    }

    pub fn into_inner(self) -> K {
        self.inner.into_inner()
    }

    pub fn write_id(&mut self, id: &str) -> Result<()> {
        self.write_value(elements::ID, id)
    }

    pub fn write_title(&mut self, title: &str) -> Result<()> {
        self.write_value(elements::TITLE, title)
    }

    pub fn write_subtitle(&mut self, subtitle: &str) -> Result<()> {
        self.write_value(elements::SUBTITLE, subtitle)
    }

    pub fn write_rights(&mut self, rights: &str) -> Result<()> {
        self.write_value(elements::RIGHTS, rights)
    }

    pub fn write_updated(&mut self, updated: &DateTime<FixedOffset>) -> Result<()> {
        self.write_value(elements::UPDATED, &to_rfc3339(updated))
    }

    pub fn write_generator(
        &mut self,
        value: &str,
        uri: Option<&Uri>,
        version: Option<&str>,
    ) -> Result<()> {
        let mut generator = atom_text(elements::GENERATOR, value);
        if let Some(uri) = uri {
            generator.add_attribute(Attribute::new(attributes::URI, uri.as_str()));
        }
        if let Some(version) = version {
            generator.add_attribute(Attribute::new(attributes::VERSION, version));
        }
        self.write_content(&generator)
    }

    /// Writes an Atom text construct. `media_type` follows the `type`
    /// attribute rules: `xhtml` wraps the value in an XHTML `<div>`, XML
    /// types on `<content>` are written verbatim.
    pub fn write_text(&mut self, name: &str, value: &str, media_type: Option<&str>) -> Result<()> {
        let mut text = atom_text(name, value);
        if let Some(media_type) = media_type {
            text.add_attribute(Attribute::new(attributes::TYPE, media_type));
        }
        self.write_content(&text)
    }
}

fn atom_text(name: &str, value: &str) -> ContentNode {
    ContentNode::with_value(name, value).namespace(ATOM_NAMESPACE)
}
