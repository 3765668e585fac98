use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Weekday};

use super::{attributes, elements, RssFormat, RssFormatter};
use crate::config::FeedOptions;
use crate::content::{Attribute, ContentNode};
use crate::error::{FeedError, Result};
use crate::feed::{FeedFormatter, FeedWriter, ToContent};
use crate::model::Uri;
use crate::util::to_rfc1123;
use crate::xml::{QuickXmlSink, XmlSink};

/// Streaming writer producing an RSS 2.0 document.
///
/// Channel metadata goes through the `write_*` helpers, items and other
/// domain objects through [`write`](Self::write). Call
/// [`flush`](Self::flush) once at the end to close `<channel>` and `<rss>`.
pub struct RssFeedWriter<K, T = RssFormatter> {
    inner: FeedWriter<K, RssFormat, T>,
}

impl<W: Write> RssFeedWriter<QuickXmlSink<W>> {
    pub fn from_writer(output: W) -> Self {
        Self::from_writer_with_options(output, &FeedOptions::default())
    }

    /// Applies indentation, CDATA and the known namespaces from `options`.
    pub fn from_writer_with_options(output: W, options: &FeedOptions) -> Self {
        Self::with_formatter(
            QuickXmlSink::with_options(output, options),
            RssFormatter::with_options(options),
            options.namespace_attributes(),
        )
    }
}

impl<W: Write, T: FeedFormatter> RssFeedWriter<QuickXmlSink<W>, T> {
    /// Unwraps the sink and returns the underlying output.
    pub fn into_output(self) -> W {
        self.inner.into_inner().into_inner()
    }
}

impl<K: XmlSink> RssFeedWriter<K> {
    /// `attributes` are written on the `<rss>` root, typically `xmlns:*`
    /// declarations of extension namespaces.
    pub fn new(sink: K, attributes: Vec<Attribute>) -> Self {
        Self::with_formatter(sink, RssFormatter::default(), attributes)
    }
}

impl<K: XmlSink, T: FeedFormatter> RssFeedWriter<K, T> {
    pub fn with_formatter(sink: K, formatter: T, attributes: Vec<Attribute>) -> Self {
        Self {
            inner: FeedWriter::new(sink, RssFormat, formatter, attributes),
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

    pub fn write_title(&mut self, title: &str) -> Result<()> {
        self.write_value(elements::TITLE, title)
    }

    pub fn write_description(&mut self, description: &str) -> Result<()> {
        self.write_value(elements::DESCRIPTION, description)
    }

    pub fn write_language(&mut self, language: &str) -> Result<()> {
        self.write_value(elements::LANGUAGE, language)
    }

    pub fn write_copyright(&mut self, copyright: &str) -> Result<()> {
        self.write_value(elements::COPYRIGHT, copyright)
    }

    pub fn write_pub_date(&mut self, date: &DateTime<FixedOffset>) -> Result<()> {
        self.write_value(elements::PUB_DATE, &to_rfc1123(date))
    }

    pub fn write_last_build_date(&mut self, date: &DateTime<FixedOffset>) -> Result<()> {
        self.write_value(elements::LAST_BUILD_DATE, &to_rfc1123(date))
    }

    pub fn write_generator(&mut self, generator: &str) -> Result<()> {
        self.write_value(elements::GENERATOR, generator)
    }

    pub fn write_docs(&mut self, docs: &Uri) -> Result<()> {
        self.write_value(elements::DOCS, docs.as_str())
    }

    /// Writes `<ttl>` in whole minutes.
    pub fn write_time_to_live(&mut self, ttl: Duration) -> Result<()> {
        let minutes = ttl.as_secs() / 60;
        if minutes == 0 {
            return Err(FeedError::argument("Time to live must be at least one minute"));
        }
        self.write_value(elements::TIME_TO_LIVE, &minutes.to_string())
    }

    /// Writes `<cloud>` for the rssCloud notification endpoint `uri`.
    pub fn write_cloud(&mut self, uri: &Uri, register_procedure: &str, protocol: &str) -> Result<()> {
        let url = uri
            .to_url()
            .ok_or_else(|| FeedError::argument("Cloud requires an absolute uri"))?;
        let domain = url
            .host_str()
            .ok_or_else(|| FeedError::argument("Cloud uri requires a host"))?;
        if register_procedure.trim().is_empty() {
            return Err(FeedError::argument("Cloud requires a register procedure"));
        }
        if protocol.trim().is_empty() {
            return Err(FeedError::argument("Cloud requires a protocol"));
        }
        let port = url.port_or_known_default().unwrap_or(80);

        let cloud = ContentNode::new(elements::CLOUD)
            .attribute(Attribute::new(attributes::DOMAIN, domain))
            .attribute(Attribute::new(attributes::PORT, port.to_string()))
            .attribute(Attribute::new(attributes::PATH, url.path()))
            .attribute(Attribute::new(attributes::REGISTER_PROCEDURE, register_procedure))
            .attribute(Attribute::new(attributes::PROTOCOL, protocol));
        self.write_content(&cloud)
    }

    /// Writes `<skipHours>`; every hour must be in `0..=23`.
    pub fn write_skip_hours(&mut self, hours: &[u8]) -> Result<()> {
        if let Some(hour) = hours.iter().find(|&&h| h > 23) {
            return Err(FeedError::argument(format!("Invalid hour {hour}, expected 0-23")));
        }
        let mut content = ContentNode::new(elements::SKIP_HOURS);
        for hour in hours {
            content.add_field(ContentNode::with_value(elements::HOUR, hour.to_string()));
        }
        self.write_content(&content)
    }

    /// Writes `<skipDays>` with full English day names.
    pub fn write_skip_days(&mut self, days: &[Weekday]) -> Result<()> {
        let mut content = ContentNode::new(elements::SKIP_DAYS);
        for day in days {
            content.add_field(ContentNode::with_value(elements::DAY, day_name(*day)));
        }
        self.write_content(&content)
    }
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
