use super::{FeedFormat, FeedFormatter, ToContent};
use crate::content::{Attribute, ContentNode};
use crate::error::{FeedError, Result};
use crate::xml::XmlSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    NotStarted,
    Open,
    Closed,
}

/// Streaming feed writer core.
///
/// The XML declaration and the format's root elements (carrying the known
/// namespace attributes) are written lazily before the first element.
/// [`flush`](Self::flush) closes the root elements once; writing after that
/// fails with [`FeedError::InvalidOperation`].
pub struct FeedWriter<K, F, T> {
    sink: K,
    format: F,
    formatter: T,
    attributes: Vec<Attribute>,
    open_elements: usize,
    state: WriterState,
}

impl<K: XmlSink, F: FeedFormat, T: FeedFormatter> FeedWriter<K, F, T> {
    pub fn new(sink: K, format: F, formatter: T, attributes: Vec<Attribute>) -> Self {
        Self {
            sink,
            format,
            formatter,
            attributes,
            open_elements: 0,
            state: WriterState::NotStarted,
        }
    }

    /// Converts `value` with the formatter and writes it.
    ///
    /// Validation happens before any output, so a rejected value leaves
    /// the document untouched.
    pub fn write<V: ToContent + ?Sized>(&mut self, value: &V) -> Result<()> {
        let content = value.to_content(&self.formatter)?;
        self.write_content(&content)
    }

    pub fn write_content(&mut self, content: &ContentNode) -> Result<()> {
        self.ensure_started()?;
        self.formatter.write_content(content, &mut self.sink)
    }

    /// Writes `<name>value</name>` in the format's namespace.
    pub fn write_value(&mut self, name: &str, value: &str) -> Result<()> {
        let mut content = ContentNode::with_value(name, value);
        content.namespace = self.format.namespace().map(str::to_string);
        self.write_content(&content)
    }

    /// Writes markup verbatim.
    pub fn write_raw(&mut self, markup: &str) -> Result<()> {
        self.ensure_started()?;
        self.sink.write_raw(markup)
    }

    /// Closes the root elements (once) and flushes the sink.
    pub fn flush(&mut self) -> Result<()> {
        if self.state != WriterState::Closed {
            self.ensure_started()?;
            for _ in 0..self.open_elements {
                self.sink.write_end_element()?;
            }
            self.open_elements = 0;
            self.state = WriterState::Closed;
            tracing::debug!("Feed document closed");
        }
        self.sink.flush()
    }

    pub fn formatter(&self) -> &T {
        &self.formatter
    }

    pub fn is_closed(&self) -> bool {
        self.state == WriterState::Closed
    }

    pub fn into_inner(self) -> K {
        self.sink
    }

    fn ensure_started(&mut self) -> Result<()> {
        match self.state {
            WriterState::Open => Ok(()),
            WriterState::Closed => Err(FeedError::invalid_operation("Writer is already closed")),
            WriterState::NotStarted => {
                self.sink.write_declaration()?;
                self.open_elements = self.format.open_body(&mut self.sink, &self.attributes)?;
                self.state = WriterState::Open;
                Ok(())
            }
        }
    }
}
