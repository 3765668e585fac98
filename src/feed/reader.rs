use super::{ElementType, FeedFormat, FeedParser};
use crate::content::ContentNode;
use crate::error::{FeedError, Result};
use crate::model::{Category, FeedItem, Image, Link, Person};
use crate::xml::{XmlNode, XmlSource};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReaderState {
    Uninitialized,
    Ready {
        element_type: ElementType,
        name: String,
        namespace: Option<String>,
    },
    Consumed,
    AtEnd,
    Faulted,
}

/// Streaming, single-pass feed reader.
///
/// Each call to [`read`](Self::read) advances to the next child of the feed
/// body and classifies it. The caller then either consumes the element with
/// the matching `read_*` method or [`read_content`](Self::read_content), or
/// calls `read` again to skip it. Only the selected element's subtree is
/// ever materialized.
///
/// Any failure of the XML source (or of root validation) moves the reader
/// to a faulted state; every later call fails with
/// [`FeedError::InvalidOperation`].
pub struct FeedReader<S, F, P> {
    source: S,
    format: F,
    parser: P,
    state: ReaderState,
}

impl<S: XmlSource, F: FeedFormat, P: FeedParser> FeedReader<S, F, P> {
    pub fn new(source: S, format: F, parser: P) -> Self {
        Self {
            source,
            format,
            parser,
            state: ReaderState::Uninitialized,
        }
    }

    /// Advances to the next body element.
    ///
    /// Returns `false` once the body's closing tag is reached, and keeps
    /// returning `false` afterwards.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Format`] if the document root is not a feed of this format
    /// - [`FeedError::InvalidOperation`] if the reader is faulted
    /// - any error of the XML source
    pub fn read(&mut self) -> Result<bool> {
        match self.state {
            ReaderState::Faulted => return Err(FeedError::invalid_operation("Reader is faulted")),
            ReaderState::AtEnd => return Ok(false),
            _ => {}
        }
        self.advance().map_err(|e| self.fault(e))
    }

    /// Classification of the pending element, [`ElementType::None`] when
    /// nothing is pending.
    pub fn element_type(&self) -> ElementType {
        match &self.state {
            ReaderState::Ready { element_type, .. } => *element_type,
            _ => ElementType::None,
        }
    }

    /// Local name of the pending element.
    pub fn element_name(&self) -> Option<&str> {
        match &self.state {
            ReaderState::Ready { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Namespace of the pending element.
    pub fn element_namespace(&self) -> Option<&str> {
        match &self.state {
            ReaderState::Ready { namespace, .. } => namespace.as_deref(),
            _ => None,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.state == ReaderState::AtEnd
    }

    pub fn is_faulted(&self) -> bool {
        self.state == ReaderState::Faulted
    }

    pub fn read_item(&mut self) -> Result<FeedItem> {
        let content = self.consume(Some(ElementType::Item))?;
        self.parser.create_item(&content)
    }

    pub fn read_link(&mut self) -> Result<Link> {
        let content = self.consume(Some(ElementType::Link))?;
        self.parser.create_link(&content)
    }

    pub fn read_person(&mut self) -> Result<Person> {
        let content = self.consume(Some(ElementType::Person))?;
        self.parser.create_person(&content)
    }

    pub fn read_category(&mut self) -> Result<Category> {
        let content = self.consume(Some(ElementType::Category))?;
        self.parser.create_category(&content)
    }

    pub fn read_image(&mut self) -> Result<Image> {
        let content = self.consume(Some(ElementType::Image))?;
        self.parser.create_image(&content)
    }

    /// Consumes the pending element as a content tree, whatever its
    /// classification.
    pub fn read_content(&mut self) -> Result<ContentNode> {
        self.consume(None)
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn advance(&mut self) -> Result<bool> {
        match &self.state {
            ReaderState::Uninitialized => {
                self.format.enter_body(&mut self.source)?;
                tracing::debug!("Feed root validated, entering body");
            }
            ReaderState::Ready { name, .. } => {
                tracing::debug!(element = %name, "Skipping unconsumed element");
                self.source.skip()?;
            }
            _ => {}
        }

        loop {
            let (name, namespace) = match self.source.peek()? {
                XmlNode::Start(tag) => (tag.name.clone(), tag.namespace.clone()),
                XmlNode::Text(_) => {
                    self.source.next_node()?;
                    continue;
                }
                XmlNode::End => {
                    self.source.next_node()?;
                    self.state = ReaderState::AtEnd;
                    tracing::debug!("Reached end of feed body");
                    return Ok(false);
                }
                XmlNode::Eof => {
                    return Err(FeedError::format("Document ended inside the feed body"));
                }
            };

            let element_type = self.format.classify(namespace.as_deref(), &name);
            tracing::trace!(element = %name, ?element_type, "Classified element");
            self.state = ReaderState::Ready {
                element_type,
                name,
                namespace,
            };
            return Ok(true);
        }
    }

    fn consume(&mut self, expected: Option<ElementType>) -> Result<ContentNode> {
        self.check_pending(expected)?;
        match self.parser.read_content(&mut self.source) {
            Ok(content) => {
                self.state = ReaderState::Consumed;
                Ok(content)
            }
            Err(e) => Err(self.fault(e)),
        }
    }

    fn check_pending(&self, expected: Option<ElementType>) -> Result<()> {
        let message = match &self.state {
            ReaderState::Ready { element_type, .. } => match expected {
                Some(expected) if expected != *element_type => format!(
                    "Pending element is classified as {element_type:?}, not {expected:?}"
                ),
                _ => return Ok(()),
            },
            ReaderState::Consumed => "The current element was already consumed".to_string(),
            ReaderState::Uninitialized => "Read must be called before consuming an element".to_string(),
            ReaderState::AtEnd => "The reader is at the end of the feed".to_string(),
            ReaderState::Faulted => "Reader is faulted".to_string(),
        };
        Err(FeedError::InvalidOperation(message))
    }

    fn fault(&mut self, error: FeedError) -> FeedError {
        tracing::warn!(error = %error, "Feed reader faulted");
        self.state = ReaderState::Faulted;
        error
    }
}
