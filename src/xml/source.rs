use std::io::BufRead;

use quick_xml::events::{BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Writer};

use super::{StartTag, XmlNode, XmlSource};
use crate::content::Attribute;
use crate::error::{FeedError, Result};

/// [`XmlSource`] over a `quick-xml` namespace-aware pull reader.
///
/// Entity declarations are never expanded; only the five
/// predefined XML entities are resolved by `quick-xml`.
///
/// # Example
///
/// ```
/// use syndfeed::xml::{QuickXmlSource, XmlNode, XmlSource};
///
/// let mut source = QuickXmlSource::from_str(r#"<feed xmlns="http://www.w3.org/2005/Atom"/>"#);
/// let tag = source.read_start_element().unwrap();
/// assert_eq!(tag.name, "feed");
/// assert_eq!(tag.namespace.as_deref(), Some("http://www.w3.org/2005/Atom"));
/// assert_eq!(source.next_node().unwrap(), XmlNode::End);
/// ```
pub struct QuickXmlSource<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    peeked: Option<XmlNode>,
}

impl<R: BufRead> QuickXmlSource<R> {
    pub fn new(input: R) -> Self {
        let mut reader = NsReader::from_reader(input);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = true;
        Self {
            reader,
            buf: Vec::new(),
            peeked: None,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn pull(&mut self) -> Result<XmlNode> {
        loop {
            self.buf.clear();
            let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
            let namespace = namespace_of(resolved)?;
            match event {
                Event::Start(start) => {
                    let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
                    let mut attributes = Vec::new();
                    for attr in start.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        if attr.key.as_namespace_binding().is_some() {
                            continue;
                        }
                        let (resolved, local) = self.reader.resolve_attribute(attr.key);
                        let attr_namespace = namespace_of(resolved)?;
                        let local = std::str::from_utf8(local.as_ref())?;
                        let value = attr.unescape_value()?;
                        attributes.push(match attr_namespace {
                            Some(ns) => Attribute::with_namespace(local, ns, value),
                            None => Attribute::new(local, value),
                        });
                    }
                    return Ok(XmlNode::Start(StartTag {
                        name,
                        namespace,
                        attributes,
                    }));
                }
                Event::End(_) => return Ok(XmlNode::End),
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Ok(XmlNode::Text(text.into_owned()));
                }
                Event::CData(cdata) => {
                    let text = cdata.decode().map_err(quick_xml::Error::from)?;
                    return Ok(XmlNode::Text(text.into_owned()));
                }
                Event::Eof => return Ok(XmlNode::Eof),
                // Comments, PIs, declaration, doctype.
                _ => continue,
            }
        }
    }

    /// Reads raw events up to the end tag closing the current element,
    /// optionally re-emitting everything in between.
    fn read_to_matching_end(&mut self, mut copy: Option<&mut Writer<Vec<u8>>>) -> Result<()> {
        // Self-closing tags are kept self-closing in copied markup.
        self.reader.config_mut().expand_empty_elements = false;
        let result = self.copy_events(&mut copy);
        self.reader.config_mut().expand_empty_elements = true;
        result
    }

    fn copy_events(&mut self, copy: &mut Option<&mut Writer<Vec<u8>>>) -> Result<()> {
        let mut depth = 0usize;
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(FeedError::format("Unexpected end of document")),
                _ => {}
            }
            if let Some(writer) = copy.as_deref_mut() {
                writer.write_event(event)?;
            }
        }
    }
}

impl<'a> QuickXmlSource<&'a [u8]> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> XmlSource for QuickXmlSource<R> {
    fn peek(&mut self) -> Result<&XmlNode> {
        if self.peeked.is_none() {
            let node = self.pull()?;
            self.peeked = Some(node);
        }
        match &self.peeked {
            Some(node) => Ok(node),
            None => Err(FeedError::invalid_operation("Peek buffer unexpectedly empty")),
        }
    }

    fn next_node(&mut self) -> Result<XmlNode> {
        match self.peeked.take() {
            Some(node) => Ok(node),
            None => self.pull(),
        }
    }

    fn skip(&mut self) -> Result<()> {
        match self.next_node()? {
            XmlNode::Start(_) => self.read_to_matching_end(None),
            _ => Ok(()),
        }
    }

    fn read_inner_xml(&mut self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        match self.peeked.take() {
            None => {}
            Some(XmlNode::End) => return Ok(String::new()),
            Some(XmlNode::Text(text)) => {
                writer.write_event(Event::Text(BytesText::new(&text)))?;
            }
            Some(node) => {
                self.peeked = Some(node);
                return Err(FeedError::invalid_operation(
                    "Inner markup cannot be read after peeking a child element",
                ));
            }
        }
        self.read_to_matching_end(Some(&mut writer))?;
        Ok(std::str::from_utf8(&writer.into_inner())?.to_string())
    }
}

fn namespace_of(resolved: ResolveResult<'_>) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Bound(ns) => {
            let ns = std::str::from_utf8(ns.as_ref())?;
            Ok((!ns.is_empty()).then(|| ns.to_string()))
        }
        ResolveResult::Unknown(prefix) => Err(FeedError::format(format!(
            "Unknown namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}
