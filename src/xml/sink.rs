use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::XmlSink;
use crate::config::FeedOptions;
use crate::error::{FeedError, Result};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace state of one open element.
#[derive(Debug, Default)]
struct Scope {
    qname: String,
    /// `Some(None)` for `xmlns=""`, `Some(Some(uri))` for a default
    /// namespace declared on this element.
    default_namespace: Option<Option<String>>,
    prefixes: Vec<(String, String)>,
}

/// [`XmlSink`] over a `quick-xml` writer.
///
/// Namespaces are declared lazily: an element in a namespace that is not
/// the current default and has no bound prefix gets its own default
/// namespace declaration. `xmlns:*` attributes written by the caller bind
/// prefixes that later elements and attributes reuse, and redundant
/// declarations are dropped. Start tags are buffered until the first child
/// so that empty elements are written self-closing.
///
/// # Example
///
/// ```
/// use syndfeed::xml::{QuickXmlSink, XmlSink};
///
/// let mut sink = QuickXmlSink::new(Vec::new());
/// sink.write_start_element("feed", Some("http://www.w3.org/2005/Atom")).unwrap();
/// sink.write_start_element("title", Some("http://www.w3.org/2005/Atom")).unwrap();
/// sink.write_string("A & B").unwrap();
/// sink.write_end_element().unwrap();
/// sink.write_end_element().unwrap();
///
/// let xml = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(
///     xml,
///     r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>A &amp; B</title></feed>"#
/// );
/// ```
pub struct QuickXmlSink<W: Write> {
    writer: Writer<W>,
    scopes: Vec<Scope>,
    pending: Option<BytesStart<'static>>,
    generated_prefixes: usize,
}

impl<W: Write> QuickXmlSink<W> {
    pub fn new(output: W) -> Self {
        Self::from_writer(Writer::new(output))
    }

    pub fn with_indent(output: W, indent_size: usize) -> Self {
        Self::from_writer(Writer::new_with_indent(output, b' ', indent_size))
    }

    pub fn with_options(output: W, options: &FeedOptions) -> Self {
        if options.indent {
            Self::with_indent(output, options.indent_size)
        } else {
            Self::new(output)
        }
    }

    fn from_writer(writer: Writer<W>) -> Self {
        Self {
            writer,
            scopes: Vec::new(),
            pending: None,
            generated_prefixes: 0,
        }
    }

    pub fn get_mut(&mut self) -> &mut W {
        self.writer.get_mut()
    }

    /// Returns the underlying output. Unclosed elements are left unclosed.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn current_default(&self) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|s| s.default_namespace.as_ref())
            .and_then(|ns| ns.as_deref())
    }

    fn lookup_prefix(&self, prefix: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|s| s.prefixes.iter().rev())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    fn prefix_for(&self, namespace: &str) -> Option<String> {
        if namespace == XML_NAMESPACE {
            return Some("xml".to_string());
        }
        self.scopes
            .iter()
            .rev()
            .flat_map(|s| s.prefixes.iter().rev())
            .find(|(p, uri)| uri == namespace && self.lookup_prefix(p) == Some(namespace))
            .map(|(p, _)| p.clone())
    }

    fn open_pending(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    fn declare_namespace(&mut self, start: &mut BytesStart<'static>, name: &str, value: &str) {
        let prefix = name.strip_prefix("xmlns:");
        let default = (!value.is_empty()).then(|| value.to_string());
        let redundant = match prefix {
            Some(prefix) => self.lookup_prefix(prefix) == Some(value),
            None => {
                self.scopes
                    .last()
                    .is_some_and(|s| s.default_namespace.is_some())
                    || self.current_default() == default.as_deref()
            }
        };
        if redundant {
            return;
        }

        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        match prefix {
            Some(prefix) => scope.prefixes.push((prefix.to_string(), value.to_string())),
            None => scope.default_namespace = Some(default),
        }
        start.push_attribute((name, value));
    }
}

impl<W: Write> XmlSink for QuickXmlSink<W> {
    fn write_declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    fn write_start_element(&mut self, name: &str, namespace: Option<&str>) -> Result<()> {
        self.open_pending()?;

        let namespace = namespace.filter(|ns| !ns.is_empty());
        let mut scope = Scope::default();
        let qname = match namespace {
            None => {
                if self.current_default().is_some() {
                    scope.default_namespace = Some(None);
                }
                name.to_string()
            }
            Some(uri) if self.current_default() == Some(uri) => name.to_string(),
            Some(uri) => match self.prefix_for(uri) {
                Some(prefix) => format!("{prefix}:{name}"),
                None => {
                    scope.default_namespace = Some(Some(uri.to_string()));
                    name.to_string()
                }
            },
        };

        let mut start = BytesStart::new(qname.clone());
        if let Some(default) = &scope.default_namespace {
            start.push_attribute(("xmlns", default.as_deref().unwrap_or_default()));
        }
        scope.qname = qname;
        self.scopes.push(scope);
        self.pending = Some(start);
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, namespace: Option<&str>, value: &str) -> Result<()> {
        let mut start = self.pending.take().ok_or_else(|| {
            FeedError::invalid_operation("Attributes must directly follow a start element")
        })?;

        match namespace.filter(|ns| !ns.is_empty()) {
            None if name == "xmlns" || name.starts_with("xmlns:") => {
                self.declare_namespace(&mut start, name, value);
            }
            None => start.push_attribute((name, value)),
            Some(uri) => {
                let prefix = match self.prefix_for(uri) {
                    Some(prefix) => prefix,
                    None => {
                        self.generated_prefixes += 1;
                        let prefix = format!("ns{}", self.generated_prefixes);
                        self.declare_namespace(&mut start, &format!("xmlns:{prefix}"), uri);
                        prefix
                    }
                };
                start.push_attribute((format!("{prefix}:{name}").as_str(), value));
            }
        }

        self.pending = Some(start);
        Ok(())
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        self.open_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn write_cdata(&mut self, text: &str) -> Result<()> {
        self.open_pending()?;
        for section in BytesCData::escaped(text) {
            self.writer.write_event(Event::CData(section))?;
        }
        Ok(())
    }

    fn write_raw(&mut self, markup: &str) -> Result<()> {
        self.open_pending()?;
        self.writer.get_mut().write_all(markup.as_bytes())?;
        Ok(())
    }

    fn write_end_element(&mut self) -> Result<()> {
        let scope = self
            .scopes
            .pop()
            .ok_or_else(|| FeedError::invalid_operation("No open element to close"))?;
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self
                .writer
                .write_event(Event::End(BytesEnd::new(scope.qname)))?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.get_mut().flush()?;
        Ok(())
    }
}
