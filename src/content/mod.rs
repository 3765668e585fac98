//! Generic content tree.
//!
//! A [`ContentNode`] captures one XML element (name, namespace, attributes,
//! and either a scalar value or child fields) independently of what the
//! element means. Readers materialize the currently selected element into a
//! node, parsers turn nodes into typed objects, formatters build nodes that
//! writers stream out.

mod node;

pub use node::{Attribute, ContentNode};

use crate::error::{FeedError, Result};
use crate::xml::{skip_open_element, NodeKind, StartTag, XmlNode, XmlSource};

/// Hook deciding how to read the value of an element after its start tag.
///
/// Returning `Some(value)` means the hook consumed the rest of the element,
/// end tag included. `None` falls back to generic reading.
pub type ValueHook<'a> = &'a dyn Fn(&StartTag, &mut dyn XmlSource) -> Result<Option<String>>;

/// Reads the next element of `source` into a content tree.
///
/// Attributes are read first. If the element has direct text, the text
/// becomes the value and any child elements are skipped; otherwise each
/// child element becomes a field.
///
/// # Errors
///
/// - [`FeedError::MaxDepthExceeded`] when the subtree is nested deeper than
///   `max_depth` levels
/// - [`FeedError::Format`] when the next node is not a start tag or the
///   document ends inside the element
/// - any error of the underlying source
///
/// # Example
///
/// ```
/// use syndfeed::content::read_node;
/// use syndfeed::xml::QuickXmlSource;
///
/// let mut source = QuickXmlSource::from_str(
///     r#"<image><url>https://example.com/a.png</url><title>A</title></image>"#,
/// );
/// let node = read_node(&mut source, 8).unwrap();
/// assert_eq!(node.name, "image");
/// assert_eq!(node.field_value("title"), Some("A"));
/// ```
pub fn read_node(source: &mut dyn XmlSource, max_depth: usize) -> Result<ContentNode> {
    read_node_with(source, max_depth, &|_, _| Ok(None))
}

/// [`read_node`] with a format-specific hook for special value encodings
/// (for example Atom XHTML content).
pub fn read_node_with(
    source: &mut dyn XmlSource,
    max_depth: usize,
    hook: ValueHook<'_>,
) -> Result<ContentNode> {
    read_at_depth(source, 1, max_depth, hook)
}

fn read_at_depth(
    source: &mut dyn XmlSource,
    depth: usize,
    max_depth: usize,
    hook: ValueHook<'_>,
) -> Result<ContentNode> {
    if depth > max_depth {
        return Err(FeedError::MaxDepthExceeded(max_depth));
    }

    let tag = source.read_start_element()?;
    if let Some(value) = hook(&tag, source)? {
        return Ok(ContentNode {
            name: tag.name,
            namespace: tag.namespace,
            value: Some(value),
            attributes: tag.attributes,
            fields: Vec::new(),
        });
    }

    let mut node = ContentNode {
        name: tag.name,
        namespace: tag.namespace,
        value: None,
        attributes: tag.attributes,
        fields: Vec::new(),
    };

    loop {
        match source.peek_kind()? {
            NodeKind::Text => {
                let XmlNode::Text(text) = source.next_node()? else {
                    continue;
                };
                if node.fields.is_empty() {
                    node.value.get_or_insert_with(String::new).push_str(&text);
                }
            }
            NodeKind::Start if node.value.is_some() => {
                // Mixed content: the text wins, markup is dropped.
                source.skip()?;
                skip_open_element(source)?;
                break;
            }
            NodeKind::Start => {
                let field = read_at_depth(source, depth + 1, max_depth, hook)?;
                node.fields.push(field);
            }
            NodeKind::End => {
                source.next_node()?;
                break;
            }
            NodeKind::Eof => return Err(FeedError::format("Unexpected end of document")),
        }
    }

    Ok(node)
}
