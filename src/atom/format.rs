use super::{elements, ATOM_NAMESPACE};
use crate::content::Attribute;
use crate::error::{FeedError, Result};
use crate::feed::{ElementType, FeedFormat};
use crate::xml::{XmlNode, XmlSink, XmlSource};

const ELEMENT_TYPES: [(&str, ElementType); 7] = [
    (elements::ENTRY, ElementType::Item),
    (elements::LINK, ElementType::Link),
    (elements::CATEGORY, ElementType::Category),
    (elements::LOGO, ElementType::Image),
    (elements::ICON, ElementType::Image),
    (elements::AUTHOR, ElementType::Person),
    (elements::CONTRIBUTOR, ElementType::Person),
];

/// Classifies a child of `<feed>`. Only elements in the Atom namespace
/// have a typed role.
pub fn classify(namespace: Option<&str>, name: &str) -> ElementType {
    if namespace != Some(ATOM_NAMESPACE) {
        return ElementType::Content;
    }
    ELEMENT_TYPES
        .iter()
        .find(|(element, _)| *element == name)
        .map_or(ElementType::Content, |(_, element_type)| *element_type)
}

/// Atom root handling: `<feed xmlns="http://www.w3.org/2005/Atom">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomFormat;

impl FeedFormat for AtomFormat {
    fn namespace(&self) -> Option<&str> {
        Some(ATOM_NAMESPACE)
    }

    fn classify(&self, namespace: Option<&str>, name: &str) -> ElementType {
        classify(namespace, name)
    }

    fn enter_body(&self, source: &mut dyn XmlSource) -> Result<()> {
        let is_feed = matches!(
            source.peek()?,
            XmlNode::Start(tag) if tag.is(elements::FEED, Some(ATOM_NAMESPACE))
        );
        if !is_feed {
            return Err(FeedError::format("Unknown Atom Feed"));
        }
        source.next_node()?;
        Ok(())
    }

    fn open_body(&self, sink: &mut dyn XmlSink, attributes: &[Attribute]) -> Result<usize> {
        sink.write_start_element(elements::FEED, Some(ATOM_NAMESPACE))?;
        for attribute in attributes {
            sink.write_attribute(attribute.name(), attribute.namespace(), attribute.value())?;
        }
        Ok(1)
    }
}
