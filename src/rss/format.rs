use super::{attributes, elements, VERSION};
use crate::content::Attribute;
use crate::error::{FeedError, Result};
use crate::feed::{ElementType, FeedFormat};
use crate::xml::{XmlNode, XmlSink, XmlSource};

/// Element name → role, for elements in the RSS (empty) namespace.
const ELEMENT_TYPES: [(&str, ElementType); 6] = [
    (elements::ITEM, ElementType::Item),
    (elements::LINK, ElementType::Link),
    (elements::CATEGORY, ElementType::Category),
    (elements::AUTHOR, ElementType::Person),
    (elements::MANAGING_EDITOR, ElementType::Person),
    (elements::IMAGE, ElementType::Image),
];

/// Classifies an element of an RSS channel.
///
/// Elements in any namespace are extension content.
pub fn classify(namespace: Option<&str>, name: &str) -> ElementType {
    if namespace.is_some() {
        return ElementType::Content;
    }
    ELEMENT_TYPES
        .iter()
        .find(|(element, _)| *element == name)
        .map_or(ElementType::Content, |(_, element_type)| *element_type)
}

/// RSS 2.0 root handling: `<rss version="2.0"><channel>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RssFormat;

impl FeedFormat for RssFormat {
    fn namespace(&self) -> Option<&str> {
        None
    }

    fn classify(&self, namespace: Option<&str>, name: &str) -> ElementType {
        classify(namespace, name)
    }

    fn enter_body(&self, source: &mut dyn XmlSource) -> Result<()> {
        let is_root = matches!(
            source.peek()?,
            XmlNode::Start(tag)
                if tag.is(elements::RSS, None)
                    && tag.attribute_value(attributes::VERSION) == Some(VERSION)
        );
        if !is_root {
            return Err(FeedError::format("Unknown Rss Feed"));
        }
        source.next_node()?;

        let is_channel = matches!(
            source.peek()?,
            XmlNode::Start(tag) if tag.is(elements::CHANNEL, None)
        );
        if !is_channel {
            return Err(FeedError::format("Unknown Rss Feed"));
        }
        source.next_node()?;
        Ok(())
    }

    fn open_body(&self, sink: &mut dyn XmlSink, attributes: &[Attribute]) -> Result<usize> {
        sink.write_start_element(elements::RSS, None)?;
        for attribute in attributes {
            sink.write_attribute(attribute.name(), attribute.namespace(), attribute.value())?;
        }
        sink.write_attribute(attributes::VERSION, None, VERSION)?;
        sink.write_start_element(elements::CHANNEL, None)?;
        Ok(2)
    }
}
