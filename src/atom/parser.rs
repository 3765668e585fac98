use chrono::{DateTime, FixedOffset};

use super::{attributes, elements, is_atom, ATOM_NAMESPACE, PLAIN_TEXT_CONTENT_TYPE};
use crate::config::FeedOptions;
use crate::content::{read_node_with, ContentNode};
use crate::error::{FeedError, Result};
use crate::feed::FeedParser;
use crate::model::{rel, Category, Entry, FeedItem, Image, Item, Link, Person, Uri};
use crate::util::try_parse_date;
use crate::xml::{
    is_xhtml_media_type, is_xml_media_type, skip_open_element, QuickXmlSource, StartTag, XmlNode,
    XmlSource, XHTML_NAMESPACE,
};

/// Converts Atom content trees into domain objects.
///
/// Entries always come back as [`FeedItem::Entry`] so that summary,
/// rights and content type survive.
#[derive(Debug, Clone)]
pub struct AtomParser {
    max_depth: usize,
}

impl Default for AtomParser {
    fn default() -> Self {
        Self {
            max_depth: FeedOptions::DEFAULT_MAX_DEPTH,
        }
    }
}

impl AtomParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &FeedOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    /// Parses a standalone XML fragment into a content tree, applying the
    /// Atom text construct rules.
    ///
    /// A fragment whose root element has no namespace is read as Atom: every
    /// unqualified element in it is moved into [`ATOM_NAMESPACE`].
    pub fn parse_content(&self, xml: &str) -> Result<ContentNode> {
        let mut source = QuickXmlSource::from_str(xml);
        let unqualified = matches!(
            source.peek()?,
            XmlNode::Start(root) if root.namespace.is_none()
        );
        if !unqualified {
            return self.read_content(&mut source);
        }

        let mut content =
            read_node_with(&mut source, self.max_depth, &read_fragment_text_construct)?;
        qualify(&mut content);
        Ok(content)
    }

    pub fn parse_entry(&self, xml: &str) -> Result<Entry> {
        let content = self.parse_content(xml)?;
        expect_element(&content, &[elements::ENTRY], "Invalid Atom entry")?;
        self.create_entry(&content)
    }

    /// Parses an `<entry>` and keeps only its item part.
    pub fn parse_item(&self, xml: &str) -> Result<Item> {
        self.parse_entry(xml).map(|entry| entry.item)
    }

    pub fn parse_link(&self, xml: &str) -> Result<Link> {
        let content = self.parse_content(xml)?;
        expect_element(&content, &[elements::LINK], "Invalid Atom link")?;
        self.create_link(&content)
    }

    pub fn parse_person(&self, xml: &str) -> Result<Person> {
        let content = self.parse_content(xml)?;
        expect_element(
            &content,
            &[elements::AUTHOR, elements::CONTRIBUTOR],
            "Invalid Atom person",
        )?;
        self.create_person(&content)
    }

    pub fn parse_category(&self, xml: &str) -> Result<Category> {
        let content = self.parse_content(xml)?;
        expect_element(&content, &[elements::CATEGORY], "Invalid Atom category")?;
        self.create_category(&content)
    }

    pub fn parse_image(&self, xml: &str) -> Result<Image> {
        let content = self.parse_content(xml)?;
        expect_element(&content, &[elements::LOGO, elements::ICON], "Invalid Atom image")?;
        self.create_image(&content)
    }

    /// Builds an [`Entry`] from an `<entry>` tree. Fields outside the Atom
    /// namespace are ignored.
    pub fn create_entry(&self, content: &ContentNode) -> Result<Entry> {
        let mut entry = Entry::default();

        for field in atom_fields(content) {
            match field.name.as_str() {
                elements::CATEGORY => entry.item.categories.push(self.create_category(field)?),
                elements::CONTENT => {
                    entry.content_type = Some(
                        atom_attribute(field, attributes::TYPE)
                            .unwrap_or(PLAIN_TEXT_CONTENT_TYPE)
                            .to_string(),
                    );
                    if content_source(field).is_some() {
                        entry.item.links.push(self.create_link(field)?);
                    } else {
                        entry.item.description = field.value.clone();
                    }
                }
                elements::AUTHOR | elements::CONTRIBUTOR => {
                    entry.item.contributors.push(self.create_person(field)?)
                }
                elements::ID => entry.item.id = field.value.clone(),
                elements::LINK => entry.item.links.push(self.create_link(field)?),
                elements::PUBLISHED => entry.item.published = parse_date_field(field),
                elements::UPDATED => entry.item.last_updated = parse_date_field(field),
                elements::RIGHTS => entry.rights = field.value.clone(),
                elements::SOURCE => entry.item.links.push(self.create_source(field)?),
                elements::SUMMARY => entry.summary = field.value.clone(),
                elements::TITLE => entry.item.title = field.value.clone(),
                _ => {}
            }
        }

        Ok(entry)
    }

    /// Builds a source link from a nested `<source>` feed description.
    ///
    /// The target comes from the first `<id>` that parses as a URI or the
    /// first `<link>`, whichever appears first.
    pub fn create_source(&self, content: &ContentNode) -> Result<Link> {
        let mut uri = None;
        let mut title = None;
        let mut last_updated = None;

        for field in atom_fields(content) {
            match field.name.as_str() {
                elements::ID if uri.is_none() => {
                    uri = field.value.as_deref().and_then(|v| Uri::parse(v).ok());
                }
                elements::LINK if uri.is_none() => uri = Some(self.create_link(field)?.uri),
                elements::TITLE => title = field.value.clone(),
                elements::UPDATED => last_updated = parse_date_field(field),
                _ => {}
            }
        }

        let uri = uri.ok_or_else(|| FeedError::format("Invalid source link"))?;
        Ok(Link {
            title,
            last_updated,
            ..Link::with_relationship(uri, rel::SOURCE)
        })
    }
}

impl FeedParser for AtomParser {
    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn read_content(&self, source: &mut dyn XmlSource) -> Result<ContentNode> {
        read_node_with(source, self.max_depth, &read_text_construct)
    }

    fn create_item(&self, content: &ContentNode) -> Result<FeedItem> {
        self.create_entry(content).map(FeedItem::Entry)
    }

    fn create_link(&self, content: &ContentNode) -> Result<Link> {
        let relationship_type = match atom_attribute(content, attributes::REL) {
            Some(rel) => rel.to_string(),
            None if content.name == elements::LINK => rel::ALTERNATE.to_string(),
            None => content.name.clone(),
        };

        let uri = [attributes::HREF, attributes::SOURCE, attributes::SRC]
            .into_iter()
            .filter_map(|name| atom_attribute(content, name))
            .find_map(|value| Uri::parse(value).ok())
            .ok_or_else(|| FeedError::format("Invalid uri"))?;

        let length = match atom_attribute(content, attributes::LENGTH) {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::debug!(value = %value, "Ignoring unparsable link length");
                0
            }),
            None => 0,
        };

        Ok(Link {
            title: atom_attribute(content, attributes::TITLE).map(str::to_string),
            relationship_type: Some(relationship_type),
            media_type: atom_attribute(content, attributes::TYPE).map(str::to_string),
            length,
            ..Link::new(uri)
        })
    }

    fn create_person(&self, content: &ContentNode) -> Result<Person> {
        let mut person = Person {
            relationship_type: Some(content.name.clone()),
            ..Person::default()
        };
        for field in atom_fields(content) {
            match field.name.as_str() {
                elements::NAME => person.name = field.value.clone(),
                elements::EMAIL => person.email = field.value.clone(),
                elements::URI => person.uri = field.value.clone(),
                _ => {}
            }
        }
        Ok(person)
    }

    fn create_category(&self, content: &ContentNode) -> Result<Category> {
        let term = atom_attribute(content, attributes::TERM).ok_or_else(|| {
            FeedError::format("Invalid Atom category, requires Term attribute")
        })?;
        Ok(Category {
            name: Some(term.to_string()),
            scheme: atom_attribute(content, attributes::SCHEME).map(str::to_string),
            label: atom_attribute(content, attributes::LABEL).map(str::to_string),
        })
    }

    fn create_image(&self, content: &ContentNode) -> Result<Image> {
        let url = content
            .value
            .as_deref()
            .and_then(|v| Uri::parse(v).ok())
            .ok_or_else(|| FeedError::format("Invalid Atom image url"))?;
        Ok(Image {
            relationship_type: Some(content.name.clone()),
            ..Image::new(url)
        })
    }
}

/// Value hook for Atom text constructs.
///
/// Any Atom element typed `xhtml` or `application/xhtml+xml` must wrap an
/// XHTML `<div>` whose inner markup becomes the value. `<content>` with
/// another XML media type keeps its inner markup.
fn read_text_construct(tag: &StartTag, source: &mut dyn XmlSource) -> Result<Option<String>> {
    if !is_atom(tag.namespace.as_deref()) {
        return Ok(None);
    }
    read_typed_value(tag, source)
}

/// [`read_text_construct`] for fragments read as Atom, where elements
/// carry no namespace.
fn read_fragment_text_construct(
    tag: &StartTag,
    source: &mut dyn XmlSource,
) -> Result<Option<String>> {
    if tag.namespace.is_some() && !is_atom(tag.namespace.as_deref()) {
        return Ok(None);
    }
    read_typed_value(tag, source)
}

fn read_typed_value(tag: &StartTag, source: &mut dyn XmlSource) -> Result<Option<String>> {
    let Some(media_type) = tag
        .attributes
        .iter()
        .find(|a| {
            a.name() == attributes::TYPE && a.namespace().map_or(true, |ns| ns == ATOM_NAMESPACE)
        })
        .map(|a| a.value())
    else {
        return Ok(None);
    };

    if is_xhtml_media_type(media_type) {
        let wraps_xhtml = matches!(
            source.peek()?,
            XmlNode::Start(div) if div.namespace.as_deref() == Some(XHTML_NAMESPACE)
        );
        if !wraps_xhtml {
            return Err(FeedError::format("Invalid Xhtml namespace"));
        }
        source.next_node()?;
        let value = source.read_inner_xml()?;
        skip_open_element(source)?;
        return Ok(Some(value));
    }

    if tag.name == elements::CONTENT && is_xml_media_type(media_type) {
        return source.read_inner_xml().map(Some);
    }

    Ok(None)
}

fn qualify(content: &mut ContentNode) {
    if content.namespace.is_none() {
        content.namespace = Some(ATOM_NAMESPACE.to_string());
    }
    content.fields.iter_mut().for_each(qualify);
}

fn atom_fields(content: &ContentNode) -> impl Iterator<Item = &ContentNode> {
    content.fields.iter().filter(|f| is_atom(f.namespace.as_deref()))
}

fn atom_attribute<'a>(content: &'a ContentNode, name: &str) -> Option<&'a str> {
    content.attribute_value_in(name, ATOM_NAMESPACE)
}

fn content_source(content: &ContentNode) -> Option<&str> {
    atom_attribute(content, attributes::SOURCE).or_else(|| atom_attribute(content, attributes::SRC))
}

fn expect_element(content: &ContentNode, names: &[&str], message: &str) -> Result<()> {
    if is_atom(content.namespace.as_deref()) && names.contains(&content.name.as_str()) {
        Ok(())
    } else {
        Err(FeedError::format(message))
    }
}

fn parse_date_field(field: &ContentNode) -> Option<DateTime<FixedOffset>> {
    let value = field.value.as_deref()?;
    let date = try_parse_date(value);
    if date.is_none() {
        tracing::debug!(element = %field.name, value = %value, "Ignoring unparsable date");
    }
    date
}
