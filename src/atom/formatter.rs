use super::{attributes, elements, is_atom, ATOM_NAMESPACE, PLAIN_TEXT_CONTENT_TYPE};
use crate::config::FeedOptions;
use crate::content::{Attribute, ContentNode};
use crate::error::{FeedError, Result};
use crate::feed::{write_text, FeedFormatter};
use crate::model::{rel, Category, Entry, Image, Item, Link, Person};
use crate::util::{non_blank, to_rfc3339};
use crate::xml::{is_xhtml_media_type, is_xml_media_type, XmlSink, XHTML_NAMESPACE};

/// Converts domain objects into Atom content trees.
///
/// Nodes without a namespace are written in the Atom namespace, which the
/// sink binds as the default so output stays unprefixed.
///
/// ```
/// use chrono::DateTime;
/// use syndfeed::atom::AtomFormatter;
/// use syndfeed::feed::FeedFormatter;
/// use syndfeed::model::{Entry, Item, Person};
///
/// let entry = Entry {
///     item: Item {
///         id: Some("urn:1".into()),
///         title: Some("Hello".into()),
///         description: Some("Body".into()),
///         last_updated: Some(DateTime::parse_from_rfc3339("2017-07-06T20:25:00Z").unwrap()),
///         contributors: vec![Person::new("Jane")],
///         ..Item::default()
///     },
///     summary: Some("Short".into()),
///     ..Entry::default()
/// };
/// let xml = AtomFormatter::new().format_value(&entry).unwrap();
/// assert!(xml.starts_with(r#"<entry xmlns="http://www.w3.org/2005/Atom"><id>urn:1</id>"#));
/// assert!(xml.ends_with("<content>Body</content><summary>Short</summary></entry>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AtomFormatter {
    use_cdata: bool,
}

impl AtomFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &FeedOptions) -> Self {
        Self {
            use_cdata: options.use_cdata,
        }
    }

    pub fn with_cdata(mut self, use_cdata: bool) -> Self {
        self.use_cdata = use_cdata;
        self
    }

    pub fn use_cdata(&self) -> bool {
        self.use_cdata
    }

    /// Shared entry conversion; `entry` is set for full entries only.
    fn create_entry_node(&self, item: &Item, entry: Option<&Entry>) -> Result<ContentNode> {
        let id = non_blank(item.id.as_deref()).ok_or(FeedError::MissingField("Id"))?;
        let title = non_blank(item.title.as_deref()).ok_or(FeedError::MissingField("Title"))?;
        let updated = item
            .last_updated
            .as_ref()
            .ok_or_else(|| FeedError::argument("Invalid LastUpdated"))?;

        let mut content = atom_node(elements::ENTRY)
            .field(atom_value(elements::ID, id))
            .field(atom_value(elements::TITLE, title))
            .field(atom_value(elements::UPDATED, to_rfc3339(updated)));
        if let Some(published) = &item.published {
            content.add_field(atom_value(elements::PUBLISHED, to_rfc3339(published)));
        }

        let mut has_content_link = false;
        let mut has_alternate_link = false;
        for link in &item.links {
            match link.relationship_type.as_deref() {
                Some(rel::CONTENT) if has_content_link => {
                    return Err(FeedError::argument("Multiple content links are not allowed"));
                }
                Some(rel::CONTENT) => has_content_link = true,
                None | Some(rel::ALTERNATE) => has_alternate_link = true,
                Some(_) => {}
            }
            content.add_field(self.create_link_content(link)?);
        }

        let mut authors = 0usize;
        for person in &item.contributors {
            if matches!(person.relationship_type.as_deref(), None | Some(rel::AUTHOR)) {
                authors += 1;
            }
            content.add_field(self.create_person_content(person)?);
        }
        match authors {
            0 => return Err(FeedError::argument("Author is required")),
            1 => {}
            _ => return Err(FeedError::argument("Only one author is allowed")),
        }

        for category in &item.categories {
            content.add_field(self.create_category_content(category)?);
        }

        match non_blank(item.description.as_deref()) {
            Some(_) if has_content_link => {
                return Err(FeedError::argument(
                    "Description and content link are not allowed simultaneously",
                ));
            }
            Some(description) => {
                let mut node = atom_value(elements::CONTENT, description);
                let content_type = entry.and_then(|e| non_blank(e.content_type.as_deref()));
                if let Some(content_type) =
                    content_type.filter(|t| !t.eq_ignore_ascii_case(PLAIN_TEXT_CONTENT_TYPE))
                {
                    node.add_attribute(Attribute::new(attributes::TYPE, content_type));
                }
                content.add_field(node);
            }
            None if !(has_content_link || has_alternate_link) => {
                return Err(FeedError::argument("Description or alternate link is required"));
            }
            None => {}
        }

        if let Some(entry) = entry {
            if let Some(summary) = non_blank(entry.summary.as_deref()) {
                content.add_field(atom_value(elements::SUMMARY, summary));
            }
            if let Some(rights) = non_blank(entry.rights.as_deref()) {
                content.add_field(atom_value(elements::RIGHTS, rights));
            }
        }

        Ok(content)
    }

    fn create_generic_link_content(&self, link: &Link) -> ContentNode {
        let mut content = atom_node(elements::LINK);
        if let Some(title) = non_blank(link.title.as_deref()) {
            content.add_attribute(Attribute::new(attributes::TITLE, title));
        }
        content.add_attribute(Attribute::new(attributes::HREF, link.uri.as_str()));
        if let Some(rel) = non_blank(link.relationship_type.as_deref()) {
            content.add_attribute(Attribute::new(attributes::REL, rel));
        }
        if let Some(media_type) = non_blank(link.media_type.as_deref()) {
            content.add_attribute(Attribute::new(attributes::TYPE, media_type));
        }
        if link.length > 0 {
            content.add_attribute(Attribute::new(attributes::LENGTH, link.length.to_string()));
        }
        content
    }

    fn create_content_link_content(&self, link: &Link) -> ContentNode {
        let mut content = atom_node(elements::CONTENT)
            .attribute(Attribute::new(attributes::SOURCE, link.uri.as_str()));
        if let Some(media_type) = non_blank(link.media_type.as_deref()) {
            content.add_attribute(Attribute::new(attributes::TYPE, media_type));
        }
        content
    }

    /// `<source>` wrapping the origin feed's title, link and update time.
    fn create_source_link_content(&self, link: &Link) -> ContentNode {
        let mut content = atom_node(elements::SOURCE);
        if let Some(title) = non_blank(link.title.as_deref()) {
            content.add_field(atom_value(elements::TITLE, title));
        }
        let origin = Link {
            media_type: link.media_type.clone(),
            length: link.length,
            ..Link::new(link.uri.clone())
        };
        content.add_field(self.create_generic_link_content(&origin));
        if let Some(updated) = &link.last_updated {
            content.add_field(atom_value(elements::UPDATED, to_rfc3339(updated)));
        }
        content
    }

    fn write_atom_node(&self, content: &ContentNode, sink: &mut dyn XmlSink) -> Result<()> {
        let namespace = content.namespace.as_deref().unwrap_or(ATOM_NAMESPACE);
        sink.write_start_element(&content.name, Some(namespace))?;

        let mut media_type = None;
        for attribute in &content.attributes {
            if media_type.is_none() && attribute.name() == attributes::TYPE {
                media_type = Some(attribute.value());
            }
            sink.write_attribute(attribute.name(), attribute.namespace(), attribute.value())?;
        }

        match &content.value {
            Some(value) => {
                let media_type = media_type.unwrap_or_default();
                let in_atom = is_atom(Some(namespace));
                if in_atom && is_xhtml_media_type(media_type) {
                    sink.write_start_element(elements::DIV, Some(XHTML_NAMESPACE))?;
                    sink.write_raw(value)?;
                    sink.write_end_element()?;
                } else if in_atom
                    && content.name == elements::CONTENT
                    && is_xml_media_type(media_type)
                {
                    sink.write_raw(value)?;
                } else {
                    write_text(value, sink, self.use_cdata)?;
                }
            }
            None => {
                for field in &content.fields {
                    self.write_atom_node(field, sink)?;
                }
            }
        }

        sink.write_end_element()
    }
}

impl FeedFormatter for AtomFormatter {
    fn create_item_content(&self, item: &Item) -> Result<ContentNode> {
        self.create_entry_node(item, None)
    }

    fn create_entry_content(&self, entry: &Entry) -> Result<ContentNode> {
        self.create_entry_node(&entry.item, Some(entry))
    }

    fn create_link_content(&self, link: &Link) -> Result<ContentNode> {
        Ok(match link.relationship_type.as_deref() {
            Some(rel::CONTENT) => self.create_content_link_content(link),
            Some(rel::SOURCE) => self.create_source_link_content(link),
            _ => self.create_generic_link_content(link),
        })
    }

    fn create_person_content(&self, person: &Person) -> Result<ContentNode> {
        let name = non_blank(person.name.as_deref()).ok_or(FeedError::MissingField("Name"))?;
        let relationship_type = person.relationship_type.as_deref().unwrap_or(rel::AUTHOR);
        if relationship_type != rel::AUTHOR && relationship_type != rel::CONTRIBUTOR {
            return Err(FeedError::argument(format!(
                "Invalid person relationship type '{relationship_type}'"
            )));
        }

        let mut content = atom_node(relationship_type).field(atom_value(elements::NAME, name));
        if let Some(email) = non_blank(person.email.as_deref()) {
            content.add_field(atom_value(elements::EMAIL, email));
        }
        if let Some(uri) = non_blank(person.uri.as_deref()) {
            content.add_field(atom_value(elements::URI, uri));
        }
        Ok(content)
    }

    fn create_category_content(&self, category: &Category) -> Result<ContentNode> {
        let name = non_blank(category.name.as_deref()).ok_or(FeedError::MissingField("Name"))?;
        let mut content =
            atom_node(elements::CATEGORY).attribute(Attribute::new(attributes::TERM, name));
        if let Some(scheme) = non_blank(category.scheme.as_deref()) {
            content.add_attribute(Attribute::new(attributes::SCHEME, scheme));
        }
        if let Some(label) = non_blank(category.label.as_deref()) {
            content.add_attribute(Attribute::new(attributes::LABEL, label));
        }
        Ok(content)
    }

    fn create_image_content(&self, image: &Image) -> Result<ContentNode> {
        let name = non_blank(image.relationship_type.as_deref()).unwrap_or(elements::ICON);
        Ok(atom_value(name, image.url.as_str()))
    }

    fn write_content(&self, content: &ContentNode, sink: &mut dyn XmlSink) -> Result<()> {
        self.write_atom_node(content, sink)
    }
}

fn atom_node(name: &str) -> ContentNode {
    ContentNode::new(name).namespace(ATOM_NAMESPACE)
}

fn atom_value(name: &str, value: impl Into<String>) -> ContentNode {
    ContentNode::with_value(name, value).namespace(ATOM_NAMESPACE)
}
