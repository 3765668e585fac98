use super::{attributes, elements};
use crate::config::FeedOptions;
use crate::content::{Attribute, ContentNode};
use crate::error::{FeedError, Result};
use crate::feed::{write_node, FeedFormatter};
use crate::model::{rel, Category, Image, Item, Link, Person};
use crate::util::{non_blank, to_rfc1123};
use crate::xml::XmlSink;

/// Converts domain objects into RSS content trees.
///
/// Every conversion validates the RSS field contract first and returns
/// [`FeedError::Argument`] without producing partial output.
///
/// ```
/// use syndfeed::feed::FeedFormatter;
/// use syndfeed::model::Person;
/// use syndfeed::rss::RssFormatter;
///
/// let person = Person::new("John Doe").with_email("a@b.com");
/// let xml = RssFormatter::new().format_value(&person).unwrap();
/// assert_eq!(xml, "<author>a@b.com (John Doe)</author>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RssFormatter {
    use_cdata: bool,
}

impl RssFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &FeedOptions) -> Self {
        Self {
            use_cdata: options.use_cdata,
        }
    }

    /// Wraps scalar values in CDATA sections instead of escaping them.
    pub fn with_cdata(mut self, use_cdata: bool) -> Self {
        self.use_cdata = use_cdata;
        self
    }

    pub fn use_cdata(&self) -> bool {
        self.use_cdata
    }

    fn create_enclosure_content(&self, link: &Link) -> Result<ContentNode> {
        if link.length == 0 {
            return Err(FeedError::argument("Enclosure requires length attribute"));
        }
        let media_type = non_blank(link.media_type.as_deref())
            .ok_or_else(|| FeedError::argument("Enclosure requires a MediaType"))?;

        Ok(ContentNode::new(elements::ENCLOSURE)
            .attribute(Attribute::new(attributes::URL, link.uri.as_str()))
            .attribute(Attribute::new(attributes::LENGTH, link.length.to_string()))
            .attribute(Attribute::new(attributes::TYPE, media_type)))
    }

    fn create_source_content(&self, link: &Link) -> ContentNode {
        let url = link.uri.as_str();
        let mut content = ContentNode::new(elements::SOURCE);
        if link.title.as_deref() != Some(url) {
            content.add_attribute(Attribute::new(attributes::URL, url));
        }
        if let Some(title) = non_blank(link.title.as_deref()) {
            content.set_value(title);
        }
        content
    }

    /// `<link>` for alternate links, otherwise the relationship names the
    /// element (`<guid>`, custom link-like elements).
    fn create_generic_link_content(&self, link: &Link) -> ContentNode {
        let name = match non_blank(link.relationship_type.as_deref()) {
            None | Some(rel::ALTERNATE) => elements::LINK,
            Some(relationship_type) => relationship_type,
        };

        let mut content = match non_blank(link.title.as_deref()) {
            Some(title) => ContentNode::with_value(name, title)
                .attribute(Attribute::new(attributes::URL, link.uri.as_str())),
            None => ContentNode::with_value(name, link.uri.as_str()),
        };
        if let Some(media_type) = non_blank(link.media_type.as_deref()) {
            content.add_attribute(Attribute::new(attributes::TYPE, media_type));
        }
        if link.length != 0 {
            content.add_attribute(Attribute::new(attributes::LENGTH, link.length.to_string()));
        }
        content
    }
}

impl FeedFormatter for RssFormatter {
    fn create_item_content(&self, item: &Item) -> Result<ContentNode> {
        let title = non_blank(item.title.as_deref());
        let description = non_blank(item.description.as_deref());
        if title.is_none() && description.is_none() {
            return Err(FeedError::argument("RSS Item requires a title or a description"));
        }

        let mut content = ContentNode::new(elements::ITEM);
        if let Some(title) = title {
            content.add_field(ContentNode::with_value(elements::TITLE, title));
        }

        let mut has_guid_link = false;
        for link in &item.links {
            has_guid_link |= link.relationship_type.as_deref() == Some(rel::GUID);
            content.add_field(self.create_link_content(link)?);
        }

        if let Some(description) = description {
            content.add_field(ContentNode::with_value(elements::DESCRIPTION, description));
        }
        for person in &item.contributors {
            content.add_field(self.create_person_content(person)?);
        }
        for category in &item.categories {
            content.add_field(self.create_category_content(category)?);
        }

        if !has_guid_link {
            if let Some(id) = non_blank(item.id.as_deref()) {
                content.add_field(
                    ContentNode::with_value(elements::GUID, id)
                        .attribute(Attribute::new(attributes::IS_PERMA_LINK, "false")),
                );
            }
        }

        if let Some(published) = &item.published {
            content.add_field(ContentNode::with_value(elements::PUB_DATE, to_rfc1123(published)));
        }

        Ok(content)
    }

    fn create_link_content(&self, link: &Link) -> Result<ContentNode> {
        match link.relationship_type.as_deref() {
            Some(elements::ENCLOSURE) => self.create_enclosure_content(link),
            Some(elements::COMMENTS) => {
                Ok(ContentNode::with_value(elements::COMMENTS, link.uri.as_str()))
            }
            Some(elements::SOURCE) => Ok(self.create_source_content(link)),
            _ => Ok(self.create_generic_link_content(link)),
        }
    }

    fn create_person_content(&self, person: &Person) -> Result<ContentNode> {
        let email = non_blank(person.email.as_deref())
            .ok_or_else(|| FeedError::argument("Invalid person Email"))?;
        let value = match non_blank(person.name.as_deref()) {
            Some(name) => format!("{email} ({name})"),
            None => email.to_string(),
        };
        let name = non_blank(person.relationship_type.as_deref()).unwrap_or(elements::AUTHOR);
        Ok(ContentNode::with_value(name, value))
    }

    fn create_category_content(&self, category: &Category) -> Result<ContentNode> {
        let name = non_blank(category.name.as_deref())
            .ok_or_else(|| FeedError::argument("Invalid category name"))?;
        let mut content = ContentNode::with_value(elements::CATEGORY, name);
        if let Some(scheme) = &category.scheme {
            content.add_attribute(Attribute::new(attributes::DOMAIN, scheme.as_str()));
        }
        Ok(content)
    }

    fn create_image_content(&self, image: &Image) -> Result<ContentNode> {
        let title = non_blank(image.title.as_deref())
            .ok_or_else(|| FeedError::argument("Image requires a title"))?;
        let link = image
            .link
            .as_ref()
            .ok_or_else(|| FeedError::argument("Image requires a link"))?;

        let mut content = ContentNode::new(elements::IMAGE)
            .field(ContentNode::with_value(elements::URL, image.url.as_str()))
            .field(ContentNode::with_value(elements::TITLE, title))
            .field(self.create_link_content(link)?);
        if let Some(description) = non_blank(image.description.as_deref()) {
            content.add_field(ContentNode::with_value(elements::DESCRIPTION, description));
        }
        Ok(content)
    }

    fn write_content(&self, content: &ContentNode, sink: &mut dyn XmlSink) -> Result<()> {
        write_node(content, sink, self.use_cdata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Uri;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn uri(text: &str) -> Uri {
        Uri::parse(text).expect("valid uri")
    }

    #[test]
    fn test_item_requires_title_or_description() {
        let err = RssFormatter::new()
            .create_item_content(&Item::default())
            .unwrap_err();
        assert!(matches!(err, FeedError::Argument(_)));
        assert_eq!(err.to_string(), "RSS Item requires a title or a description");
    }

    #[test]
    fn test_item_emission_order() {
        let item = Item {
            id: Some("tag-1".into()),
            title: Some("Title".into()),
            description: Some("Body".into()),
            published: Some(
                DateTime::parse_from_rfc3339("2017-07-06T20:25:00+00:00").expect("date"),
            ),
            links: vec![Link::new(uri("http://example.com/1"))],
            categories: vec![Category::new("news")],
            contributors: vec![Person::default().with_email("a@b.com")],
            ..Item::default()
        };
        let xml = RssFormatter::new().format_value(&item).expect("formats");
        assert_eq!(
            xml,
            "<item><title>Title</title><link>http://example.com/1</link>\
             <description>Body</description><author>a@b.com</author>\
             <category>news</category><guid isPermaLink=\"false\">tag-1</guid>\
             <pubDate>Thu, 06 Jul 2017 20:25:00 GMT</pubDate></item>"
        );
    }

    #[test]
    fn test_guid_link_suppresses_synthesized_guid() {
        let item = Item {
            id: Some("http://example.com/p/1".into()),
            title: Some("t".into()),
            links: vec![Link::with_relationship(uri("http://example.com/p/1"), rel::GUID)],
            ..Item::default()
        };
        let xml = RssFormatter::new().format_value(&item).expect("formats");
        assert_eq!(
            xml,
            "<item><title>t</title><guid>http://example.com/p/1</guid></item>"
        );
    }

    #[test]
    fn test_enclosure_validation() {
        let formatter = RssFormatter::new();
        let mut link = Link::with_relationship(uri("http://example.com/a.mp3"), rel::ENCLOSURE);

        let err = formatter.create_link_content(&link).unwrap_err();
        assert_eq!(err.to_string(), "Enclosure requires length attribute");

        link.length = 12_216_320;
        let err = formatter.create_link_content(&link).unwrap_err();
        assert_eq!(err.to_string(), "Enclosure requires a MediaType");

        link.media_type = Some("audio/mpeg".into());
        let xml = formatter.format_value(&link).expect("formats");
        assert_eq!(
            xml,
            r#"<enclosure url="http://example.com/a.mp3" length="12216320" type="audio/mpeg"/>"#
        );
    }

    #[test]
    fn test_link_shapes() {
        let formatter = RssFormatter::new();

        let comments = Link::with_relationship(uri("http://example.com/c"), rel::COMMENTS);
        assert_eq!(
            formatter.format_value(&comments).expect("comments"),
            "<comments>http://example.com/c</comments>"
        );

        let mut source = Link::with_relationship(uri("http://example.com/feed"), rel::SOURCE);
        source.title = Some("Example".into());
        assert_eq!(
            formatter.format_value(&source).expect("source"),
            r#"<source url="http://example.com/feed">Example</source>"#
        );

        let mut titled = Link::new(uri("http://example.com/"));
        titled.title = Some("Home".into());
        titled.media_type = Some("text/html".into());
        titled.length = 123;
        assert_eq!(
            formatter.format_value(&titled).expect("link"),
            r#"<link url="http://example.com/" type="text/html" length="123">Home</link>"#
        );

        let custom = Link::with_relationship(uri("http://example.com/x"), "related");
        assert_eq!(
            formatter.format_value(&custom).expect("custom"),
            "<related>http://example.com/x</related>"
        );
    }

    #[test]
    fn test_person() {
        let formatter = RssFormatter::new();
        let person = Person::new("John Doe")
            .with_email("a@b.com")
            .with_relationship(rel::MANAGING_EDITOR);
        assert_eq!(
            formatter.format_value(&person).expect("formats"),
            "<managingEditor>a@b.com (John Doe)</managingEditor>"
        );

        let err = formatter.create_person_content(&Person::new("No Email")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid person Email");
    }

    #[test]
    fn test_category() {
        let formatter = RssFormatter::new();
        let mut category = Category::new("news");
        category.scheme = Some("http://example.com/tags".into());
        assert_eq!(
            formatter.format_value(&category).expect("formats"),
            r#"<category domain="http://example.com/tags">news</category>"#
        );
        let err = formatter.create_category_content(&Category::default()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid category name");
    }

    #[test]
    fn test_image() {
        let formatter = RssFormatter::new();
        let mut image = Image::new(uri("http://example.com/logo.png"));

        let err = formatter.create_image_content(&image).unwrap_err();
        assert_eq!(err.to_string(), "Image requires a title");

        image.title = Some("Logo".into());
        let err = formatter.create_image_content(&image).unwrap_err();
        assert_eq!(err.to_string(), "Image requires a link");

        image.link = Some(Link::new(uri("http://example.com/")));
        assert_eq!(
            formatter.format_value(&image).expect("formats"),
            "<image><url>http://example.com/logo.png</url><title>Logo</title>\
             <link>http://example.com/</link></image>"
        );
    }

    #[test]
    fn test_cdata() {
        let formatter = RssFormatter::new().with_cdata(true);
        let item = Item {
            title: Some("<h1>HTML Title</h1>".into()),
            ..Item::default()
        };
        assert_eq!(
            formatter.format_value(&item).expect("formats"),
            "<item><title><![CDATA[<h1>HTML Title</h1>]]></title></item>"
        );
    }

    #[test]
    fn test_format_does_not_leak_between_calls() {
        let formatter = RssFormatter::new();
        let first = formatter.format(&ContentNode::with_value("a", "1")).expect("first");
        let second = formatter.format(&ContentNode::with_value("b", "2")).expect("second");
        assert_eq!(first, "<a>1</a>");
        assert_eq!(second, "<b>2</b>");
    }
}
