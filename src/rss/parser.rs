use super::{attributes, classify, elements};
use crate::config::FeedOptions;
use crate::content::ContentNode;
use crate::error::{FeedError, Result};
use crate::feed::{ElementType, FeedParser};
use crate::model::{rel, Category, FeedItem, Image, Item, Link, Person, Uri};
use crate::util::{non_blank, try_parse_date};
use crate::xml::QuickXmlSource;

/// Elements that [`RssParser::parse_link`] accepts besides `<link>`.
const LINK_ELEMENTS: [&str; 4] = [
    elements::LINK,
    elements::COMMENTS,
    elements::ENCLOSURE,
    elements::SOURCE,
];

/// Converts RSS content trees into domain objects.
///
/// Parsing is lenient for optional data: unparsable dates and lengths are
/// dropped with a debug log. Missing identifying data (a link's URL, a
/// person's email, an image URL, a category name) is an error.
#[derive(Debug, Clone)]
pub struct RssParser {
    max_depth: usize,
}

impl Default for RssParser {
    fn default() -> Self {
        Self {
            max_depth: FeedOptions::DEFAULT_MAX_DEPTH,
        }
    }
}

impl RssParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &FeedOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    /// Parses a standalone XML fragment into a content tree.
    pub fn parse_content(&self, xml: &str) -> Result<ContentNode> {
        let mut source = QuickXmlSource::from_str(xml);
        self.read_content(&mut source)
    }

    pub fn parse_item(&self, xml: &str) -> Result<Item> {
        let content = self.parse_content(xml)?;
        expect_type(&content, ElementType::Item, "Invalid Rss item")?;
        self.create_rss_item(&content)
    }

    pub fn parse_link(&self, xml: &str) -> Result<Link> {
        let content = self.parse_content(xml)?;
        if content.namespace.is_some() || !LINK_ELEMENTS.contains(&content.name.as_str()) {
            return Err(FeedError::format("Invalid Rss link"));
        }
        self.create_link(&content)
    }

    pub fn parse_person(&self, xml: &str) -> Result<Person> {
        let content = self.parse_content(xml)?;
        expect_type(&content, ElementType::Person, "Invalid Rss person")?;
        self.create_person(&content)
    }

    pub fn parse_category(&self, xml: &str) -> Result<Category> {
        let content = self.parse_content(xml)?;
        expect_type(&content, ElementType::Category, "Invalid Rss category")?;
        self.create_category(&content)
    }

    pub fn parse_image(&self, xml: &str) -> Result<Image> {
        let content = self.parse_content(xml)?;
        expect_type(&content, ElementType::Image, "Invalid Rss image")?;
        self.create_image(&content)
    }

    /// Builds an [`Item`] from an `<item>` tree.
    ///
    /// Only fields without a namespace are interpreted; extension elements
    /// are ignored here and stay available through
    /// [`read_content`](crate::rss::RssFeedReader::read_content).
    pub fn create_rss_item(&self, content: &ContentNode) -> Result<Item> {
        let mut item = Item::default();

        for field in content.fields.iter().filter(|f| f.namespace.is_none()) {
            match field.name.as_str() {
                elements::TITLE => item.title = field.value.clone(),
                elements::DESCRIPTION => item.description = field.value.clone(),
                elements::LINK
                | elements::COMMENTS
                | elements::ENCLOSURE
                | elements::SOURCE => item.links.push(self.create_link(field)?),
                elements::AUTHOR => item.contributors.push(self.create_person(field)?),
                elements::CATEGORY => item.categories.push(self.create_category(field)?),
                elements::GUID => {
                    item.id = field.value.clone();
                    if let Some(link) = guid_link(field) {
                        item.links.push(link);
                    }
                }
                elements::PUB_DATE => item.published = parse_date_field(field),
                _ => {}
            }
        }

        Ok(item)
    }
}

impl FeedParser for RssParser {
    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn create_item(&self, content: &ContentNode) -> Result<FeedItem> {
        self.create_rss_item(content).map(FeedItem::Item)
    }

    fn create_link(&self, content: &ContentNode) -> Result<Link> {
        let value = non_blank(content.value.as_deref());

        // <enclosure url="..."/> and <source url="...">Title</source> carry
        // the target in an attribute; <link> and <comments> in the text.
        let (uri, title) = match content.attribute_value(attributes::URL) {
            Some(url) => {
                let uri = Uri::parse(url).map_err(|_| FeedError::format("Invalid url attribute"))?;
                (uri, value.map(str::to_string))
            }
            None => {
                let uri = value
                    .and_then(|v| Uri::parse(v).ok())
                    .ok_or_else(|| FeedError::format("Invalid url"))?;
                (uri, None)
            }
        };

        let relationship_type = if content.name == elements::LINK {
            rel::ALTERNATE.to_string()
        } else {
            content.name.clone()
        };

        Ok(Link {
            title,
            relationship_type: Some(relationship_type),
            media_type: content.attribute_value(attributes::TYPE).map(str::to_string),
            length: parse_length(content),
            ..Link::new(uri)
        })
    }

    fn create_person(&self, content: &ContentNode) -> Result<Person> {
        let value = non_blank(content.value.as_deref())
            .ok_or_else(|| FeedError::format("Invalid Rss person"))?;
        let (email, name) = split_person(value)?;

        Ok(Person {
            name,
            email: Some(email),
            uri: None,
            relationship_type: Some(content.name.clone()),
        })
    }

    fn create_category(&self, content: &ContentNode) -> Result<Category> {
        let name = non_blank(content.value.as_deref())
            .ok_or_else(|| FeedError::format("Invalid Rss category name"))?;

        Ok(Category {
            name: Some(name.to_string()),
            scheme: content.attribute_value(attributes::DOMAIN).map(str::to_string),
            label: None,
        })
    }

    fn create_image(&self, content: &ContentNode) -> Result<Image> {
        let mut url = None;
        let mut image_link = None;
        let mut title = None;
        let mut description = None;

        for field in content.fields.iter().filter(|f| f.namespace.is_none()) {
            match field.name.as_str() {
                elements::URL => {
                    let value = non_blank(field.value.as_deref())
                        .ok_or_else(|| FeedError::format("Image url not found"))?;
                    url = Some(
                        Uri::parse(value).map_err(|_| FeedError::format("Invalid image url"))?,
                    );
                }
                elements::TITLE => title = field.value.clone(),
                elements::LINK => image_link = Some(self.create_link(field)?),
                elements::DESCRIPTION => description = field.value.clone(),
                _ => {}
            }
        }

        let url = url.ok_or_else(|| FeedError::format("Image url not found"))?;
        Ok(Image {
            url,
            title,
            link: image_link,
            description,
            relationship_type: Some(rel::IMAGE.to_string()),
        })
    }
}

fn expect_type(content: &ContentNode, expected: ElementType, message: &str) -> Result<()> {
    if classify(content.namespace.as_deref(), &content.name) == expected {
        Ok(())
    } else {
        Err(FeedError::format(message))
    }
}

/// A `<guid>` doubles as a permalink unless `isPermaLink` says otherwise.
fn guid_link(field: &ContentNode) -> Option<Link> {
    let is_perma_link = field
        .attribute_value(attributes::IS_PERMA_LINK)
        .map_or(true, |v| v.trim().eq_ignore_ascii_case("true"));
    if !is_perma_link {
        return None;
    }
    let uri = Uri::parse(field.value.as_deref()?).ok()?;
    Some(Link::with_relationship(uri, rel::GUID))
}

fn parse_date_field(field: &ContentNode) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    let value = field.value.as_deref()?;
    let date = try_parse_date(value);
    if date.is_none() {
        tracing::debug!(element = %field.name, value = %value, "Ignoring unparsable date");
    }
    date
}

fn parse_length(content: &ContentNode) -> u64 {
    let Some(value) = content.attribute_value(attributes::LENGTH) else {
        return 0;
    };
    value.trim().parse().unwrap_or_else(|_| {
        tracing::debug!(element = %content.name, value = %value, "Ignoring unparsable length");
        0
    })
}

/// Splits `email (Name)` into its parts. A value without parentheses is
/// taken as a bare email address.
fn split_person(value: &str) -> Result<(String, Option<String>)> {
    let value = value.trim();
    let Some(open) = value.find('(') else {
        return Ok((value.to_string(), None));
    };

    let invalid = || FeedError::format("Invalid Rss person");
    let close = value.find(')').filter(|&close| close > open).ok_or_else(invalid)?;
    let email = value[..open].trim();
    let name = value[open + 1..close].trim();
    if email.is_empty() || name.is_empty() {
        return Err(invalid());
    }

    Ok((email.to_string(), Some(name.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_item_all_fields() {
        let parser = RssParser::new();
        let item = parser
            .parse_item(
                r#"<item>
                    <title>Hello</title>
                    <link>https://example.com/hello</link>
                    <description>Body</description>
                    <author>a@b.com (John Doe)</author>
                    <category domain="https://example.com/tags">news</category>
                    <comments>https://example.com/hello#comments</comments>
                    <enclosure url="https://example.com/a.mp3" length="1024" type="audio/mpeg"/>
                    <guid>https://example.com/p/1</guid>
                    <pubDate>Sat, 07 Sep 2002 00:00:01 GMT</pubDate>
                </item>"#,
            )
            .expect("item parses");

        assert_eq!(item.title.as_deref(), Some("Hello"));
        assert_eq!(item.description.as_deref(), Some("Body"));
        assert_eq!(item.id.as_deref(), Some("https://example.com/p/1"));

        let published = item.published.expect("pubDate");
        assert_eq!((published.year(), published.month(), published.day()), (2002, 9, 7));
        assert_eq!(published.second(), 1);

        let rels: Vec<_> = item
            .links
            .iter()
            .map(|l| l.relationship_type.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(rels, vec!["alternate", "comments", "enclosure", "guid"]);

        let enclosure = &item.links[2];
        assert_eq!(enclosure.length, 1024);
        assert_eq!(enclosure.media_type.as_deref(), Some("audio/mpeg"));

        assert_eq!(item.contributors[0].email.as_deref(), Some("a@b.com"));
        assert_eq!(item.contributors[0].name.as_deref(), Some("John Doe"));
        assert_eq!(item.categories[0].scheme.as_deref(), Some("https://example.com/tags"));
    }

    #[test]
    fn test_guid_not_permalink() {
        let item = RssParser::new()
            .parse_item(r#"<item><guid isPermaLink="FALSE">tag-123</guid></item>"#)
            .expect("item parses");
        assert_eq!(item.id.as_deref(), Some("tag-123"));
        assert!(item.links.is_empty());
    }

    #[test]
    fn test_unparsable_pub_date_is_ignored() {
        let item = RssParser::new()
            .parse_item("<item><title>t</title><pubDate>yesterday</pubDate></item>")
            .expect("item parses");
        assert_eq!(item.published, None);
    }

    #[test]
    fn test_unparsable_length_is_zero() {
        let link = RssParser::new()
            .parse_link(r#"<enclosure url="https://example.com/a" length="big" type="a/b"/>"#)
            .expect("link parses");
        assert_eq!(link.length, 0);
    }

    #[test]
    fn test_link_requires_url() {
        let err = RssParser::new().parse_link("<link>   </link>").unwrap_err();
        assert_eq!(err.to_string(), "Invalid url");
        let err = RssParser::new()
            .parse_link(r#"<enclosure url="has space" length="1"/>"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid url attribute");
    }

    #[test]
    fn test_source_link_title() {
        let link = RssParser::new()
            .parse_link(r#"<source url="https://example.com/feed.xml">Example</source>"#)
            .expect("link parses");
        assert_eq!(link.title.as_deref(), Some("Example"));
        assert_eq!(link.relationship_type.as_deref(), Some("source"));
        assert_eq!(link.uri.as_str(), "https://example.com/feed.xml");
    }

    #[test]
    fn test_person_variants() {
        let parser = RssParser::new();
        let person = parser
            .parse_person("<managingEditor>editor@example.com</managingEditor>")
            .expect("bare email");
        assert_eq!(person.email.as_deref(), Some("editor@example.com"));
        assert_eq!(person.name, None);
        assert_eq!(person.relationship_type.as_deref(), Some("managingEditor"));

        let person = parser
            .parse_person("<author>a@b.com (John) (x)</author>")
            .expect("trailing text after the name");
        assert_eq!(person.email.as_deref(), Some("a@b.com"));
        assert_eq!(person.name.as_deref(), Some("John"));

        for bad in [
            "<author>a@b.com (John</author>",
            "<author>a@b.com )John(</author>",
            "<author>a@b.com )x(John)</author>",
            "<author>a@b.com ()</author>",
            "<author>(John)</author>",
            "<author> </author>",
        ] {
            let err = parser.parse_person(bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid Rss person", "input: {bad}");
        }
    }

    #[test]
    fn test_category_requires_name() {
        let err = RssParser::new().parse_category("<category/>").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Rss category name");
    }

    #[test]
    fn test_image() {
        let image = RssParser::new()
            .parse_image(
                "<image><url>https://example.com/logo.png</url><title>Logo</title>\
                 <link>https://example.com/</link><description>d</description></image>",
            )
            .expect("image parses");
        assert_eq!(image.url.as_str(), "https://example.com/logo.png");
        assert_eq!(image.title.as_deref(), Some("Logo"));
        assert_eq!(image.link.expect("link").uri.as_str(), "https://example.com/");
        assert_eq!(image.relationship_type.as_deref(), Some("image"));
    }

    #[test]
    fn test_image_url_errors() {
        let parser = RssParser::new();
        let err = parser.parse_image("<image><title>x</title></image>").unwrap_err();
        assert_eq!(err.to_string(), "Image url not found");
        let err = parser.parse_image("<image><url>a b</url></image>").unwrap_err();
        assert_eq!(err.to_string(), "Invalid image url");
    }

    #[test]
    fn test_parse_checks_element_name() {
        let parser = RssParser::new();
        assert_eq!(parser.parse_item("<entry/>").unwrap_err().to_string(), "Invalid Rss item");
        assert_eq!(parser.parse_link("<guid>x</guid>").unwrap_err().to_string(), "Invalid Rss link");
        assert_eq!(
            parser.parse_image("<logo>https://a.com/</logo>").unwrap_err().to_string(),
            "Invalid Rss image"
        );
    }

    #[test]
    fn test_split_person() {
        assert_eq!(
            split_person("a@b.com (John Doe)").expect("valid"),
            ("a@b.com".to_string(), Some("John Doe".to_string()))
        );
        assert_eq!(split_person("a@b.com").expect("valid"), ("a@b.com".to_string(), None));
    }
}
