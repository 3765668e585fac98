//! Integration tests for Atom writing: entry validation, text constructs
//! and writer → reader round trips.

mod common;

use chrono::{DateTime, FixedOffset};
use pretty_assertions::assert_eq;
use syndfeed::atom::{AtomFeedReader, AtomFeedWriter};
use syndfeed::feed::ElementType;
use syndfeed::model::rel;
use syndfeed::xml::QuickXmlSink;
use syndfeed::{Category, Entry, FeedError, FeedItem, FeedOptions, Image, Item, Link, Person, Uri};

use common::{init_tracing, MEDIA_NAMESPACE};

const HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?><feed xmlns="http://www.w3.org/2005/Atom">"#;

fn uri(text: &str) -> Uri {
    Uri::parse(text).unwrap()
}

fn date(text: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(text).unwrap()
}

fn finish(mut writer: AtomFeedWriter<QuickXmlSink<Vec<u8>>>) -> String {
    writer.flush().unwrap();
    String::from_utf8(writer.into_output()).unwrap()
}

fn read_entries(xml: &[u8]) -> anyhow::Result<Vec<Entry>> {
    let mut reader = AtomFeedReader::from_reader(xml);
    let mut entries = Vec::new();
    while reader.read()? {
        if reader.element_type() == ElementType::Item {
            entries.push(reader.read_entry()?);
        }
    }
    Ok(entries)
}

fn minimal_item() -> Item {
    Item {
        id: Some("urn:1".to_string()),
        title: Some("T".to_string()),
        last_updated: Some(date("2017-07-06T20:25:00Z")),
        links: vec![Link::new(uri("http://example.com/1"))],
        contributors: vec![Person::new("Jane")],
        ..Item::default()
    }
}

// ============================================================================
// Document shape
// ============================================================================

#[test]
fn test_write_minimal_entry() {
    init_tracing();
    let mut writer = AtomFeedWriter::from_writer(Vec::new());
    writer.write(&minimal_item()).unwrap();

    assert_eq!(
        finish(writer),
        format!(
            "{HEAD}<entry><id>urn:1</id><title>T</title>\
             <updated>2017-07-06T20:25:00Z</updated>\
             <link href=\"http://example.com/1\"/>\
             <author><name>Jane</name></author></entry></feed>"
        )
    );
}

#[test]
fn test_write_feed_metadata() {
    let mut writer = AtomFeedWriter::from_writer(Vec::new());
    writer.write_id("urn:feed").unwrap();
    writer.write_title("Example").unwrap();
    writer.write_updated(&date("2017-07-06T20:25:00+02:00")).unwrap();
    writer
        .write(&Person::new("John").with_email("john@example.com"))
        .unwrap();
    writer.write(&Category::new("tech")).unwrap();
    writer
        .write(&Image {
            relationship_type: Some(rel::LOGO.to_string()),
            ..Image::new(uri("http://example.com/logo.png"))
        })
        .unwrap();

    assert_eq!(
        finish(writer),
        format!(
            "{HEAD}<id>urn:feed</id><title>Example</title>\
             <updated>2017-07-06T20:25:00+02:00</updated>\
             <author><name>John</name><email>john@example.com</email></author>\
             <category term=\"tech\"/>\
             <logo>http://example.com/logo.png</logo></feed>"
        )
    );
}

#[test]
fn test_invalid_entries_are_rejected_before_output() {
    let mut writer = AtomFeedWriter::from_writer(Vec::new());

    let mut item = minimal_item();
    item.id = None;
    assert!(matches!(
        writer.write(&item).unwrap_err(),
        FeedError::MissingField("Id")
    ));

    let mut item = minimal_item();
    item.contributors.push(Person::new("Joe"));
    assert_eq!(
        writer.write(&item).unwrap_err().to_string(),
        "Only one author is allowed"
    );

    let mut item = minimal_item();
    item.contributors.clear();
    assert_eq!(writer.write(&item).unwrap_err().to_string(), "Author is required");

    let mut item = minimal_item();
    item.links.clear();
    assert_eq!(
        writer.write(&item).unwrap_err().to_string(),
        "Description or alternate link is required"
    );

    assert_eq!(
        finish(writer),
        r#"<?xml version="1.0" encoding="UTF-8"?><feed xmlns="http://www.w3.org/2005/Atom"/>"#
    );
}

#[test]
fn test_contributors_do_not_count_as_authors() {
    let mut item = minimal_item();
    item.contributors
        .push(Person::new("Helper").with_relationship(rel::CONTRIBUTOR));

    let mut writer = AtomFeedWriter::from_writer(Vec::new());
    writer.write(&item).unwrap();
    assert!(finish(writer).contains("<contributor><name>Helper</name></contributor>"));
}

#[test]
fn test_known_namespaces_from_options() {
    let mut options = FeedOptions::default();
    options
        .namespaces
        .insert("media".to_string(), MEDIA_NAMESPACE.to_string());

    let mut writer = AtomFeedWriter::from_writer_with_options(Vec::new(), &options);
    writer
        .write_content(
            &syndfeed::ContentNode::new("thumbnail")
                .namespace(MEDIA_NAMESPACE)
                .attribute(syndfeed::Attribute::new("url", "http://example.com/t.png")),
        )
        .unwrap();

    assert!(finish(writer).ends_with(
        r#"xmlns:media="http://search.yahoo.com/mrss/"><media:thumbnail url="http://example.com/t.png"/></feed>"#
    ));
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_entry_round_trip() -> anyhow::Result<()> {
    init_tracing();
    let mut source = Link::with_relationship(uri("http://origin.example.com/"), rel::SOURCE);
    source.title = Some("Origin".to_string());
    source.last_updated = Some(date("2017-07-01T00:00:00Z"));

    let original = Entry {
        item: Item {
            id: Some("urn:entry:1".to_string()),
            title: Some("Hello & welcome".to_string()),
            description: Some("<p>Hi <b>there</b></p>".to_string()),
            published: Some(date("2017-07-05T08:00:00+02:00")),
            last_updated: Some(date("2017-07-06T20:25:00Z")),
            links: vec![
                Link::with_relationship(uri("http://example.com/1"), rel::ALTERNATE),
                source,
            ],
            categories: vec![Category {
                scheme: Some("http://example.com/cats".to_string()),
                label: Some("Technology".to_string()),
                ..Category::new("tech")
            }],
            contributors: vec![Person {
                name: Some("Jane".to_string()),
                email: Some("jane@example.com".to_string()),
                uri: Some("http://example.com/jane".to_string()),
                relationship_type: Some(rel::AUTHOR.to_string()),
            }],
        },
        summary: Some("Short".to_string()),
        rights: Some("CC BY".to_string()),
        content_type: Some("xhtml".to_string()),
    };

    let mut writer = AtomFeedWriter::from_writer(Vec::new());
    writer.write_title("Example")?;
    writer.write(&original)?;
    writer.flush()?;
    let xml = writer.into_output();

    assert_eq!(read_entries(&xml)?, vec![original]);
    Ok(())
}

#[test]
fn test_content_link_round_trip() -> anyhow::Result<()> {
    let mut content = Link::with_relationship(uri("http://example.com/v.mp4"), rel::CONTENT);
    content.media_type = Some("video/mp4".to_string());

    let mut original = Entry {
        item: Item {
            links: vec![content],
            ..minimal_item()
        },
        content_type: Some("video/mp4".to_string()),
        ..Entry::default()
    };
    original.item.contributors[0].relationship_type = Some(rel::AUTHOR.to_string());

    let mut writer = AtomFeedWriter::from_writer(Vec::new());
    writer.write(&FeedItem::Entry(original.clone()))?;
    writer.flush()?;
    let xml = writer.into_output();

    let text = std::str::from_utf8(&xml)?;
    assert!(text.contains(r#"<content source="http://example.com/v.mp4" type="video/mp4"/>"#));
    assert_eq!(read_entries(&xml)?, vec![original]);
    Ok(())
}

#[test]
fn test_xml_content_round_trip() -> anyhow::Result<()> {
    let mut original = Entry {
        item: Item {
            description: Some("<data><value>1</value></data>".to_string()),
            ..minimal_item()
        },
        content_type: Some("application/xml".to_string()),
        ..Entry::default()
    };
    original.item.links[0].relationship_type = Some(rel::ALTERNATE.to_string());
    original.item.contributors[0].relationship_type = Some(rel::AUTHOR.to_string());

    let mut writer = AtomFeedWriter::from_writer(Vec::new());
    writer.write(&original)?;
    writer.flush()?;
    let xml = writer.into_output();

    let text = std::str::from_utf8(&xml)?;
    assert!(text.contains(
        r#"<content type="application/xml"><data><value>1</value></data></content>"#
    ));
    assert_eq!(read_entries(&xml)?, vec![original]);
    Ok(())
}
