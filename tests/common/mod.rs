//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness. Enable with
/// `RUST_LOG=syndfeed=trace`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
pub const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

pub const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Lorem ipsum feed</title>
    <link>http://example.com/</link>
    <description>This is a constantly updating lorem ipsum feed</description>
    <managingEditor>editor@example.com (John Smith)</managingEditor>
    <category domain="http://example.com/cats">news</category>
    <image>
      <url>http://example.com/logo.png</url>
      <title>Logo</title>
      <link>http://example.com/</link>
    </image>
    <generator>RSS for Node</generator>
    <!-- build info -->
    <lastBuildDate>Thu, 06 Jul 2017 20:25:17 GMT</lastBuildDate>
    <item>
      <title>First</title>
      <link>http://example.com/test/1</link>
      <guid isPermaLink="false">1</guid>
      <description><![CDATA[<p>One</p>]]></description>
      <content:encoded><![CDATA[<p>Full text</p>]]></content:encoded>
      <author>john@example.com (John Smith)</author>
      <pubDate>Thu, 06 Jul 2017 20:25:00 GMT</pubDate>
      <enclosure url="http://example.com/a.mp3" length="12216320" type="audio/mpeg"/>
    </item>
    <item>
      <title>Second</title>
      <link>http://example.com/test/2</link>
      <guid>http://example.com/test/2</guid>
      <pubDate>Thu, 06 Jul 2017 20:24:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

pub const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
  <title type="text">Example Feed</title>
  <subtitle type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml">A <em>lot</em> of effort</div></subtitle>
  <link href="http://example.org/"/>
  <link rel="self" href="http://example.org/feed.atom"/>
  <updated>2003-12-13T18:30:02Z</updated>
  <author><name>John Doe</name></author>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <category term="sports"/>
  <logo>http://example.org/logo.png</logo>
  <icon>/favicon.ico</icon>
  <media:thumbnail url="http://example.org/thumb.png"/>
  <entry>
    <title>Atom-Powered Robots Run Amok</title>
    <link href="http://example.org/2003/12/13/atom03"/>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2003-12-13T18:30:02Z</updated>
    <summary>Some text.</summary>
    <author><name>John Doe</name></author>
  </entry>
  <entry>
    <title>Second</title>
    <id>urn:2</id>
    <updated>2003-12-14T18:30:02+01:00</updated>
    <content type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml"><p>Hello</p></div></content>
    <author><name>Jane</name></author>
  </entry>
</feed>"#;
