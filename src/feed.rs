//! RSS projection of the post catalogue.
//!
//! [`build_feed`] is a pure function from the channel configuration plus
//! the current blog list to an RSS 2.0 document string. Field order is
//! fixed and the output is indented, so two calls over the same catalogue
//! produce byte-identical documents.

use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::models::Blog;

/// Channel-level metadata for the feed.
///
/// Read-only, process-wide configuration. `lastBuildDate` is computed per
/// request from the catalogue and never written back here, so concurrent
/// feed requests can share one instance.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub copyright: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "Pressroom".to_string(),
            link: "https://blog.example.com".to_string(),
            description: "code, notes and everything else".to_string(),
            language: "en".to_string(),
            copyright: "Copyright 2025".to_string(),
        }
    }
}

impl FeedConfig {
    /// Load channel metadata from `PRESSROOM_FEED_*` environment
    /// variables, falling back to the defaults per field.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            title: std::env::var("PRESSROOM_FEED_TITLE").unwrap_or(defaults.title),
            link: std::env::var("PRESSROOM_FEED_LINK").unwrap_or(defaults.link),
            description: std::env::var("PRESSROOM_FEED_DESCRIPTION")
                .unwrap_or(defaults.description),
            language: std::env::var("PRESSROOM_FEED_LANGUAGE").unwrap_or(defaults.language),
            copyright: std::env::var("PRESSROOM_FEED_COPYRIGHT").unwrap_or(defaults.copyright),
        }
    }
}

/// Build the RSS document for the given catalogue.
///
/// Items appear in catalogue order. `lastBuildDate` is the maximum publish
/// date across the whole list; the listing makes no ordering promise about
/// dates, so the newest post can sit anywhere.
pub fn build_feed(config: &FeedConfig, blogs: &[Blog]) -> Result<String> {
    if blogs.is_empty() {
        return Err(Error::EmptyFeed);
    }

    // Publish dates are ISO calendar days, so the lexicographic maximum is
    // the most recent date.
    let last_build_date = blogs
        .iter()
        .map(|b| b.time.as_str())
        .max()
        .unwrap_or_default();

    let buf = render(config, last_build_date, blogs)?;
    // The writer escapes everything it emits, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn render(
    config: &FeedConfig,
    last_build_date: &str,
    blogs: &[Blog],
) -> std::result::Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &config.title)?;
    text_element(&mut writer, "link", &config.link)?;
    text_element(&mut writer, "description", &config.description)?;
    text_element(&mut writer, "language", &config.language)?;
    text_element(&mut writer, "copyright", &config.copyright)?;
    text_element(&mut writer, "lastBuildDate", last_build_date)?;

    for blog in blogs {
        let link = format!("blog/{}", blog.id);

        writer.write_event(Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &blog.title)?;
        text_element(&mut writer, "description", &blog.subtitle)?;
        text_element(&mut writer, "link", &link)?;
        text_element(&mut writer, "guid", &link)?;
        text_element(&mut writer, "pubDate", &blog.time)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(writer.into_inner())
}

fn text_element<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> std::result::Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(id: i64, title: &str, subtitle: &str, time: &str) -> Blog {
        Blog {
            id,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            time: time.to_string(),
            cover: String::new(),
            hits: 0,
            content_url: format!("https://cdn.example.com/{}.md", id),
        }
    }

    /// Index of `needle` in `haystack`, panicking with the needle name on a miss.
    fn index_of(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {:?} in feed:\n{}", needle, haystack))
    }

    #[test]
    fn empty_catalogue_produces_no_document() {
        let result = build_feed(&FeedConfig::default(), &[]);
        assert!(matches!(result, Err(Error::EmptyFeed)));
    }

    #[test]
    fn document_is_well_formed_rss() {
        let blogs = vec![blog(1, "A", "sa", "2024-01-01")];
        let xml = build_feed(&FeedConfig::default(), &blogs).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<channel>"));
        assert!(xml.trim_end().ends_with("</rss>"));
    }

    #[test]
    fn channel_fields_appear_in_fixed_order() {
        let blogs = vec![blog(1, "A", "sa", "2024-01-01")];
        let xml = build_feed(&FeedConfig::default(), &blogs).unwrap();

        let positions = [
            index_of(&xml, "<title>Pressroom</title>"),
            index_of(&xml, "<link>https://blog.example.com</link>"),
            index_of(&xml, "<description>code, notes and everything else</description>"),
            index_of(&xml, "<language>en</language>"),
            index_of(&xml, "<copyright>Copyright 2025</copyright>"),
            index_of(&xml, "<lastBuildDate>2024-01-01</lastBuildDate>"),
            index_of(&xml, "<item>"),
        ];
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn last_build_date_is_max_across_whole_list() {
        // Newest post deliberately not first: the date must come from an
        // explicit max, not from list position.
        let blogs = vec![
            blog(1, "A", "sa", "2024-01-01"),
            blog(2, "B", "sb", "2024-02-01"),
        ];
        let xml = build_feed(&FeedConfig::default(), &blogs).unwrap();

        assert!(xml.contains("<lastBuildDate>2024-02-01</lastBuildDate>"));
    }

    #[test]
    fn items_follow_catalogue_order_with_id_links() {
        let blogs = vec![
            blog(1, "A", "sa", "2024-01-01"),
            blog(2, "B", "sb", "2024-02-01"),
        ];
        let xml = build_feed(&FeedConfig::default(), &blogs).unwrap();

        let first = index_of(&xml, "<link>blog/1</link>");
        let second = index_of(&xml, "<link>blog/2</link>");
        assert!(first < second);
        assert!(xml.contains("<guid>blog/2</guid>"));
        assert!(xml.contains("<description>sb</description>"));
        assert!(xml.contains("<pubDate>2024-02-01</pubDate>"));
    }

    #[test]
    fn item_fields_appear_in_fixed_order() {
        let blogs = vec![blog(7, "Post", "sub", "2024-03-05")];
        let xml = build_feed(&FeedConfig::default(), &blogs).unwrap();

        let positions = [
            index_of(&xml, "<item>"),
            index_of(&xml, "<title>Post</title>"),
            index_of(&xml, "<description>sub</description>"),
            index_of(&xml, "<link>blog/7</link>"),
            index_of(&xml, "<guid>blog/7</guid>"),
            index_of(&xml, "<pubDate>2024-03-05</pubDate>"),
            index_of(&xml, "</item>"),
        ];
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn text_content_is_escaped() {
        let blogs = vec![blog(1, "Tips & <tricks>", "sa", "2024-01-01")];
        let xml = build_feed(&FeedConfig::default(), &blogs).unwrap();

        assert!(xml.contains("<title>Tips &amp; &lt;tricks&gt;</title>"));
    }

    #[test]
    fn output_is_deterministic() {
        let blogs = vec![
            blog(1, "A", "sa", "2024-01-01"),
            blog(2, "B", "sb", "2024-02-01"),
        ];
        let config = FeedConfig::default();

        let first = build_feed(&config, &blogs).unwrap();
        let second = build_feed(&config, &blogs).unwrap();
        assert_eq!(first, second);
    }
}
