use super::text_element;
use crate::article::Article;
use crate::util::{detail_url, page_url};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;
use url::Url;

/// Newest articles carried by the feed.
pub const RSS_ITEM_LIMIT: usize = 20;

const RFC2822: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Channel-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub site_url: Url,
    /// Image block title.
    pub brand: String,
    /// Logo file relative to the site root.
    pub logo: String,
}

impl Channel {
    pub fn traffy(site_url: Url) -> Self {
        Self {
            title: "TRAFFY Blog — Реклама в Telegram".to_string(),
            description: "Статьи о рекламе в Telegram, Mini Apps, Telegram Ads и маркетинге"
                .to_string(),
            site_url,
            brand: "TRAFFY".to_string(),
            logo: "photo_2025-12-11 14.39.43.jpeg".to_string(),
        }
    }
}

/// RSS 2.0 document for the first [`RSS_ITEM_LIMIT`] of `articles`.
///
/// `articles` is expected newest first, as the store keeps it. Items are
/// dated at noon Moscow time; articles with an unparseable date get no
/// `pubDate`.
pub fn build_rss(
    channel: &Channel,
    articles: &[Article],
    now: DateTime<FixedOffset>,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    let site = channel.site_url.as_str();

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("Failed to write XML declaration")?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
    writer
        .write_event(Event::Start(rss))
        .context("Failed to write rss element")?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .context("Failed to write channel element")?;

    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "link", site)?;
    text_element(&mut writer, "description", &channel.description)?;
    text_element(&mut writer, "language", "ru")?;
    text_element(&mut writer, "lastBuildDate", &now.format(RFC2822).to_string())?;

    let self_link = page_url(&channel.site_url, "rss.xml");
    let mut atom = BytesStart::new("atom:link");
    atom.push_attribute(("href", self_link.as_str()));
    atom.push_attribute(("rel", "self"));
    atom.push_attribute(("type", "application/rss+xml"));
    writer
        .write_event(Event::Empty(atom))
        .context("Failed to write atom:link element")?;

    writer
        .write_event(Event::Start(BytesStart::new("image")))
        .context("Failed to write image element")?;
    text_element(&mut writer, "url", page_url(&channel.site_url, &channel.logo).as_str())?;
    text_element(&mut writer, "title", &channel.brand)?;
    text_element(&mut writer, "link", site)?;
    writer
        .write_event(Event::End(BytesEnd::new("image")))
        .context("Failed to write image end")?;

    for article in articles.iter().take(RSS_ITEM_LIMIT) {
        let link = detail_url(&channel.site_url, &article.id);
        writer
            .write_event(Event::Start(BytesStart::new("item")))
            .context("Failed to write item element")?;
        text_element(&mut writer, "title", &article.title)?;
        text_element(&mut writer, "link", link.as_str())?;
        text_element(&mut writer, "description", &article.excerpt)?;
        if let Some(day) = article.calendar_date() {
            let published = day.format("%a, %d %b %Y 12:00:00 +0300").to_string();
            text_element(&mut writer, "pubDate", &published)?;
        } else {
            tracing::warn!(id = %article.id, date = %article.date, "Article date not parseable, omitting pubDate");
        }
        text_element(&mut writer, "guid", link.as_str())?;
        text_element(&mut writer, "category", &article.category)?;
        writer
            .write_event(Event::End(BytesEnd::new("item")))
            .context("Failed to write item end")?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .context("Failed to write channel end")?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .context("Failed to write rss end")?;

    let result = writer.into_inner().into_inner();
    String::from_utf8(result).context("Generated RSS contains invalid UTF-8")
}
