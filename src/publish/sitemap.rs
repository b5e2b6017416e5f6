use super::text_element;
use crate::article::Article;
use crate::util::{detail_url, page_url};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use url::Url;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

fn url_entry<W: Write>(
    writer: &mut Writer<W>,
    loc: &Url,
    lastmod: Option<&str>,
    changefreq: &str,
    priority: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("url")))
        .context("Failed to write url element")?;
    text_element(writer, "loc", loc.as_str())?;
    if let Some(lastmod) = lastmod {
        text_element(writer, "lastmod", lastmod)?;
    }
    text_element(writer, "changefreq", changefreq)?;
    text_element(writer, "priority", priority)?;
    writer
        .write_event(Event::End(BytesEnd::new("url")))
        .context("Failed to write url end")?;
    Ok(())
}

/// Sitemap with the site root, the blog page and every article.
pub fn build_sitemap(site_url: &Url, articles: &[Article], today: NaiveDate) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    let today = today.format("%Y-%m-%d").to_string();

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("Failed to write XML declaration")?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer
        .write_event(Event::Start(urlset))
        .context("Failed to write urlset element")?;

    url_entry(&mut writer, &page_url(site_url, ""), Some(&today), "weekly", "1.0")?;
    url_entry(
        &mut writer,
        &page_url(site_url, "blog.html"),
        Some(&today),
        "daily",
        "0.9",
    )?;

    for article in articles {
        let lastmod = article
            .calendar_date()
            .map(|day| day.format("%Y-%m-%d").to_string());
        url_entry(
            &mut writer,
            &detail_url(site_url, &article.id),
            lastmod.as_deref(),
            "monthly",
            "0.7",
        )?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .context("Failed to write urlset end")?;

    let result = writer.into_inner().into_inner();
    String::from_utf8(result).context("Generated sitemap contains invalid UTF-8")
}
