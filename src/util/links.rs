use thiserror::Error;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Why a card link was not handed to the system opener.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Invalid link: {0}")]
    Invalid(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Detail page every card links to.
pub const DETAIL_PAGE: &str = "article.html";

/// Relative detail link, `article.html?id=<id>`, as the blog grid uses it.
pub fn detail_href(id: &str) -> String {
    let encoded: String = byte_serialize(id.as_bytes()).collect();
    format!("{}?id={}", DETAIL_PAGE, encoded)
}

/// Absolute detail link under `site`.
pub fn detail_url(site: &Url, id: &str) -> Url {
    let mut url = page_url(site, DETAIL_PAGE);
    url.query_pairs_mut().clear().append_pair("id", id);
    url
}

/// `page` resolved against the site root.
///
/// A site URL without a trailing slash is treated as a directory, so
/// `https://example.com/blog` + `rss.xml` gives `https://example.com/blog/rss.xml`.
pub fn page_url(site: &Url, page: &str) -> Url {
    let mut base = site.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);
    base.join(page).unwrap_or(base)
}

/// Parse a link for `open::that`; only absolute http(s) URLs pass.
pub fn validate_link_for_open(link: &str) -> Result<Url, LinkError> {
    let url = Url::parse(link)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }
}
