use crate::{error::Result, fetch::Fetch, markup::Page};
use tracing::info;
use url::Url;

pub const CONTESTS_PAGE: &str = "index.php?page=contests";

/// Results pages of every contest listed on the site, newest first.
pub async fn list_contest_result_urls<F: Fetch + ?Sized>(
    fetch: &F,
    base_url: &Url,
) -> Result<Vec<Url>> {
    info!("getting links");
    let html = fetch.fetch_text(&base_url.join(CONTESTS_PAGE)?).await?;
    result_links(&html, base_url)
}

fn result_links(html: &str, base_url: &Url) -> Result<Vec<Url>> {
    let page = Page::parse(html);
    let links = page
        .anchors()?
        .into_iter()
        .filter(|href| href.ends_with("results"))
        .map(|href| base_url.join(href))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(links)
}
