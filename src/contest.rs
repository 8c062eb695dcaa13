use crate::{
    error::{Error, Result},
    fetch::Fetch,
    markup::{text_of, Node, Page},
    model::{ContestResult, Level},
    problem::{assemble, ProblemBlock},
    tasks::join_in_order,
};
use tracing::{debug, info, instrument};
use url::Url;

/// Scrapes the problems of the divisions in `levels` from one contest.
///
/// Older contests link their results page to a separate problems page; that
/// link is followed once.
#[instrument(skip_all, fields(url = %url))]
pub async fn scrape_contest<F>(
    fetch: &F,
    base_url: &Url,
    levels: &[Level],
    url: Url,
) -> Result<ContestResult>
where
    F: Fetch + Clone + 'static,
{
    info!("scraping contest");
    let mut html = fetch.fetch_text(&url).await?;
    if let Some(problems_url) = problems_page_link(&html, base_url)? {
        info!(url = %problems_url, "switching to problems page");
        html = fetch.fetch_text(&problems_url).await?;
    }

    let mut result = ContestResult::new();
    for (level, blocks) in parse_sections(&html, base_url, levels)? {
        info!(%level, problems = blocks.len(), "getting problems for level");
        let problems = join_in_order(blocks.into_iter().map(|block| {
            let fetch = fetch.clone();
            async move { assemble(&fetch, block).await }
        }))
        .await?;
        result.entry(level).or_default().extend(problems);
    }
    Ok(result)
}

fn problems_page_link(html: &str, base_url: &Url) -> Result<Option<Url>> {
    let page = Page::parse(html);
    let link = page
        .anchors()?
        .into_iter()
        .find(|href| href.ends_with("problems"));
    Ok(link.map(|href| base_url.join(href)).transpose()?)
}

/// Problem blocks of every kept division, in page order.
fn parse_sections(
    html: &str,
    base_url: &Url,
    levels: &[Level],
) -> Result<Vec<(Level, Vec<ProblemBlock>)>> {
    let page = Page::parse(html);
    let mut sections = vec![];

    // the first h2 is the page title
    for header in page.find_all("h2")?.into_iter().skip(1) {
        let title = text_of(header);
        let level = match section_level(&title)? {
            Some(level) if levels.contains(&level) => level,
            _ => {
                debug!(title = title.trim(), "skipping section");
                continue;
            }
        };

        let blocks = Node::siblings_after(header)
            .take_while(|node| !node.is_section_boundary())
            .filter_map(|node| node.as_problem_block())
            .map(|block| ProblemBlock::from_element(block, base_url))
            .collect::<Result<Vec<_>>>()?;
        sections.push((level, blocks));
    }
    Ok(sections)
}

/// `USACO 2023 February Contest, Silver` is a silver section. Unknown
/// division names give `None`.
fn section_level(title: &str) -> Result<Option<Level>> {
    let division = title.split(", ").nth(1).ok_or_else(|| {
        Error::parse(format!("section header `{}` names no division", title.trim()))
    })?;
    Ok(division.trim().to_lowercase().parse().ok())
}
