use crate::{
    contest::scrape_contest,
    discovery::list_contest_result_urls,
    error::Result,
    fetch::Fetch,
    model::{Level, PipelineOutput},
    tasks::join_in_order,
};
use derive_builder::Builder;
use std::ops::Range;
use tracing::info;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://usaco.org/";

#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct UsacoScraper {
    #[builder(default = "default_base_url()")]
    base_url: Url,
    /// Positions in the contest list to scrape. The whole list at once is
    /// more than the site can take.
    #[builder(default = "3..10")]
    contests: Range<usize>,
    #[builder(default = "vec![Level::Silver]")]
    levels: Vec<Level>,
}

impl UsacoScraper {
    /// Scrapes every selected contest concurrently. The output keeps the
    /// order of the contest list.
    pub async fn scrape<F>(&self, fetch: F) -> Result<PipelineOutput>
    where
        F: Fetch + Clone + 'static,
    {
        let links = list_contest_result_urls(&fetch, &self.base_url)
            .await?
            .into_iter()
            .skip(self.contests.start)
            .take(self.contests.len())
            .collect::<Vec<_>>();
        info!(contests = links.len(), "got links");

        join_in_order(links.into_iter().map(|url| {
            let fetch = fetch.clone();
            let base_url = self.base_url.clone();
            let levels = self.levels.clone();
            async move { scrape_contest(&fetch, &base_url, &levels, url).await }
        }))
        .await
    }
}

impl UsacoScraperBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(contests) = &self.contests {
            if contests.start > contests.end {
                return Err(format!("empty contest range {contests:?}"));
            }
        }
        if matches!(&self.levels, Some(levels) if levels.is_empty()) {
            return Err("at least one level is required".to_string());
        }
        Ok(())
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base url is valid")
}
