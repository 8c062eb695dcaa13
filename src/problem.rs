use crate::{
    archive::read_test_cases,
    error::{Error, Result},
    fetch::Fetch,
    markup::{attribute, find_within, text_of, Page},
    model::{Problem, TestCase},
};
use scraper::ElementRef;
use tracing::info;
use url::Url;

/// Links of one problem as listed in a contest's results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemBlock {
    pub name: String,
    pub statement: Url,
    pub test_data: Option<Url>,
    pub solution: Url,
}

impl ProblemBlock {
    /// Reads a problem block. Its first inner `div` only holds the problem
    /// number; the second one has the name in `<b>` followed by the links.
    pub fn from_element(block: ElementRef<'_>, base_url: &Url) -> Result<Self> {
        let divs = find_within(block, "div")?;
        let info = divs.get(1).copied().ok_or_else(|| {
            Error::parse(format!(
                "problem block has {} inner divs, expected at least 2",
                divs.len()
            ))
        })?;

        let name = find_within(info, "b")?
            .into_iter()
            .next()
            .map(|b| text_of(b).trim().to_string())
            .ok_or_else(|| Error::parse("problem block has no name"))?;

        let links = find_within(info, "a[href]")?
            .into_iter()
            .filter_map(|a| attribute(a, "href"))
            .map(|href| base_url.join(href))
            .collect::<Result<Vec<_>, _>>()?;

        let count = links.len();
        let mut links = links.into_iter();
        let (statement, test_data, solution) =
            match (links.next(), links.next(), links.next(), links.next()) {
                (Some(statement), Some(solution), None, None) => (statement, None, solution),
                (Some(statement), Some(test_data), Some(solution), None) => {
                    (statement, Some(test_data), solution)
                }
                _ => {
                    return Err(Error::parse(format!(
                        "problem `{name}` has {count} links, expected 2 or 3"
                    )))
                }
            };

        Ok(Self {
            name,
            statement,
            test_data,
            solution,
        })
    }
}

/// Fetches the statement, test data and solution of a problem at the same
/// time. The first failure cancels the other requests.
pub async fn assemble<F: Fetch + ?Sized>(fetch: &F, block: ProblemBlock) -> Result<Problem> {
    info!(name = %block.name, "getting problem");

    let (statement, test_cases, solution) = tokio::try_join!(
        fetch_statement(fetch, &block.statement),
        fetch_test_cases(fetch, block.test_data.as_ref()),
        fetch_solution(fetch, &block.solution),
    )?;

    Ok(Problem {
        name: block.name,
        statement,
        test_cases,
        solution,
    })
}

async fn fetch_statement<F: Fetch + ?Sized>(fetch: &F, url: &Url) -> Result<String> {
    let html = fetch.fetch_text(url).await?;
    parse_statement(&html)
}

async fn fetch_test_cases<F: Fetch + ?Sized>(
    fetch: &F,
    url: Option<&Url>,
) -> Result<Option<Vec<TestCase>>> {
    let Some(url) = url else {
        return Ok(None);
    };
    info!(%url, "getting test data");
    let bytes = fetch.fetch_bytes(url).await?;
    read_test_cases(&bytes).map(Some)
}

async fn fetch_solution<F: Fetch + ?Sized>(fetch: &F, url: &Url) -> Result<String> {
    let html = fetch.fetch_text(url).await?;
    Ok(Page::parse(&html).text())
}

fn parse_statement(html: &str) -> Result<String> {
    let page = Page::parse(html);
    let statement = page
        .by_id("probtext-text")?
        .ok_or_else(|| Error::parse("problem page has no #probtext-text"))?;
    Ok(text_of(statement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        archive::tests::build_zip,
        fetch::testing::{url, FixtureSite},
    };

    const THREE_LINKS: &str = r#"<div class="panel historypanel">
        <div class="trophy"><img src="current/images/trophy.png"></div>
        <div><b>Cow Operations </b><br>
            <a href="index.php?page=viewproblem2&amp;cpid=1303">View problem</a> |
            <a href="current/data/prob2_silver_feb23.zip">Test data</a> |
            <a href="current/data/sol_prob2_silver_feb23.html">Solution</a>
        </div>
    </div>"#;

    const TWO_LINKS: &str = r#"<div class="panel historypanel">
        <div class="trophy"></div>
        <div><b>Bakery</b><br>
            <a href="index.php?page=viewproblem2&amp;cpid=1302">View problem</a> |
            <a href="current/data/sol_prob1_silver_feb23.html">Solution</a>
        </div>
    </div>"#;

    fn block(html: &str) -> Result<ProblemBlock> {
        let page = Page::parse(html);
        let element = page.find_all("div.panel").unwrap()[0];
        ProblemBlock::from_element(element, &url(""))
    }

    fn statement_page(text: &str) -> String {
        format!(r#"<html><body><h2>Problem</h2><div id="probtext-text"><p>{text}</p></div></body></html>"#)
    }

    #[test]
    fn block_with_three_links_should_have_test_data() {
        let block = block(THREE_LINKS).unwrap();
        assert_eq!(
            block,
            ProblemBlock {
                name: "Cow Operations".to_string(),
                statement: url("index.php?page=viewproblem2&cpid=1303"),
                test_data: Some(url("current/data/prob2_silver_feb23.zip")),
                solution: url("current/data/sol_prob2_silver_feb23.html"),
            }
        );
    }

    #[test]
    fn block_with_two_links_should_have_no_test_data() {
        let block = block(TWO_LINKS).unwrap();
        assert_eq!(block.name, "Bakery");
        assert_eq!(block.test_data, None);
        assert_eq!(block.solution, url("current/data/sol_prob1_silver_feb23.html"));
    }

    #[test]
    fn block_without_inner_divs_should_fail() {
        let err = block(r#"<div class="panel"><div>1</div></div>"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn block_with_wrong_link_count_should_fail() {
        let err = block(
            r#"<div class="panel"><div></div><div><b>Lonely</b>
            <a href="index.php?page=viewproblem2&amp;cpid=1">View problem</a></div></div>"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(reason) if reason.contains("1 links")));
    }

    #[test]
    fn statement_should_come_from_probtext() {
        let text = parse_statement(&statement_page("Farmer John has N cows.")).unwrap();
        assert_eq!(text, "Farmer John has N cows.");

        let err = parse_statement("<html><body>Not found</body></html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn assemble_without_test_data_should_leave_it_absent() {
        let site = FixtureSite::default()
            .with_page(
                "index.php?page=viewproblem2&cpid=1302",
                statement_page("Bessie bakes."),
            )
            .with_page(
                "current/data/sol_prob1_silver_feb23.html",
                "<html><body><pre>binary search</pre></body></html>",
            );

        let problem = assemble(&site, block(TWO_LINKS).unwrap()).await.unwrap();
        assert_eq!(problem.name, "Bakery");
        assert_eq!(problem.statement, "Bessie bakes.");
        assert_eq!(problem.test_cases, None);
        assert_eq!(problem.solution, "binary search");
        assert_eq!(site.requests().len(), 2);
    }

    #[tokio::test]
    async fn assemble_with_empty_archive_should_have_empty_test_data() {
        let site = FixtureSite::default()
            .with_page(
                "index.php?page=viewproblem2&cpid=1303",
                statement_page("Operate on cows."),
            )
            .with_page("current/data/prob2_silver_feb23.zip", build_zip(&[]))
            .with_page("current/data/sol_prob2_silver_feb23.html", "prefix sums");

        let problem = assemble(&site, block(THREE_LINKS).unwrap()).await.unwrap();
        assert_eq!(problem.test_cases, Some(vec![]));
    }

    #[tokio::test]
    async fn assemble_should_fail_when_any_fetch_fails() {
        let site = FixtureSite::default()
            .with_page(
                "index.php?page=viewproblem2&cpid=1303",
                statement_page("Operate on cows."),
            )
            .with_page(
                "current/data/prob2_silver_feb23.zip",
                build_zip(&[("1.in", "1\n"), ("1.out", "2\n")]),
            );

        let err = assemble(&site, block(THREE_LINKS).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_network());
    }
}
