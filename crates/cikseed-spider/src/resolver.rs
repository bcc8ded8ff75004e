use crate::cik::is_valid_cik;
use crate::dom::{Document, NodeId};
use crate::error::ResolveError;
use crate::http::*;
use crate::seeds::SP500_CIKS;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, error, info, trace};

/// Wikipedia's list of S&P 500 constituents; the first table on the page carries a CIK column.
pub const CONSTITUENTS_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

lazy_static::lazy_static! {
    /// `CIK=0000320193` as found in EDGAR browse links.
    static ref CIK_PARAM: Regex =
        Regex::new(r"(?i)[?&]CIK=(\d{10})(?:[^0-9]|$)").expect("valid CIK_PARAM regex");
}

/// Anything that can produce an ordered list of candidate CIKs.
#[async_trait]
pub trait CikSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    async fn resolve(&self) -> Result<Vec<String>, ResolveError>;
}

// static
// ----------------------------------------------------------------------------

/// A fixed list of CIKs, returned as given: order kept, duplicates kept.
#[derive(Clone, Debug)]
pub struct StaticList {
    ciks: Vec<String>,
}

impl StaticList {
    pub fn new<I, S>(ciks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ciks: ciks.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in S&P 500 seed list.
    pub fn sp500() -> Self {
        Self::new(SP500_CIKS)
    }
}

#[async_trait]
impl CikSource for StaticList {
    fn name(&self) -> &str {
        "static list"
    }

    async fn resolve(&self) -> Result<Vec<String>, ResolveError> {
        Ok(self.ciks.clone())
    }
}

// scrape
// ----------------------------------------------------------------------------

/// How a single table cell is turned into a candidate CIK.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellExtraction {
    /// The run of digits the cell's text starts with, or else a `CIK=` parameter in a link
    /// inside the cell.
    #[default]
    Structured,

    /// Characters `[4, 14)` of the serialized cell, i.e. right after a bare `<td>`. Breaks as
    /// soon as the cell gains attributes or wrapping markup.
    Positional,
}

impl CellExtraction {
    /// The raw candidate found in `cell`, not yet validated.
    pub fn candidate(self, doc: &Document, cell: NodeId) -> Option<String> {
        match self {
            Self::Positional => {
                let rendered = doc.render(cell);
                if rendered.len() < 15 {
                    return None;
                }
                rendered.get(4..14).map(str::to_string)
            }
            Self::Structured => {
                // footnote markers and other trailing markup follow the digits
                let text = doc.text(cell);
                let leading: String = text
                    .trim_start()
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                if is_valid_cik(&leading) {
                    return Some(leading);
                }

                doc.descendants(cell)
                    .filter(|&id| doc.node(id).is_element("a"))
                    .filter_map(|id| doc.attr(id, "href"))
                    .find_map(|href| CIK_PARAM.captures(href).map(|caps| caps[1].to_string()))
            }
        }
    }
}

/// Valid CIKs from the cells of the first `table` in `doc`, in document order.
///
/// Returns `None` when the document has no table at all; a table without a single valid CIK
/// gives an empty list.
pub fn table_ciks(doc: &Document, extraction: CellExtraction) -> Option<Vec<String>> {
    let table = doc.find_first(doc.root(), "table")?;

    let mut ciks = Vec::new();
    for cell in doc.find_all(table, "td") {
        match extraction.candidate(doc, cell) {
            Some(candidate) if is_valid_cik(&candidate) => ciks.push(candidate),
            Some(candidate) => trace!("discarding cell candidate {candidate:?}"),
            None => {}
        }
    }
    Some(ciks)
}

/// Scrapes CIKs from the first table of an index constituents page.
#[derive(Clone, Debug)]
pub struct ConstituentScrape {
    client: HttpClient,
    url: String,
    extraction: CellExtraction,
}

impl ConstituentScrape {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            extraction: CellExtraction::default(),
        }
    }

    pub fn with_extraction(mut self, extraction: CellExtraction) -> Self {
        self.extraction = extraction;
        self
    }
}

#[async_trait]
impl CikSource for ConstituentScrape {
    fn name(&self) -> &str {
        "constituents scrape"
    }

    async fn resolve(&self) -> Result<Vec<String>, ResolveError> {
        let url = &self.url;
        let transport = |source: reqwest::Error| {
            error!("failed to fetch constituents page {url}, error({source})");
            ResolveError::Transport {
                url: url.clone(),
                source,
            }
        };

        debug!("fetching constituents page {url}");
        let body = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .bytes()
            .await
            .map_err(transport)?;

        let html = std::str::from_utf8(&body).map_err(|err| {
            error!("constituents page {url} is not valid UTF-8, error({err})");
            ResolveError::Parse {
                url: url.clone(),
                reason: err.to_string(),
            }
        })?;

        let doc = Document::parse(html);
        trace!("parsed {} nodes from {url}", doc.len());

        let ciks = table_ciks(&doc, self.extraction).ok_or_else(|| {
            error!("couldn't find any tables on {url}");
            ResolveError::NoTableFound { url: url.clone() }
        })?;
        info!("scraped {} CIKs from {url}", ciks.len());

        Ok(ciks)
    }
}

// plan
// ----------------------------------------------------------------------------

/// The sources to resolve, in order, and whether to drop repeated CIKs.
pub struct ResolutionPlan {
    sources: Vec<Box<dyn CikSource>>,
    dedupe: bool,
}

impl Default for ResolutionPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionPlan {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            dedupe: true,
        }
    }

    pub fn source(mut self, source: impl CikSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Keep every occurrence of a CIK; each one is then fetched and persisted separately.
    pub fn keep_duplicates(mut self) -> Self {
        self.dedupe = false;
        self
    }

    /// Concatenate every source's CIKs in plan order. Any source failing fails the plan.
    pub async fn resolve(&self) -> Result<Vec<String>, ResolveError> {
        let mut ciks = Vec::new();
        for source in &self.sources {
            let resolved = source.resolve().await?;
            debug!("{} resolved {} CIKs", source.name(), resolved.len());
            ciks.extend(resolved);
        }

        if self.dedupe {
            let before = ciks.len();
            let mut seen = HashSet::with_capacity(before);
            ciks.retain(|cik| seen.insert(cik.clone()));
            if ciks.len() < before {
                debug!("dropped {} repeated CIKs", before - ciks.len());
            }
        }

        Ok(ciks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TABLES: &str = r#"
        <html><body>
          <p>S&amp;P 500 component stocks</p>
          <table class="wikitable" id="constituents">
            <tr><th>Symbol</th><th>Security</th><th>CIK</th></tr>
            <tr><td>MMM</td><td>3M</td><td>0000066740</td></tr>
            <tr><td>AOS</td><td>A. O. Smith</td><td>0000091142</td></tr>
          </table>
          <table id="changes">
            <tr><td>0000320193</td></tr>
          </table>
        </body></html>
    "#;

    fn ciks(html: &str, extraction: CellExtraction) -> Option<Vec<String>> {
        table_ciks(&Document::parse(html), extraction)
    }

    #[test]
    fn only_the_first_table_counts() {
        for extraction in [CellExtraction::Structured, CellExtraction::Positional] {
            assert_eq!(
                ciks(TWO_TABLES, extraction).unwrap(),
                ["0000066740", "0000091142"],
                "{extraction:?}"
            );
        }
    }

    #[test]
    fn missing_table() {
        assert!(ciks("<p>0000066740</p>", CellExtraction::Structured).is_none());
    }

    #[test]
    fn empty_table_is_not_an_error() {
        let found = ciks("<table><tr><td>MMM</td></tr></table>", CellExtraction::Structured);
        assert_eq!(found, Some(vec![]));
    }

    #[test]
    fn short_cells_are_skipped_silently() {
        // "<td>123</td>" renders to 12 characters
        let found = ciks(
            "<table><tr><td>123</td><td>0001800000</td></tr></table>",
            CellExtraction::Positional,
        );
        assert_eq!(found.unwrap(), ["0001800000"]);
    }

    #[test]
    fn positional_breaks_on_wrapped_cells() {
        let html = r#"<table><tr><td><a href="/wiki/3M">0000066740</a></td></tr></table>"#;
        assert_eq!(ciks(html, CellExtraction::Positional).unwrap(), Vec::<String>::new());
        assert_eq!(ciks(html, CellExtraction::Structured).unwrap(), ["0000066740"]);
    }

    #[test]
    fn structured_reads_edgar_links() {
        let html = r#"<table><tr><td>
            <a href="https://www.sec.gov/cgi-bin/browse-edgar?action=getcompany&amp;CIK=0000001800">filings</a>
        </td></tr></table>"#;
        assert_eq!(ciks(html, CellExtraction::Structured).unwrap(), ["0000001800"]);
    }

    #[test]
    fn footnoted_cells_keep_their_cik() {
        let html = r##"<table><tr>
            <td>0000066740<sup><a href="#cite_note-1">[1]</a></sup></td>
            <td>0000091142 (2017)</td>
            <td>000009114212</td>
        </tr></table>"##;
        assert_eq!(
            ciks(html, CellExtraction::Structured).unwrap(),
            ["0000066740", "0000091142"]
        );
        assert_eq!(
            ciks(html, CellExtraction::Positional).unwrap(),
            ["0000066740", "0000091142", "0000091142"]
        );
    }

    #[test]
    fn invalid_candidates_are_dropped() {
        let html = "<table><tr><td>000006674X</td><td>66740</td><td> 0000002488 </td></tr></table>";
        assert_eq!(ciks(html, CellExtraction::Structured).unwrap(), ["0000002488"]);
    }

    #[tokio::test]
    async fn static_list_keeps_order_and_duplicates() {
        let list = StaticList::new(["0000000002", "0000000001", "0000000002"]);
        assert_eq!(
            list.resolve().await.unwrap(),
            ["0000000002", "0000000001", "0000000002"]
        );
    }

    #[tokio::test]
    async fn plan_concatenates_and_dedupes() {
        let plan = ResolutionPlan::new()
            .source(StaticList::new(["0000000001", "0000000002"]))
            .source(StaticList::new(["0000000002", "0000000003"]));
        assert_eq!(
            plan.resolve().await.unwrap(),
            ["0000000001", "0000000002", "0000000003"]
        );
    }

    #[tokio::test]
    async fn plan_can_keep_duplicates() {
        let plan = ResolutionPlan::new()
            .source(StaticList::new(["0000000001"]))
            .source(StaticList::new(["0000000001"]))
            .keep_duplicates();
        assert_eq!(plan.resolve().await.unwrap(), ["0000000001", "0000000001"]);
    }

    #[test]
    fn sp500_seed_list_is_canonical() {
        assert!(SP500_CIKS.iter().all(|cik| is_valid_cik(cik)));
    }
}
