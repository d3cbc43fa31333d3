use crate::http;
use crate::normalize::stripped_text;
use anyhow::Result;
use contentsync_model::{ProjectEntry, Scraped};
use scraper::{ElementRef, Html, Selector};

/// Fetch an itch.io profile page and extract one entry per game cell.
pub async fn fetch(client: &reqwest::Client, listing_url: &str) -> Result<Scraped<ProjectEntry>> {
    tracing::info!(url = %listing_url, "Fetching listing page");
    let html = http::fetch_text(client, listing_url).await?;
    tracing::info!(bytes = html.len(), "Received HTML");

    let scraped = parse_listing(&html);
    tracing::info!(
        projects = scraped.entries.len(),
        skipped = scraped.skipped,
        "Parsed listing cells"
    );
    Ok(scraped)
}

/// Why a listing cell produced no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Promotional or malformed cells carry no `.title` element.
    MissingTitle,
}

struct CellSelectors {
    cell: Selector,
    title: Selector,
    link: Selector,
    summary: Selector,
}

impl CellSelectors {
    fn new() -> Self {
        Self {
            cell: Selector::parse(".game_cell").expect("valid selector"),
            title: Selector::parse(".title").expect("valid selector"),
            link: Selector::parse("a").expect("valid selector"),
            summary: Selector::parse(".text").expect("valid selector"),
        }
    }
}

/// Parse a listing page into project entries, in document order.
pub fn parse_listing(html: &str) -> Scraped<ProjectEntry> {
    let document = Html::parse_document(html);
    let selectors = CellSelectors::new();
    let mut scraped = Scraped::default();

    for (index, cell) in document.select(&selectors.cell).enumerate() {
        match accept_cell(cell, &selectors) {
            Ok(entry) => scraped.entries.push(entry),
            Err(reason) => {
                tracing::debug!(cell = index, reason = ?reason, "Skipping listing cell");
                scraped.skipped += 1;
            }
        }
    }

    scraped
}

/// Cell policy: a cell becomes an entry only if it has a title element.
/// Link and summary are optional and default to empty strings.
fn accept_cell(cell: ElementRef, selectors: &CellSelectors) -> Result<ProjectEntry, SkipReason> {
    let title_el = cell
        .select(&selectors.title)
        .next()
        .ok_or(SkipReason::MissingTitle)?;

    let url = cell
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default()
        .to_string();

    let summary = cell
        .select(&selectors.summary)
        .next()
        .map(stripped_text)
        .unwrap_or_default();

    Ok(ProjectEntry {
        title: stripped_text(title_el),
        url,
        summary,
    })
}
