//! Seek portal collector
//!
//! Seek tags its markup with `data-automation` attributes, which are far
//! more stable across redesigns than class names.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jobscout_common::types::JobRecord;
use reqwest::header::USER_AGENT;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

use super::{select_text, BROWSER_USER_AGENT, PAGE_DELAY_MS};
use crate::producer::Producer;

/// Production base URL for Seek Australia.
pub const SEEK_BASE_URL: &str = "https://www.seek.com.au";

/// Source label stamped on every Seek record.
pub const SEEK_SOURCE: &str = "Seek";

/// Collector for Seek search result pages.
pub struct SeekCrawler {
    client: reqwest::Client,
    base_url: String,
    query: String,
    location: String,
}

impl SeekCrawler {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self::with_base_url(SEEK_BASE_URL, query, location)
    }

    /// Point the collector at a different host. Used by tests to target a
    /// mock server.
    pub fn with_base_url(
        base_url: impl Into<String>,
        query: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query: query.into(),
            location: location.into(),
        }
    }

    fn page_url(&self, page: u32) -> String {
        format!(
            "{}/jobs?keywords={}&where={}&page={}",
            self.base_url,
            urlencoding::encode(&self.query),
            urlencoding::encode(&self.location),
            page
        )
    }

    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        debug!(url = %url, "fetching Seek page");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .with_context(|| format!("Seek request for page {page} failed"))?;

        if !response.status().is_success() {
            anyhow::bail!("Seek returned {} for page {}", response.status(), page);
        }

        response
            .text()
            .await
            .context("Failed to read Seek response body")
    }
}

#[async_trait]
impl Producer for SeekCrawler {
    async fn produce(&self, max_pages: u32) -> Result<Vec<JobRecord>> {
        let mut jobs = Vec::new();

        for page in 1..=max_pages {
            let html = self.fetch_page(page).await?;
            let listings = parse_seek_html(&html, &self.base_url)?;

            if listings.is_empty() {
                debug!(page, "no Seek listings on page, stopping pagination");
                break;
            }

            debug!(page, listings = listings.len(), "Seek page parsed");
            jobs.extend(listings);

            if page < max_pages {
                tokio::time::sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
            }
        }

        Ok(jobs)
    }
}

/// Parse one Seek search result page into job records.
///
/// Separate from the crawler for testability with static HTML. A listing
/// without a title is skipped; any other absent field is simply omitted
/// from the record and filled downstream by schema enforcement.
fn parse_seek_html(html: &str, base_url: &str) -> Result<Vec<JobRecord>> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("article[data-automation='normalJob']")
        .map_err(|e| anyhow::anyhow!("invalid card selector: {e:?}"))?;
    let title_sel = Selector::parse("a[data-automation='jobTitle']")
        .map_err(|e| anyhow::anyhow!("invalid title selector: {e:?}"))?;
    let company_sel = Selector::parse("a[data-automation='jobCompany']")
        .map_err(|e| anyhow::anyhow!("invalid company selector: {e:?}"))?;
    let location_sel = Selector::parse("span[data-automation='jobLocation']")
        .map_err(|e| anyhow::anyhow!("invalid location selector: {e:?}"))?;
    let salary_sel = Selector::parse("span[data-automation='jobSalary']")
        .map_err(|e| anyhow::anyhow!("invalid salary selector: {e:?}"))?;
    let description_sel = Selector::parse("span[data-automation='jobShortDescription']")
        .map_err(|e| anyhow::anyhow!("invalid description selector: {e:?}"))?;
    let work_type_sel = Selector::parse("span[data-automation='jobWorkType']")
        .map_err(|e| anyhow::anyhow!("invalid work-type selector: {e:?}"))?;

    let mut records = Vec::new();

    for card in document.select(&card_sel) {
        let title_el = match card.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };
        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let mut record = JobRecord::new();
        record.set("source", SEEK_SOURCE);
        record.set("title", title);

        if let Some(company) = select_text(&card, &company_sel) {
            record.set("company", company);
        }
        if let Some(location) = select_text(&card, &location_sel) {
            record.set("location", location);
        }
        if let Some(salary) = select_text(&card, &salary_sel) {
            record.set("salary", salary);
        }
        if let Some(description) = select_text(&card, &description_sel) {
            record.set("description", description);
        }
        if let Some(href) = title_el.value().attr("href") {
            record.set("job_url", absolute_url(base_url, href));
        }
        if let Some(work_type) = select_text(&card, &work_type_sel) {
            record.set("work_type", work_type);
        }

        records.push(record);
    }

    debug!(count = records.len(), "Seek listings parsed");
    Ok(records)
}

fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}
