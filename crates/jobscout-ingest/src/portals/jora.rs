//! Jora portal collector
//!
//! Jora aggregates listings from many boards and serves fully rendered
//! search result pages, which keeps extraction straightforward.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jobscout_common::types::JobRecord;
use reqwest::header::USER_AGENT;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

use super::{select_text, BROWSER_USER_AGENT, PAGE_DELAY_MS};
use crate::producer::Producer;

/// Production base URL for the Australian Jora site.
pub const JORA_BASE_URL: &str = "https://au.jora.com";

/// Source label stamped on every Jora record.
pub const JORA_SOURCE: &str = "Jora";

/// Collector for Jora search result pages.
pub struct JoraCrawler {
    client: reqwest::Client,
    base_url: String,
    query: String,
    location: String,
}

impl JoraCrawler {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self::with_base_url(JORA_BASE_URL, query, location)
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
            "{}/j?sp=search&q={}&l={}&p={}",
            self.base_url,
            urlencoding::encode(&self.query),
            urlencoding::encode(&self.location),
            page
        )
    }

    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        debug!(url = %url, "fetching Jora page");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .with_context(|| format!("Jora request for page {page} failed"))?;

        if !response.status().is_success() {
            anyhow::bail!("Jora returned {} for page {}", response.status(), page);
        }

        response
            .text()
            .await
            .context("Failed to read Jora response body")
    }
}

#[async_trait]
impl Producer for JoraCrawler {
    async fn produce(&self, max_pages: u32) -> Result<Vec<JobRecord>> {
        let mut jobs = Vec::new();

        for page in 1..=max_pages {
            let html = self.fetch_page(page).await?;
            let listings = parse_jora_html(&html, &self.base_url)?;

            if listings.is_empty() {
                debug!(page, "no Jora listings on page, stopping pagination");
                break;
            }

            debug!(page, listings = listings.len(), "Jora page parsed");
            jobs.extend(listings);

            if page < max_pages {
                tokio::time::sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
            }
        }

        Ok(jobs)
    }
}

/// Parse one Jora search result page into job records.
///
/// Separate from the crawler for testability with static HTML. A listing
/// without a title is skipped; any other absent field is simply omitted
/// from the record and filled downstream by schema enforcement.
fn parse_jora_html(html: &str, base_url: &str) -> Result<Vec<JobRecord>> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("div.job-card")
        .map_err(|e| anyhow::anyhow!("invalid card selector: {e:?}"))?;
    let title_sel = Selector::parse("h2.job-title")
        .map_err(|e| anyhow::anyhow!("invalid title selector: {e:?}"))?;
    let link_sel = Selector::parse("a.job-link")
        .map_err(|e| anyhow::anyhow!("invalid link selector: {e:?}"))?;
    let company_sel = Selector::parse("span.job-company")
        .map_err(|e| anyhow::anyhow!("invalid company selector: {e:?}"))?;
    let location_sel = Selector::parse("span.job-location")
        .map_err(|e| anyhow::anyhow!("invalid location selector: {e:?}"))?;
    let salary_sel = Selector::parse("div.job-salary")
        .map_err(|e| anyhow::anyhow!("invalid salary selector: {e:?}"))?;
    let abstract_sel = Selector::parse("div.job-abstract")
        .map_err(|e| anyhow::anyhow!("invalid abstract selector: {e:?}"))?;
    let listed_sel = Selector::parse("span.job-listed-date")
        .map_err(|e| anyhow::anyhow!("invalid listed-date selector: {e:?}"))?;

    let mut records = Vec::new();

    for card in document.select(&card_sel) {
        let title = match select_text(&card, &title_sel) {
            Some(title) => title,
            None => continue,
        };

        let mut record = JobRecord::new();
        record.set("source", JORA_SOURCE);
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
        if let Some(description) = select_text(&card, &abstract_sel) {
            record.set("description", description);
        }
        if let Some(href) = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            record.set("job_url", absolute_url(base_url, href));
        }
        if let Some(listed) = select_text(&card, &listed_sel) {
            record.set("listed_date", listed);
        }

        records.push(record);
    }

    debug!(count = records.len(), "Jora listings parsed");
    Ok(records)
}

fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}
