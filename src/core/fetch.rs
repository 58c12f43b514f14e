//! Catalog download.

use std::{thread, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use reqwest::{Url, blocking::Client, redirect::Policy};

use crate::core::{RawCatalog, parsers::tsv::parse_tsv};

const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("transject/", env!("CARGO_PKG_VERSION"));

/// Retry and timeout settings for downloading a catalog.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Total number of attempts, including the first one.
    pub attempts: u32,
    /// Delay before the second attempt. Later attempts wait proportionally longer.
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            attempts: 3,
            retry_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Download the catalog export at `url` and parse it.
pub fn fetch_catalog(url: &str, options: &FetchOptions, verbose: bool) -> Result<RawCatalog> {
    let content = fetch_text(url, options, verbose)?;
    parse_tsv(&content).with_context(|| format!("Failed to parse catalog from {}", url))
}

/// GET `url` and return the body, following redirects.
///
/// Transport errors and 5xx responses are retried; any other non-success
/// status fails immediately.
pub fn fetch_text(url: &str, options: &FetchOptions, verbose: bool) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid catalog URL: \"{}\"", url))?;
    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(USER_AGENT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
        .context("Failed to build HTTP client")?;

    let attempts = options.attempts.max(1);
    let mut attempt = 1;
    loop {
        let failure = match client.get(parsed.clone()).send() {
            Ok(response) if response.status().is_success() => {
                return response
                    .text()
                    .with_context(|| format!("Failed to read catalog from {}", url));
            }
            Ok(response) if response.status().is_server_error() => {
                anyhow!("HTTP {}", response.status())
            }
            Ok(response) => {
                bail!("Failed to fetch catalog from {}: HTTP {}", url, response.status())
            }
            Err(err) => anyhow!(err),
        };

        if attempt >= attempts {
            return Err(failure.context(format!(
                "Failed to fetch catalog from {} after {} attempt(s)",
                url, attempts
            )));
        }

        if verbose {
            eprintln!(
                "{} Fetching catalog failed ({}), retrying ({}/{})",
                "warning:".bold().yellow(),
                failure,
                attempt + 1,
                attempts
            );
        }
        thread::sleep(options.retry_delay * attempt);
        attempt += 1;
    }
}
