//! HTTP client for the upstream flood forecast API.

use crate::cache::{store_validated, ForecastCache};
use crate::error::{OutlookError, Result};
use crate::forecast::ForecastDocument;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

const MAX_TRIES: u32 = 3;
const INITIAL_BACKOFF_MILLIS: u64 = 1000;
const TIMEOUT_SECS: u64 = 60;

/// Fetches the latest forecast document from a fixed URL.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    url: String,
}

impl ForecastClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(ForecastClient {
            client,
            url: url.into(),
        })
    }

    /// Fetch and parse the forecast, retrying with exponential backoff.
    ///
    /// A body that fails to parse is returned as an error straight away;
    /// only transport failures and bad statuses are retried.
    pub async fn fetch(&self) -> Result<ForecastDocument> {
        let mut sleep_millis = INITIAL_BACKOFF_MILLIS;

        for attempt in 1..=MAX_TRIES {
            match self.client.get(&self.url).send().await {
                Ok(response) => {
                    if response.status() != StatusCode::OK {
                        warn!(
                            "Attempt {}/{}: Bad response status for {}: {}",
                            attempt,
                            MAX_TRIES,
                            self.url,
                            response.status()
                        );
                    } else {
                        match response.text().await {
                            Ok(body) => return ForecastDocument::from_json(&body),
                            Err(e) => {
                                warn!(
                                    "Attempt {}/{}: Failed to read response body for {}: {}",
                                    attempt, MAX_TRIES, self.url, e
                                );
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: Request failed for {}: {}",
                        attempt, MAX_TRIES, self.url, e
                    );
                }
            }

            if attempt < MAX_TRIES {
                info!(
                    "Sleeping for {} milliseconds before retry for {}",
                    sleep_millis, self.url
                );
                tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
                sleep_millis *= 2;
            }
        }

        warn!("All attempts failed for {}", self.url);
        Err(OutlookError::UpstreamUnavailable {
            url: self.url.clone(),
            attempts: MAX_TRIES,
        })
    }

    /// Fetch the forecast and store it in `cache`.
    ///
    /// On failure, including a document with risk levels outside 1-4, the
    /// cache keeps whatever it held before.
    pub async fn refresh<C: ForecastCache>(&self, cache: &C) -> Result<ForecastDocument> {
        let document = self.fetch().await?;
        store_validated(cache, document.clone())?;
        info!(
            "Cached forecast issued {} ({} risk areas)",
            document.issued_at,
            document.risk_areas.len()
        );
        Ok(document)
    }
}
