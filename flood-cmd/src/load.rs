//! Reading forecast and place documents from disk or the network.

use anyhow::Context;
use flood_outlook::client::ForecastClient;
use flood_outlook::forecast::{ForecastDocument, Place};
use log::info;

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load a forecast from an http(s) URL or a local JSON file.
pub async fn load_forecast(source: &str) -> anyhow::Result<ForecastDocument> {
    if is_url(source) {
        info!("Fetching forecast from {}", source);
        let client = ForecastClient::new(source)?;
        return Ok(client.fetch().await?);
    }
    let json = std::fs::read_to_string(source)
        .with_context(|| format!("Failed to read forecast file {source}"))?;
    ForecastDocument::from_json(&json)
        .with_context(|| format!("Failed to parse forecast file {source}"))
}

/// Load a place descriptor from a local JSON file.
pub fn load_place(path: &str) -> anyhow::Result<Place> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read place file {path}"))?;
    Place::from_json(&json).with_context(|| format!("Failed to parse place file {path}"))
}
