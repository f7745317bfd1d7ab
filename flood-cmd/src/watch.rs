//! Scheduled forecast refresh with a shared cache.

use crate::load::load_place;
use chrono::Local;
use flood_outlook::cache::{ForecastCache, MemoryCache};
use flood_outlook::client::ForecastClient;
use flood_outlook::forecast::Place;
use flood_outlook::outlook_for_place;
use flood_utils::dates::format_issued;
use log::{info, warn};
use std::time::Duration;

/// Log a one-line summary of the outlook from whatever forecast is cached.
pub fn summarise<C: ForecastCache>(cache: &C, place: &Place) -> anyhow::Result<Option<String>> {
    let Some(forecast) = cache.get() else {
        return Ok(None);
    };
    let tabs = outlook_for_place(&forecast, place, Local::now().date_naive())?;
    let days = tabs
        .display_days()
        .iter()
        .map(|day| format!("{}: {}", day.name, day.risk))
        .collect::<Vec<_>>()
        .join("; ");
    Ok(Some(format!(
        "{} (updated {}): {}; outlook max {}",
        place.name,
        format_issued(&forecast.issued_at.with_timezone(&Local)),
        days,
        tabs.daily_risk_outlook_max_text
    )))
}

/// Refresh the cached forecast every `interval_secs` seconds.
///
/// A failed refresh, or a forecast that cannot be summarised, is logged and
/// the previous forecast keeps being served.
pub async fn run_watch(
    url: &str,
    place_path: &str,
    interval_secs: u64,
    iterations: Option<u32>,
) -> anyhow::Result<()> {
    let place = load_place(place_path)?;
    let client = ForecastClient::new(url)?;
    let cache = MemoryCache::new();
    let mut completed = 0u32;

    loop {
        if let Err(e) = client.refresh(&cache).await {
            warn!("Forecast refresh failed, keeping cached copy: {}", e);
        }
        match summarise(&cache, &place) {
            Ok(Some(summary)) => info!("{}", summary),
            Ok(None) => warn!("No forecast cached yet for {}", place.name),
            Err(e) => warn!("Could not summarise forecast for {}: {}", place.name, e),
        }

        completed += 1;
        if iterations.is_some_and(|limit| completed >= limit) {
            break;
        }
        tokio::time::sleep(Duration::from_secs(interval_secs)).await;
    }
    Ok(())
}
