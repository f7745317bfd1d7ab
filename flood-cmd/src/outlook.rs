//! One-shot outlook computation for a place.

use crate::load::{load_forecast, load_place};
use crate::OutputFormat;
use chrono::{Local, NaiveDate};
use flood_outlook::export::daily_outlook_csv;
use flood_outlook::outlook_for_place;
use flood_outlook::tabs::OutlookTabs;
use flood_utils::dates::{format_issued, parse_date};
use log::info;

/// Render tabs in the requested format.
pub fn render(tabs: &OutlookTabs, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tabs)? + "\n"),
        OutputFormat::Csv => Ok(daily_outlook_csv(tabs)?),
    }
}

/// Compute the outlook tabs for `place_path` from `forecast_source` and write
/// them to `output` (stdout when `None`).
pub async fn run_outlook(
    forecast_source: &str,
    place_path: &str,
    today: Option<&str>,
    format: OutputFormat,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let today: NaiveDate = match today {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };
    let place = load_place(place_path)?;
    let forecast = load_forecast(forecast_source).await?;

    info!(
        "Forecast updated {}; computing outlook for {} on {}",
        format_issued(&forecast.issued_at.with_timezone(&Local)),
        place.name,
        today
    );

    let tabs = outlook_for_place(&forecast, &place, today)?;
    let rendered = render(&tabs, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Outlook written to {}", path);
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
