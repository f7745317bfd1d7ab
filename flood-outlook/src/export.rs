//! CSV view of the daily outlook, one row per displayed day.

use crate::error::Result;
use crate::tabs::OutlookTabs;
use std::io::Write;

pub const CSV_HEADERS: [&str; 4] = ["day", "risk", "risk_level", "trend"];

/// Write the displayed days of `tabs` as CSV with a header row.
pub fn write_daily_outlook<W: Write>(tabs: &OutlookTabs, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for day in tabs.display_days() {
        wtr.write_record([
            day.name,
            day.risk,
            day.risk_level.to_string().as_str(),
            day.trend.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the daily outlook CSV into a string.
pub fn daily_outlook_csv(tabs: &OutlookTabs) -> Result<String> {
    let mut buffer = Vec::new();
    write_daily_outlook(tabs, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
