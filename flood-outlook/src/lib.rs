//! Flood outlook tabs for a place.
//!
//! A 5-day flood forecast is a list of risk areas, each made of blocks of
//! polygons sharing per-source (impact, likelihood) pairs over some days.
//! This crate narrows a forecast to the polygons touching a place, classifies
//! each source into a 1-4 risk level, and folds the result into the three
//! outlook tabs shown on a location page.
//!
//! # Usage
//!
//! ```rust
//! use flood_outlook::{forecast::{ForecastDocument, Place}, outlook_for_place};
//!
//! let forecast = ForecastDocument::from_json(r#"{
//!     "issued_at": "2026-10-19T12:00:00Z",
//!     "risk_areas": [{ "risk_area_blocks": [{
//!         "days": [1],
//!         "risk_levels": { "river": [3, 3] },
//!         "polys": [{ "id": 1, "coordinates": [[[-2.3, 51.9], [-2.0, 52.1]]] }]
//!     }]}]
//! }"#).unwrap();
//! let place = Place::from_json(r#"{ "name": "Tewkesbury", "bbox2k": [-2.2, 51.95, -2.1, 52.0] }"#).unwrap();
//!
//! let today = forecast.issued_local_date();
//! let tabs = outlook_for_place(&forecast, &place, today).unwrap();
//! assert_eq!(tabs.daily_risk[0], "Medium");
//! assert!(!tabs.low_for_five);
//! ```

pub mod cache;
#[cfg(feature = "api")]
pub mod client;
pub mod error;
pub mod export;
pub mod forecast;
pub mod messages;
pub mod record;
pub mod risk;
pub mod selector;
pub mod source;
pub mod tabs;

use chrono::NaiveDate;
use forecast::{ForecastDocument, Place};
use selector::{records_for_place, EnvelopeSelector};
use tabs::OutlookTabs;

/// Select, classify and aggregate a forecast for one place.
///
/// `today` is the server's current calendar date.
pub fn outlook_for_place(
    forecast: &ForecastDocument,
    place: &Place,
    today: NaiveDate,
) -> error::Result<OutlookTabs> {
    let records = records_for_place(forecast, place, &EnvelopeSelector)?;
    Ok(OutlookTabs::build(
        &records,
        forecast.issued_local_date(),
        today,
    ))
}
