use crate::risk::classify;
use crate::source::HazardSource;
use serde::Serialize;
use std::cmp::Ordering;

/// One hazard source of one forecast block on one day, for a polygon that
/// touches the place being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskRecord {
    /// Forecast day, 1-5
    pub day: u8,
    pub source: HazardSource,
    pub impact: u8,
    pub likelihood: u8,
    pub risk_level: u8,
    /// `"{risk_level}-i{impact}-l{likelihood}"`
    pub message_id: String,
    /// Originating polygon, kept for tracing only
    pub poly_id: String,
}

impl RiskRecord {
    /// Build a record, classifying the (impact, likelihood) pair.
    pub fn new(
        day: u8,
        source: HazardSource,
        impact: u8,
        likelihood: u8,
        poly_id: impl Into<String>,
    ) -> Self {
        let risk_level = classify(impact, likelihood);
        RiskRecord {
            day,
            source,
            impact,
            likelihood,
            risk_level,
            message_id: message_id(risk_level, impact, likelihood),
            poly_id: poly_id.into(),
        }
    }

    /// Outlook ordering: day ascending, then message id descending, then
    /// source code descending. Ids compare as strings.
    pub fn outlook_cmp(&self, other: &Self) -> Ordering {
        self.day
            .cmp(&other.day)
            .then_with(|| other.message_id.cmp(&self.message_id))
            .then_with(|| other.source.code().cmp(self.source.code()))
    }
}

pub fn message_id(risk_level: u8, impact: u8, likelihood: u8) -> String {
    format!("{risk_level}-i{impact}-l{likelihood}")
}

/// Stable sort into outlook order.
pub fn sort_records(records: &mut [RiskRecord]) {
    records.sort_by(RiskRecord::outlook_cmp);
}
