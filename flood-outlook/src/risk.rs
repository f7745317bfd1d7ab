//! Risk classification for flood forecast hazard sources.
//!
//! Each hazard source in a forecast block carries an (impact, likelihood)
//! pair on a 1-4 scale. The pair is combined into a single 1-4 risk level
//! through a fixed lookup matrix.

use serde::Serialize;

/// Risk lookup matrix indexed `[impact - 1][likelihood - 1]`.
pub const RISK_MATRIX: [[u8; 4]; 4] = [
    [1, 1, 1, 1],
    [1, 1, 2, 2],
    [2, 2, 3, 3],
    [2, 3, 3, 4],
];

/// Lowest risk level, used for days with nothing to report.
pub const MIN_RISK_LEVEL: u8 = 1;

/// Combine impact and likelihood (both 1-4) into a risk level (1-4).
///
/// Callers must pass values in range; forecast documents are checked at the
/// point where records are built.
pub fn classify(impact: u8, likelihood: u8) -> u8 {
    RISK_MATRIX[usize::from(impact - 1)][usize::from(likelihood - 1)]
}

/// True for combinations worth reporting. Impact 1 and the impact 2 /
/// likelihood 1 pair are dropped before aggregation.
pub fn is_reportable(impact: u8, likelihood: u8) -> bool {
    impact > 1 && !(impact == 2 && likelihood == 1)
}

/// Display text for a risk level. Unknown levels map to an empty string.
pub fn risk_level_text(level: u8) -> &'static str {
    match level {
        1 => "Very low",
        2 => "Low",
        3 => "Medium",
        4 => "High",
        _ => "",
    }
}

/// Day-over-day change in risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Trend {
    /// First displayed day, nothing to compare against.
    #[serde(rename = "")]
    None,
    #[serde(rename = "rises to")]
    Rises,
    #[serde(rename = "falls to")]
    Falls,
    #[serde(rename = "remains")]
    Remains,
}

impl Trend {
    pub fn between(previous: u8, current: u8) -> Trend {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Trend::Rises,
            std::cmp::Ordering::Less => Trend::Falls,
            std::cmp::Ordering::Equal => Trend::Remains,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::None => "",
            Trend::Rises => "rises to",
            Trend::Falls => "falls to",
            Trend::Remains => "remains",
        }
    }
}

/// Trend labels for a run of daily risk levels. The first entry is always
/// [`Trend::None`].
pub fn trends(daily_levels: &[u8]) -> Vec<Trend> {
    let mut result = Vec::with_capacity(daily_levels.len());
    if daily_levels.is_empty() {
        return result;
    }
    result.push(Trend::None);
    for window in daily_levels.windows(2) {
        result.push(Trend::between(window[0], window[1]));
    }
    result
}
