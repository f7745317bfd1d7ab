//! Picking the forecast polygons that touch a place and turning their
//! blocks into risk records.

use crate::error::Result;
use crate::forecast::{check_range, ForecastDocument, Place, Polygon};
use crate::record::RiskRecord;
use crate::risk::is_reportable;
use crate::source::HazardSource;
use log::debug;

/// Decides whether a forecast polygon applies to a place.
pub trait PolygonSelector {
    fn intersects(&self, polygon: &Polygon, place: &Place) -> bool;
}

/// Selects polygons whose bounding envelope overlaps the place's `bbox2k`.
///
/// This is a coarse test; a selector backed by a geometry library can be
/// swapped in through [`PolygonSelector`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeSelector;

impl PolygonSelector for EnvelopeSelector {
    fn intersects(&self, polygon: &Polygon, place: &Place) -> bool {
        polygon
            .envelope()
            .is_some_and(|envelope| envelope.overlaps(&place.bbox()))
    }
}

/// Collect reportable risk records for every polygon the selector matches.
///
/// Impact and likelihood must be 1-4; anything else is rejected here so the
/// classifier only ever sees valid pairs.
pub fn records_for_place<S: PolygonSelector>(
    document: &ForecastDocument,
    place: &Place,
    selector: &S,
) -> Result<Vec<RiskRecord>> {
    let mut records = Vec::new();
    for area in &document.risk_areas {
        for block in &area.risk_area_blocks {
            for polygon in &block.polys {
                if !selector.intersects(polygon, place) {
                    continue;
                }
                for &day in &block.days {
                    for (code, &(impact, likelihood)) in &block.risk_levels {
                        check_range("impact", impact, code)?;
                        check_range("likelihood", likelihood, code)?;
                        if !is_reportable(impact, likelihood) {
                            continue;
                        }
                        records.push(RiskRecord::new(
                            day,
                            HazardSource::from(code.as_str()),
                            impact,
                            likelihood,
                            polygon.id.clone(),
                        ));
                    }
                }
            }
        }
    }
    debug!("{} risk records for {}", records.len(), place.name);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutlookError;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    use crate::forecast::{RiskArea, RiskAreaBlock};

    fn polygon(id: &str, bbox: [f64; 4]) -> Polygon {
        let [min_lon, min_lat, max_lon, max_lat] = bbox;
        Polygon {
            id: id.to_string(),
            poly_type: Some("inland".to_string()),
            coordinates: vec![vec![
                [min_lon, min_lat],
                [max_lon, min_lat],
                [max_lon, max_lat],
                [min_lon, max_lat],
            ]],
        }
    }

    fn document(blocks: Vec<RiskAreaBlock>) -> ForecastDocument {
        ForecastDocument {
            issued_at: Utc.with_ymd_and_hms(2026, 10, 19, 10, 30, 0).unwrap(),
            risk_areas: vec![RiskArea {
                id: None,
                risk_area_blocks: blocks,
            }],
        }
    }

    fn place() -> Place {
        Place {
            name: "Tewkesbury".to_string(),
            bbox2k: [-2.2, 51.95, -2.1, 52.0],
        }
    }

    fn levels(pairs: &[(&str, (u8, u8))]) -> IndexMap<String, (u8, u8)> {
        pairs.iter().map(|(code, pair)| (code.to_string(), *pair)).collect()
    }

    #[test]
    fn test_only_overlapping_polygons_are_selected() {
        let doc = document(vec![RiskAreaBlock {
            days: vec![1],
            risk_levels: levels(&[("river", (3, 2))]),
            polys: vec![
                polygon("near", [-2.3, 51.9, -2.0, 52.1]),
                polygon("far", [0.5, 50.5, 1.0, 51.0]),
            ],
        }]);
        let records = records_for_place(&doc, &place(), &EnvelopeSelector).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].poly_id, "near");
        assert_eq!(records[0].message_id, "2-i3-l2");
    }

    #[test]
    fn test_low_combinations_are_filtered_out() {
        let doc = document(vec![RiskAreaBlock {
            days: vec![1, 2],
            risk_levels: levels(&[
                ("river", (1, 4)),
                ("surface", (2, 1)),
                ("ground", (2, 2)),
            ]),
            polys: vec![polygon("p", [-2.3, 51.9, -2.0, 52.1])],
        }]);
        let records = records_for_place(&doc, &place(), &EnvelopeSelector).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.source == HazardSource::Ground));
        assert_eq!(records[0].day, 1);
        assert_eq!(records[1].day, 2);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let doc = document(vec![RiskAreaBlock {
            days: vec![1],
            risk_levels: levels(&[("coastal", (5, 2))]),
            polys: vec![polygon("p", [-2.3, 51.9, -2.0, 52.1])],
        }]);
        let result = records_for_place(&doc, &place(), &EnvelopeSelector);
        assert!(matches!(
            result,
            Err(OutlookError::InvalidRiskValue { field: "impact", value: 5, .. })
        ));
    }

    #[test]
    fn test_custom_selector() {
        struct Everywhere;
        impl PolygonSelector for Everywhere {
            fn intersects(&self, _polygon: &Polygon, _place: &Place) -> bool {
                true
            }
        }
        let doc = document(vec![RiskAreaBlock {
            days: vec![3],
            risk_levels: levels(&[("coastal", (4, 4))]),
            polys: vec![polygon("far", [0.5, 50.5, 1.0, 51.0])],
        }]);
        let records = records_for_place(&doc, &place(), &Everywhere).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].risk_level, 4);
    }
}
