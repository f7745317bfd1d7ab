//! Forecast and place documents as served by the upstream flood API.

use crate::error::{OutlookError, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A 5-day flood forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDocument {
    pub issued_at: DateTime<Utc>,
    pub risk_areas: Vec<RiskArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskArea {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    pub risk_area_blocks: Vec<RiskAreaBlock>,
}

/// A set of polygons sharing the same risk levels over the same days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAreaBlock {
    /// Forecast days (1-5) this block applies to
    pub days: Vec<u8>,
    /// Source code -> `[impact, likelihood]`
    pub risk_levels: IndexMap<String, (u8, u8)>,
    pub polys: Vec<Polygon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub poly_type: Option<String>,
    /// Rings of `[lon, lat]` points
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

/// The place a user is looking at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// `[min_lon, min_lat, max_lon, max_lat]`, buffered by 2km upstream
    pub bbox2k: [f64; 4],
}

/// Axis-aligned lon/lat box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn from_array(bbox: [f64; 4]) -> Self {
        BoundingBox {
            min_lon: bbox[0],
            min_lat: bbox[1],
            max_lon: bbox[2],
            max_lat: bbox[3],
        }
    }

    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
            && self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
    }
}

impl ForecastDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every impact and likelihood in the document is 1-4.
    pub fn validate(&self) -> Result<()> {
        for block in self.risk_areas.iter().flat_map(|area| &area.risk_area_blocks) {
            for (code, &(impact, likelihood)) in &block.risk_levels {
                check_range("impact", impact, code)?;
                check_range("likelihood", likelihood, code)?;
            }
        }
        Ok(())
    }

    /// Issue date on the server's calendar.
    pub fn issued_local_date(&self) -> NaiveDate {
        self.issued_at.with_timezone(&Local).date_naive()
    }
}

impl Polygon {
    /// Bounding box of every ring, or `None` for a polygon with no points.
    pub fn envelope(&self) -> Option<BoundingBox> {
        let mut points = self.coordinates.iter().flatten();
        let first = points.next()?;
        let start = BoundingBox::from_array([first[0], first[1], first[0], first[1]]);
        Some(points.fold(start, |bbox, [lon, lat]| BoundingBox {
            min_lon: bbox.min_lon.min(*lon),
            min_lat: bbox.min_lat.min(*lat),
            max_lon: bbox.max_lon.max(*lon),
            max_lat: bbox.max_lat.max(*lat),
        }))
    }
}

impl Place {
    /// Parse a place descriptor, rejecting inverted bounding boxes.
    pub fn from_json(json: &str) -> Result<Self> {
        let place: Place = serde_json::from_str(json)?;
        let [min_lon, min_lat, max_lon, max_lat] = place.bbox2k;
        if min_lon > max_lon || min_lat > max_lat {
            return Err(OutlookError::InvalidBoundingBox(place.name));
        }
        Ok(place)
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_array(self.bbox2k)
    }
}

pub(crate) fn check_range(field: &'static str, value: u8, code: &str) -> Result<()> {
    if (1..=4).contains(&value) {
        Ok(())
    } else {
        Err(OutlookError::InvalidRiskValue {
            field,
            value,
            source_code: code.to_string(),
        })
    }
}

/// Upstream ids are sometimes numbers and sometimes strings.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid id: {other}"))),
    }
}

fn optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!("invalid id: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST: &str = r#"{
        "issued_at": "2026-10-19T10:30:00Z",
        "risk_areas": [
            {
                "id": 7,
                "risk_area_blocks": [
                    {
                        "days": [1, 2],
                        "risk_levels": { "river": [3, 2], "surface": [1, 1] },
                        "polys": [
                            {
                                "id": 101,
                                "poly_type": "inland",
                                "coordinates": [[[-2.3, 51.9], [-2.0, 51.9], [-2.0, 52.1]]]
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_forecast() {
        let doc = ForecastDocument::from_json(FORECAST).unwrap();
        assert_eq!(doc.risk_areas.len(), 1);
        assert_eq!(doc.risk_areas[0].id.as_deref(), Some("7"));
        let block = &doc.risk_areas[0].risk_area_blocks[0];
        assert_eq!(block.days, vec![1, 2]);
        assert_eq!(block.risk_levels.get("river"), Some(&(3, 2)));
        // document order is kept
        let codes: Vec<&str> = block.risk_levels.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["river", "surface"]);
        assert_eq!(block.polys[0].id, "101");
    }

    #[test]
    fn test_missing_risk_areas_is_an_error() {
        let result = ForecastDocument::from_json(r#"{ "issued_at": "2026-10-19T10:30:00Z" }"#);
        assert!(matches!(result, Err(OutlookError::Json(_))));
    }

    #[test]
    fn test_non_numeric_risk_level_is_an_error() {
        let json = FORECAST.replace("[3, 2]", r#"["high", 2]"#);
        assert!(matches!(ForecastDocument::from_json(&json), Err(OutlookError::Json(_))));
    }

    #[test]
    fn test_validate_accepts_levels_in_range() {
        let doc = ForecastDocument::from_json(FORECAST).unwrap();
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_levels() {
        let json = FORECAST.replace("[1, 1]", "[1, 0]");
        let doc = ForecastDocument::from_json(&json).unwrap();
        assert!(matches!(
            doc.validate(),
            Err(OutlookError::InvalidRiskValue { field: "likelihood", value: 0, ref source_code })
                if source_code == "surface"
        ));
    }

    #[test]
    fn test_polygon_envelope() {
        let doc = ForecastDocument::from_json(FORECAST).unwrap();
        let envelope = doc.risk_areas[0].risk_area_blocks[0].polys[0]
            .envelope()
            .unwrap();
        assert_eq!(envelope, BoundingBox::from_array([-2.3, 51.9, -2.0, 52.1]));
    }

    #[test]
    fn test_empty_polygon_has_no_envelope() {
        let poly = Polygon {
            id: "1".to_string(),
            poly_type: None,
            coordinates: vec![vec![]],
        };
        assert!(poly.envelope().is_none());
    }

    #[test]
    fn test_bbox_overlap() {
        let place = BoundingBox::from_array([-2.2, 51.95, -2.1, 52.0]);
        assert!(place.overlaps(&BoundingBox::from_array([-2.3, 51.9, -2.0, 52.1])));
        assert!(place.overlaps(&BoundingBox::from_array([-2.1, 52.0, -1.9, 52.2])));
        assert!(!place.overlaps(&BoundingBox::from_array([0.5, 50.5, 1.0, 51.0])));
    }

    #[test]
    fn test_place_rejects_inverted_bbox() {
        let json = r#"{ "name": "Nowhere", "bbox2k": [1.0, 52.0, 0.0, 53.0] }"#;
        assert!(matches!(
            Place::from_json(json),
            Err(OutlookError::InvalidBoundingBox(name)) if name == "Nowhere"
        ));
    }
}
