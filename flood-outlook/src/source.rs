use serde::{Serialize, Serializer};
use std::fmt;

/// The kind of flooding a forecast block reports on.
///
/// Unknown source codes are carried through unchanged so that new upstream
/// categories still show up in the outlook rather than disappearing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HazardSource {
    River,
    Surface,
    Ground,
    Coastal,
    Other(String),
}

impl HazardSource {
    /// Source code as used in forecast documents.
    pub fn code(&self) -> &str {
        match self {
            HazardSource::River => "river",
            HazardSource::Surface => "surface",
            HazardSource::Ground => "ground",
            HazardSource::Coastal => "coastal",
            HazardSource::Other(code) => code.as_str(),
        }
    }

    /// Phrase completing "Flooding is possible from ...".
    pub fn phrase(&self) -> &str {
        match self {
            HazardSource::River => "overflowing rivers",
            HazardSource::Surface => "runoff from rainfall or blocked drains",
            HazardSource::Ground => "a high water table",
            HazardSource::Coastal => "high tides or large waves",
            HazardSource::Other(code) => code.as_str(),
        }
    }
}

impl From<&str> for HazardSource {
    fn from(code: &str) -> Self {
        match code {
            "river" => HazardSource::River,
            "surface" => HazardSource::Surface,
            "ground" => HazardSource::Ground,
            "coastal" => HazardSource::Coastal,
            other => HazardSource::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HazardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for HazardSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
