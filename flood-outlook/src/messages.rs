//! Per-day message groups: which hazard sources share the same
//! risk/impact/likelihood combination on a given day.

use crate::record::RiskRecord;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Message id whose first source phrase is shown capitalised. This is a
/// content quirk of that one message, not a general rule.
pub const CAPITALISED_MESSAGE_ID: &str = "3-i4-l2";

/// Source phrases for one message.
///
/// A single source stays a one-element list; two or more are joined into
/// one sentence fragment. Consumers rely on the two shapes differing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Sources {
    List(Vec<String>),
    Joined(String),
}

impl Sources {
    /// `["a"]` for one phrase, `"a, b and c"` for several.
    pub fn from_phrases(mut phrases: Vec<String>) -> Self {
        if phrases.len() < 2 {
            return Sources::List(phrases);
        }
        let last = phrases.pop().unwrap_or_default();
        Sources::Joined(format!("{} and {}", phrases.join(", "), last))
    }
}

/// Message id -> sources for one forecast day, in first-seen order.
///
/// Equality compares the mapping, not the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DayMessageGroup(IndexMap<String, Sources>);

impl DayMessageGroup {
    pub fn get(&self, message_id: &str) -> Option<&Sources> {
        self.0.get(message_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn message_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Sources)> for DayMessageGroup {
    fn from_iter<I: IntoIterator<Item = (String, Sources)>>(iter: I) -> Self {
        DayMessageGroup(iter.into_iter().collect())
    }
}

/// Keep the first record seen for each source, preserving order.
///
/// Running this on its own output changes nothing.
pub fn unique_by_source<'a>(records: &[&'a RiskRecord]) -> Vec<&'a RiskRecord> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    records
        .iter()
        .copied()
        .filter(|record| seen.insert(record.source.code()))
        .collect()
}

/// Group records by message id, mapping each source to its display phrase.
///
/// Phrases are joined in the order the records arrive.
pub fn group_messages<'a, I>(records: I) -> DayMessageGroup
where
    I: IntoIterator<Item = &'a RiskRecord>,
{
    let mut grouped: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for record in records {
        let phrases = grouped.entry(record.message_id.as_str()).or_default();
        let phrase = record.source.phrase();
        if !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
    }

    grouped
        .into_iter()
        .map(|(message_id, phrases)| {
            let mut phrases: Vec<String> = phrases.into_iter().map(str::to_string).collect();
            if message_id == CAPITALISED_MESSAGE_ID {
                if let Some(first) = phrases.first_mut() {
                    *first = capitalise(first);
                }
            }
            (message_id.to_string(), Sources::from_phrases(phrases))
        })
        .collect()
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::HazardSource;

    fn record(source: HazardSource, impact: u8, likelihood: u8) -> RiskRecord {
        RiskRecord::new(1, source, impact, likelihood, "p")
    }

    #[test]
    fn test_single_source_is_a_list() {
        let records = [record(HazardSource::Coastal, 2, 2)];
        let group = group_messages(&records);
        assert_eq!(
            group.get("1-i2-l2"),
            Some(&Sources::List(vec!["high tides or large waves".to_string()]))
        );
    }

    #[test]
    fn test_two_sources_join_in_given_order() {
        let records = [
            record(HazardSource::River, 2, 3),
            record(HazardSource::Surface, 2, 3),
        ];
        let group = group_messages(&records);
        assert_eq!(
            group.get("2-i2-l3"),
            Some(&Sources::Joined(
                "overflowing rivers and runoff from rainfall or blocked drains".to_string()
            ))
        );
    }

    #[test]
    fn test_three_sources_use_commas() {
        let records = [
            record(HazardSource::Surface, 3, 3),
            record(HazardSource::River, 3, 3),
            record(HazardSource::Ground, 3, 3),
        ];
        let group = group_messages(&records);
        assert_eq!(
            group.get("3-i3-l3"),
            Some(&Sources::Joined(
                "runoff from rainfall or blocked drains, overflowing rivers and a high water table"
                    .to_string()
            ))
        );
    }

    // Intentional quirk: this one message capitalises its first phrase.
    #[test]
    fn test_capitalised_message_quirk() {
        let records = [
            record(HazardSource::Surface, 4, 2),
            record(HazardSource::River, 4, 2),
        ];
        let group = group_messages(&records);
        assert_eq!(
            group.get(CAPITALISED_MESSAGE_ID),
            Some(&Sources::Joined(
                "Runoff from rainfall or blocked drains and overflowing rivers".to_string()
            ))
        );
    }

    #[test]
    fn test_capitalised_message_quirk_single_source() {
        let records = [record(HazardSource::Coastal, 4, 2)];
        let group = group_messages(&records);
        assert_eq!(
            group.get(CAPITALISED_MESSAGE_ID),
            Some(&Sources::List(vec!["High tides or large waves".to_string()]))
        );
    }

    #[test]
    fn test_other_messages_are_not_capitalised() {
        let records = [record(HazardSource::Surface, 4, 4)];
        let group = group_messages(&records);
        assert_eq!(
            group.get("4-i4-l4"),
            Some(&Sources::List(vec![
                "runoff from rainfall or blocked drains".to_string()
            ]))
        );
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let records = [
            record(HazardSource::River, 4, 4),
            record(HazardSource::Coastal, 2, 2),
        ];
        let group = group_messages(&records);
        let ids: Vec<&str> = group.message_ids().collect();
        assert_eq!(ids, vec!["4-i4-l4", "1-i2-l2"]);
    }

    #[test]
    fn test_group_equality_ignores_order() {
        let a: DayMessageGroup = [
            ("2-i2-l2".to_string(), Sources::List(vec!["a".to_string()])),
            ("3-i3-l3".to_string(), Sources::List(vec!["b".to_string()])),
        ]
        .into_iter()
        .collect();
        let b: DayMessageGroup = [
            ("3-i3-l3".to_string(), Sources::List(vec!["b".to_string()])),
            ("2-i2-l2".to_string(), Sources::List(vec!["a".to_string()])),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unique_by_source_keeps_first_and_is_idempotent() {
        let records = [
            record(HazardSource::River, 4, 4),
            record(HazardSource::River, 2, 2),
            record(HazardSource::Surface, 2, 2),
        ];
        let refs: Vec<&RiskRecord> = records.iter().collect();
        let unique = unique_by_source(&refs);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].message_id, "4-i4-l4");
        assert_eq!(unique[1].source, HazardSource::Surface);
        assert_eq!(unique_by_source(&unique), unique);
    }

    #[test]
    fn test_empty_day_gives_empty_group() {
        let group = group_messages(std::iter::empty::<&RiskRecord>());
        assert!(group.is_empty());
        assert_eq!(serde_json::to_string(&group).unwrap(), "{}");
    }

    #[test]
    fn test_serialized_shapes() {
        let records = [
            record(HazardSource::River, 2, 3),
            record(HazardSource::Surface, 2, 3),
            record(HazardSource::Coastal, 2, 2),
        ];
        let json = serde_json::to_string(&group_messages(&records)).unwrap();
        assert_eq!(
            json,
            r#"{"2-i2-l3":"overflowing rivers and runoff from rainfall or blocked drains","1-i2-l2":["high tides or large waves"]}"#
        );
    }
}
