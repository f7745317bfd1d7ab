//! Outlook tabs: the 5-day flood forecast for one place, folded into the
//! three tabs shown on a location page.
//!
//! Tab 1 and tab 2 hold the first two displayed days. Tab 3 holds the rest
//! of the window; when the forecast was issued today, adjacent days in that
//! window with identical messages are merged into one entry and their day
//! names joined.

use crate::messages::{group_messages, unique_by_source, DayMessageGroup};
use crate::record::{sort_records, RiskRecord};
use crate::risk::{risk_level_text, trends, Trend, MIN_RISK_LEVEL};
use chrono::NaiveDate;
use flood_utils::dates::{day_names, IssueAge, FORECAST_DAYS};
use log::warn;
use serde::Serialize;

/// Per-day values the tabs are built from, before issue-age alignment.
#[derive(Debug, Clone, PartialEq)]
struct DailyOutlook {
    day_name: Vec<String>,
    daily_risk: Vec<String>,
    daily_risk_as_num: Vec<u8>,
    trend: Vec<Trend>,
    groups: Vec<DayMessageGroup>,
}

impl DailyOutlook {
    fn from_records(records: &[RiskRecord], issued: NaiveDate) -> Self {
        let mut sorted = records.to_vec();
        sort_records(&mut sorted);

        let mut daily_risk_as_num = vec![MIN_RISK_LEVEL; FORECAST_DAYS];
        let mut groups = Vec::with_capacity(FORECAST_DAYS);
        for (index, bucket) in bucket_by_day(&sorted).iter().enumerate() {
            // the highest sorted message sets the day's headline risk
            if let Some(first) = bucket.first() {
                daily_risk_as_num[index] = first.risk_level;
            }
            groups.push(group_messages(unique_by_source(bucket)));
        }

        DailyOutlook {
            day_name: day_names(issued),
            daily_risk: daily_risk_as_num
                .iter()
                .map(|level| risk_level_text(*level).to_string())
                .collect(),
            trend: trends(&daily_risk_as_num),
            daily_risk_as_num,
            groups,
        }
    }

    /// Drop the first `offset` days, which are already in the past.
    fn shift(&mut self, offset: usize) {
        if offset == 0 {
            return;
        }
        self.day_name.drain(..offset);
        self.daily_risk.drain(..offset);
        self.daily_risk_as_num.drain(..offset);
        self.trend.drain(..offset);
        self.groups.drain(..offset);
        // the first shown day has no shown predecessor
        if let Some(first) = self.trend.first_mut() {
            *first = Trend::None;
        }
    }

    /// Copy every per-day value from slot `from` into slot `to`.
    fn move_day(&mut self, from: usize, to: usize) {
        self.day_name[to] = self.day_name[from].clone();
        self.daily_risk[to] = self.daily_risk[from].clone();
        self.daily_risk_as_num[to] = self.daily_risk_as_num[from];
        self.trend[to] = self.trend[from];
    }
}

/// Records split into one bucket per forecast day. Days outside 1-5 are
/// dropped.
fn bucket_by_day(sorted: &[RiskRecord]) -> [Vec<&RiskRecord>; FORECAST_DAYS] {
    let mut buckets: [Vec<&RiskRecord>; FORECAST_DAYS] = Default::default();
    for record in sorted {
        let day = usize::from(record.day);
        if (1..=FORECAST_DAYS).contains(&day) {
            buckets[day - 1].push(record);
        }
    }
    buckets
}

/// Everything the location page needs to render its outlook tabs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlookTabs {
    pub day_name: Vec<String>,
    pub daily_risk: Vec<String>,
    pub daily_risk_as_num: Vec<u8>,
    pub trend: Vec<Trend>,
    pub tab1: DayMessageGroup,
    pub tab2: DayMessageGroup,
    pub tab3: Vec<DayMessageGroup>,
    /// Nothing to report in any tab
    pub low_for_five: bool,
    /// Highest risk over days 3-5
    pub daily_risk_outlook_max: u8,
    pub daily_risk_outlook_max_text: String,
}

/// One displayed day (or merged run of days) of the outlook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayDay<'a> {
    pub name: &'a str,
    pub risk: &'a str,
    pub risk_level: u8,
    pub trend: Trend,
    pub messages: &'a DayMessageGroup,
}

impl OutlookTabs {
    /// Build the tabs from place-filtered records.
    ///
    /// `issued` and `today` are calendar dates on the server's clock. No
    /// validation happens here: records with days outside 1-5 are ignored
    /// and unknown risk levels show with empty text.
    pub fn build(records: &[RiskRecord], issued: NaiveDate, today: NaiveDate) -> Self {
        let mut daily = DailyOutlook::from_records(records, issued);

        let age = IssueAge::between(issued, today);
        if age == IssueAge::Stale {
            warn!("Forecast issued {issued} is stale on {today}; showing it as issued today");
        }
        daily.shift(age.offset());

        let daily_risk_outlook_max = daily
            .daily_risk_as_num
            .iter()
            .skip(2)
            .copied()
            .max()
            .unwrap_or(MIN_RISK_LEVEL);

        let mut groups = std::mem::take(&mut daily.groups).into_iter();
        let tab1 = groups.next().unwrap_or_default();
        let tab2 = groups.next().unwrap_or_default();
        let outlook: Vec<DayMessageGroup> = groups.collect();

        let tab3 = match age {
            IssueAge::Today | IssueAge::Stale => merge_outlook_days(outlook, &mut daily),
            IssueAge::Yesterday | IssueAge::TwoDaysAgo => outlook,
        };

        let low_for_five =
            tab1.is_empty() && tab2.is_empty() && tab3.iter().all(DayMessageGroup::is_empty);

        OutlookTabs {
            day_name: daily.day_name,
            daily_risk: daily.daily_risk,
            daily_risk_as_num: daily.daily_risk_as_num,
            trend: daily.trend,
            tab1,
            tab2,
            tab3,
            low_for_five,
            daily_risk_outlook_max,
            daily_risk_outlook_max_text: risk_level_text(daily_risk_outlook_max).to_string(),
        }
    }

    /// Tabs in display order: tab 1, tab 2, then each tab 3 entry.
    pub fn message_groups(&self) -> impl Iterator<Item = &DayMessageGroup> {
        [&self.tab1, &self.tab2].into_iter().chain(self.tab3.iter())
    }

    /// The days as displayed, one per message group, with merged names.
    pub fn display_days(&self) -> Vec<DisplayDay<'_>> {
        self.message_groups()
            .enumerate()
            .filter_map(|(index, messages)| {
                Some(DisplayDay {
                    name: self.day_name.get(index)?,
                    risk: self.daily_risk.get(index)?,
                    risk_level: *self.daily_risk_as_num.get(index)?,
                    trend: *self.trend.get(index)?,
                    messages,
                })
            })
            .collect()
    }
}

/// Merge identical adjacent days of the outlook window (forecast days 3-5)
/// for a forecast issued today, rewriting the day names to match.
fn merge_outlook_days(
    outlook: Vec<DayMessageGroup>,
    daily: &mut DailyOutlook,
) -> Vec<DayMessageGroup> {
    let [day2, day3, day4]: [DayMessageGroup; 3] = match outlook.try_into() {
        Ok(days) => days,
        Err(outlook) => return outlook,
    };

    if day2 == day3 && day3 == day4 {
        daily.day_name[2] = format!(
            "{}, {} and {}",
            daily.day_name[2], daily.day_name[3], daily.day_name[4]
        );
        vec![day2]
    } else if day2 == day3 {
        daily.day_name[2] = format!("{} and {}", daily.day_name[2], daily.day_name[3]);
        // day 4 fills the slot freed by the merge
        daily.move_day(4, 3);
        vec![day2, day4]
    } else if day3 == day4 {
        daily.day_name[3] = format!("{} and {}", daily.day_name[3], daily.day_name[4]);
        vec![day2, day3]
    } else {
        vec![day2, day3, day4]
    }
}
