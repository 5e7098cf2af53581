//! Festival-driven surge prediction.
//!
//! A simple lead-time heuristic: if a festival falls within a few days of
//! the query date, its surge level applies; otherwise the surge is `Low`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::festival::{Festival, FestivalCalendar, SurgeLevel};

/// Days on either side of a festival that count as its surge window.
pub const DEFAULT_SURGE_WINDOW_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Predicted surge for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurgeAssessment {
    pub level: SurgeLevel,
    pub nearby_festival: Option<Festival>,
}

impl SurgeAssessment {
    fn from_match(festival: Option<&Festival>) -> Self {
        match festival {
            Some(f) => Self {
                level: f.surge_level,
                nearby_festival: Some(f.clone()),
            },
            None => Self {
                level: SurgeLevel::Low,
                nearby_festival: None,
            },
        }
    }
}

/// Surge predictor over an injected festival calendar.
#[derive(Debug, Clone)]
pub struct SurgePredictor {
    calendar: FestivalCalendar,
    window_days: i64,
}

impl SurgePredictor {
    /// Predictor with the default three-day window.
    pub fn new(calendar: FestivalCalendar) -> Self {
        Self::with_window(calendar, DEFAULT_SURGE_WINDOW_DAYS)
    }

    pub fn with_window(calendar: FestivalCalendar, window_days: i64) -> Self {
        Self {
            calendar,
            window_days: window_days.max(0),
        }
    }

    pub fn calendar(&self) -> &FestivalCalendar {
        &self.calendar
    }

    pub fn festivals(&self) -> &[Festival] {
        self.calendar.festivals()
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Earliest festival on or after `today`.
    pub fn nearest_upcoming(&self, today: NaiveDate) -> Option<&Festival> {
        nearest_upcoming(today, self.calendar.festivals())
    }

    /// Surge level for a calendar date.
    ///
    /// The first festival in table order within the window triggers, even
    /// if a later-listed one is closer.
    pub fn assess(&self, date: NaiveDate) -> SurgeAssessment {
        let hit = self
            .festivals()
            .iter()
            .find(|f| (f.date - date).num_days().abs() <= self.window_days);
        let assessment = SurgeAssessment::from_match(hit);
        tracing::debug!(%date, level = %assessment.level, "assessed surge");
        assessment
    }

    /// Surge level for an instant.
    ///
    /// Festivals start at 00:00 UTC; the distance to the instant is rounded
    /// up to whole days, so a partial day counts as a full one.
    pub fn assess_at(&self, at: DateTime<Utc>) -> SurgeAssessment {
        let hit = self
            .festivals()
            .iter()
            .find(|f| days_apart_ceil(f.date, at) <= self.window_days);
        SurgeAssessment::from_match(hit)
    }
}

/// Earliest festival with `date >= today`; ties go to the first in table
/// order. `None` when every festival is past or the table is empty.
pub fn nearest_upcoming(today: NaiveDate, table: &[Festival]) -> Option<&Festival> {
    table
        .iter()
        .filter(|f| f.date >= today)
        .min_by_key(|f| f.date)
}

/// [`SurgePredictor::assess`] over a bare table with the default window.
pub fn assess_surge(date: NaiveDate, table: &[Festival]) -> SurgeAssessment {
    let hit = table
        .iter()
        .find(|f| (f.date - date).num_days().abs() <= DEFAULT_SURGE_WINDOW_DAYS);
    SurgeAssessment::from_match(hit)
}

fn days_apart_ceil(date: NaiveDate, at: DateTime<Utc>) -> i64 {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let millis = (start - at).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}
