//! Event records as the calendar hands them over, and their resolved form.
//!
//! `Event` mirrors the stored event documents: times may be explicit, embedded
//! in the description, or missing entirely. `IntervalResolver` turns each one
//! into a `ResolvedEvent` carrying a concrete `TimeInterval`, and everything
//! downstream works only with that.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UNTITLED_EVENT;

fn default_title() -> String {
    UNTITLED_EVENT.to_string()
}

/// A calendar event as stored by the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,

    /// Free text; older events keep their time range here ("14:00 - 15:30 | Team sync")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Calendar day the event belongs to. Anchors description times and the default slot.
    pub date: NaiveDate,

    /// All-day events live in the banner row and are not laid out on the time grid
    #[serde(default)]
    pub all_day: bool,
}

impl Event {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Event {
            id: id.into(),
            title: default_title(),
            starts_at: None,
            ends_at: None,
            description: None,
            date,
            all_day: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_times(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.starts_at = Some(start);
        self.ends_at = Some(end);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A concrete, half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeInterval { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Strict overlap: intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether any part of this interval falls on `day` in the zone `tz`.
    pub fn intersects_day<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> bool {
        let Some(day_start) = day_boundary(day, tz) else {
            return false;
        };
        let day_end = day
            .succ_opt()
            .and_then(|next| day_boundary(next, tz))
            .unwrap_or(day_start + Duration::days(1));

        self.overlaps(&TimeInterval::new(day_start, day_end))
    }
}

/// Midnight at the start of `day` in `tz`, as UTC.
fn day_boundary<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = day.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Which rule produced an event's interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalSource {
    /// Both `startsAt` and `endsAt` were present
    Explicit,
    /// Parsed from an "HH:MM - HH:MM" range in the description
    Description,
    /// Neither was usable; the default slot on the event's date
    Default,
    /// The chosen rule gave `end <= start`; clamped to the default length
    Clamped,
}

impl fmt::Display for IntervalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalSource::Explicit => write!(f, "explicit"),
            IntervalSource::Description => write!(f, "description"),
            IntervalSource::Default => write!(f, "default"),
            IntervalSource::Clamped => write!(f, "clamped"),
        }
    }
}

/// An event paired with its resolved interval.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEvent<'a> {
    pub event: &'a Event,
    pub interval: TimeInterval,
    pub source: IntervalSource,
}

impl ResolvedEvent<'_> {
    pub fn id(&self) -> &str {
        &self.event.id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.interval.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.interval.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, h, m, 0).unwrap()
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let a = TimeInterval::new(at(9, 0), at(10, 0));
        let b = TimeInterval::new(at(10, 0), at(11, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_interval_overlaps() {
        let outer = TimeInterval::new(at(9, 0), at(12, 0));
        let inner = TimeInterval::new(at(10, 0), at(10, 30));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_intersects_day_respects_zone() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        // 23:30 UTC on the 19th is already the 20th in Berlin (UTC+1)
        let late = TimeInterval::new(
            Utc.with_ymd_and_hms(2025, 3, 19, 23, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 19, 23, 45, 0).unwrap(),
        );
        assert!(!late.intersects_day(day, &Utc));
        assert!(late.intersects_day(day, &chrono_tz::Europe::Berlin));
    }

    #[test]
    fn test_event_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "evt-1",
            "startsAt": "2025-03-20T09:00:00Z",
            "endsAt": "2025-03-20T10:00:00Z",
            "date": "2025-03-20"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, UNTITLED_EVENT);
        assert_eq!(event.starts_at, Some(at(9, 0)));
        assert_eq!(event.ends_at, Some(at(10, 0)));
        assert!(!event.all_day);
    }
}
