//! Interval resolution.
//!
//! Events reach the layout engine in a few shapes. The resolver picks the
//! first usable one, in order:
//! 1. explicit `startsAt` / `endsAt`
//! 2. an `HH:MM - HH:MM` range in the description, anchored to `date`
//! 3. the default slot, `date` 09:00 to 10:00
//!
//! If the chosen rule gives `end <= start` the interval is clamped to
//! `start + 1h`, so every resolved interval has positive length.

use std::sync::LazyLock;

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use regex::Regex;
use tracing::warn;

use crate::constants::{DEFAULT_DURATION_MINUTES, DEFAULT_START_HOUR};
use crate::event::{Event, IntervalSource, ResolvedEvent, TimeInterval};

/// Matches "14:00 - 15:30" and "9:00–10:00" (hyphen or en-dash).
static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2})\s*[-–]\s*(\d{1,2}):(\d{2})").expect("time range pattern is valid")
});

/// Resolves events to concrete intervals, anchoring wall-clock times in a time zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalResolver {
    tz: Tz,
}

impl Default for IntervalResolver {
    fn default() -> Self {
        IntervalResolver { tz: Tz::UTC }
    }
}

impl IntervalResolver {
    pub fn new(tz: Tz) -> Self {
        IntervalResolver { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn resolve<'a>(&self, event: &'a Event) -> ResolvedEvent<'a> {
        let (interval, source) = match (event.starts_at, event.ends_at) {
            (Some(start), Some(end)) => (TimeInterval::new(start, end), IntervalSource::Explicit),
            _ => match self.description_interval(event) {
                Some(interval) => (interval, IntervalSource::Description),
                None => (self.default_interval(event.date), IntervalSource::Default),
            },
        };

        if interval.end <= interval.start {
            warn!(
                event_id = %event.id,
                start = %interval.start,
                end = %interval.end,
                "Event ends before it starts, clamping to default duration"
            );
            let clamped = TimeInterval::new(interval.start, interval.start + default_duration());
            return ResolvedEvent {
                event,
                interval: clamped,
                source: IntervalSource::Clamped,
            };
        }

        ResolvedEvent {
            event,
            interval,
            source,
        }
    }

    pub fn resolve_all<'a>(&self, events: &'a [Event]) -> Vec<ResolvedEvent<'a>> {
        events.iter().map(|e| self.resolve(e)).collect()
    }

    /// Extract the first "HH:MM - HH:MM" range from the description, anchored to the event date.
    fn description_interval(&self, event: &Event) -> Option<TimeInterval> {
        let description = event.description.as_deref()?;
        let (start, end) = parse_time_range(description)?;

        Some(TimeInterval::new(
            self.anchor(event.date, start),
            self.anchor(event.date, end),
        ))
    }

    fn default_interval(&self, date: NaiveDate) -> TimeInterval {
        let start_time = NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
        let start = self.anchor(date, start_time);
        TimeInterval::new(start, start + default_duration())
    }

    /// Map a wall-clock time on `date` to an instant in the resolver's zone.
    fn anchor(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        local_to_utc(&self.tz, date.and_time(time))
    }
}

/// Read a wall-clock time in `tz`. Ambiguous times take the earlier instant;
/// times skipped by a DST gap move forward one hour.
pub fn local_to_utc(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc()),
    }
}

fn default_duration() -> Duration {
    Duration::minutes(DEFAULT_DURATION_MINUTES)
}

/// Parse the first time range in `text`. Out-of-range clock values don't count as a match.
pub fn parse_time_range(text: &str) -> Option<(NaiveTime, NaiveTime)> {
    let caps = TIME_RANGE.captures(text)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let start = NaiveTime::from_hms_opt(field(1)?, field(2)?, 0)?;
    let end = NaiveTime::from_hms_opt(field(3)?, field(4)?, 0)?;
    Some((start, end))
}
