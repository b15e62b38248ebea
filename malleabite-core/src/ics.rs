//! ICS import using the icalendar crate's parser.
//!
//! Synced calendars (Google Calendar and friends) hand over iCalendar data.
//! Each VEVENT becomes an `Event`; all-day events are flagged and keep only
//! their date. A timed event always gets an end: DTEND, else DTSTART plus
//! DURATION, else DTSTART itself (which the resolver clamps to one hour).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};
use tracing::debug;

use crate::constants::UNTITLED_EVENT;
use crate::error::{MalleabiteError, MalleabiteResult};
use crate::event::Event;
use crate::interval::local_to_utc;

/// Parse every VEVENT in `content`. Floating times are read in `tz`.
pub fn parse_events(content: &str, tz: Tz) -> MalleabiteResult<Vec<Event>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| MalleabiteError::IcsParse(e.to_string()))?;

    let events = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(|vevent| {
            let event = parse_vevent(vevent, tz);
            if event.is_none() {
                debug!("Skipping VEVENT without UID or a readable DTSTART");
            }
            event
        })
        .collect();

    Ok(events)
}

fn parse_vevent(vevent: &Component, tz: Tz) -> Option<Event> {
    let id = vevent.find_prop("UID")?.val.to_string();
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| UNTITLED_EVENT.to_string());
    let description = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());

    let start = DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?;
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok());

    let mut event = Event::new(id, NaiveDate::MIN).with_title(title);
    event.description = description;

    match start {
        DatePerhapsTime::Date(date) => {
            event.date = date;
            event.all_day = true;
        }
        DatePerhapsTime::DateTime(start) => {
            let start = to_utc(start, tz);
            let end = match end {
                Some(DatePerhapsTime::DateTime(end)) => Some(to_utc(end, tz)),
                _ => vevent
                    .find_prop("DURATION")
                    .and_then(|p| parse_duration(p.val.as_ref()))
                    .map(|d| start + d),
            };

            event.date = start.with_timezone(&tz).date_naive();
            event.starts_at = Some(start);
            event.ends_at = Some(end.unwrap_or(start));
        }
    }

    Some(event)
}

/// Convert icalendar's date-time to UTC, honoring TZID when it names a known zone.
fn to_utc(dt: CalendarDateTime, tz: Tz) -> DateTime<Utc> {
    match dt {
        CalendarDateTime::Utc(dt) => dt,
        CalendarDateTime::Floating(naive) => local_to_utc(&tz, naive),
        CalendarDateTime::WithTimezone { date_time, tzid } => match tzid.parse::<Tz>() {
            Ok(zone) => local_to_utc(&zone, date_time),
            Err(_) => {
                debug!(tzid = %tzid, "Unknown TZID, reading time in default zone");
                local_to_utc(&tz, date_time)
            }
        },
    }
}

/// Parse a DURATION value (PT1H30M, P1D, ...). Negative durations count as zero.
fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim().trim_start_matches('+');
    if value.starts_with('-') {
        return Some(Duration::zero());
    }

    let duration = iso8601::duration(value).ok()?;
    let std_duration: std::time::Duration = duration.into();
    Duration::from_std(std_duration).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::IntervalSource;
    use crate::interval::IntervalResolver;
    use crate::layout::LayoutEngine;
    use chrono::TimeZone;

    const TEAM_CALENDAR: &str = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:standup@example.com
SUMMARY:Standup
DTSTART:20250320T090000Z
DTEND:20250320T091500Z
END:VEVENT
BEGIN:VEVENT
UID:review@example.com
SUMMARY:Design review
DTSTART;TZID=America/New_York:20250320T100000
DTEND;TZID=America/New_York:20250320T113000
END:VEVENT
BEGIN:VEVENT
UID:offsite@example.com
SUMMARY:Offsite
DTSTART;VALUE=DATE:20250321
DTEND;VALUE=DATE:20250322
END:VEVENT
BEGIN:VEVENT
UID:sync@example.com
DESCRIPTION:14:00 - 15:30 | Team sync
DTSTART:20250320T140000
END:VEVENT
BEGIN:VEVENT
SUMMARY:No uid
DTSTART:20250320T120000Z
END:VEVENT
END:VCALENDAR
";

    fn parsed() -> Vec<Event> {
        parse_events(TEAM_CALENDAR, chrono_tz::Europe::Berlin).unwrap()
    }

    fn find<'a>(events: &'a [Event], id: &str) -> &'a Event {
        events.iter().find(|e| e.id == id).unwrap()
    }

    #[test]
    fn test_skips_events_without_uid() {
        assert_eq!(parsed().len(), 4);
    }

    #[test]
    fn test_utc_times() {
        let events = parsed();
        let standup = find(&events, "standup@example.com");

        assert_eq!(standup.title, "Standup");
        assert_eq!(
            standup.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap())
        );
        assert_eq!(
            standup.ends_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 20, 9, 15, 0).unwrap())
        );
        assert!(!standup.all_day);
    }

    #[test]
    fn test_tzid_times_are_converted() {
        let events = parsed();
        let review = find(&events, "review@example.com");

        assert_eq!(
            review.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 20, 14, 0, 0).unwrap())
        );
        assert_eq!(review.date, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
    }

    #[test]
    fn test_all_day_events_keep_only_date() {
        let events = parsed();
        let offsite = find(&events, "offsite@example.com");

        assert!(offsite.all_day);
        assert_eq!(offsite.starts_at, None);
        assert_eq!(offsite.date, NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
    }

    #[test]
    fn test_floating_start_without_end_ends_at_start() {
        let events = parsed();
        let sync = find(&events, "sync@example.com");

        assert_eq!(sync.title, UNTITLED_EVENT);
        // 14:00 Berlin (CET) is 13:00 UTC
        assert_eq!(
            sync.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 20, 13, 0, 0).unwrap())
        );
        assert_eq!(sync.ends_at, sync.starts_at);
        assert_eq!(sync.description.as_deref(), Some("14:00 - 15:30 | Team sync"));
    }

    #[test]
    fn test_duration_sets_end_and_keeps_start() {
        let ics = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:d
DTSTART:20250320T150000Z
DURATION:PT1H30M
END:VEVENT
BEGIN:VEVENT
UID:e
DTSTART:20250320T093000Z
DTEND:20250320T100000Z
END:VEVENT
END:VCALENDAR
";
        let events = parse_events(ics, Tz::UTC).unwrap();
        let d = find(&events, "d");
        assert_eq!(d.ends_at, Some(Utc.with_ymd_and_hms(2025, 3, 20, 16, 30, 0).unwrap()));

        let placed = LayoutEngine::default().place(&events);
        let d = placed.iter().find(|p| p.resolved.id() == "d").unwrap();
        assert_eq!(d.resolved.source, IntervalSource::Explicit);
        assert_eq!(d.resolved.start(), Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap());
        assert!(placed.iter().all(|p| p.position.total_columns == 1));
    }

    #[test]
    fn test_start_only_event_is_clamped_at_its_start() {
        let ics = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:ping
DTSTART:20250320T150000Z
END:VEVENT
END:VCALENDAR
";
        let events = parse_events(ics, Tz::UTC).unwrap();
        let resolved = IntervalResolver::default().resolve(&events[0]);

        assert_eq!(resolved.source, IntervalSource::Clamped);
        assert_eq!(resolved.start(), Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap());
        assert_eq!(resolved.end(), Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_duration_values() {
        assert_eq!(parse_duration("PT45M"), Some(Duration::minutes(45)));
        assert_eq!(parse_duration("P1D"), Some(Duration::days(1)));
        assert_eq!(parse_duration("-PT15M"), Some(Duration::zero()));
        assert_eq!(parse_duration("soon"), None);
    }

    #[test]
    fn test_dst_gap_start_moves_forward_instead_of_dropping() {
        let ics = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:gap
DTSTART:20250330T023000
DTEND:20250330T040000
END:VEVENT
BEGIN:VEVENT
UID:gap-tzid
DTSTART;TZID=Europe/Berlin:20250330T023000
DTEND;TZID=Europe/Berlin:20250330T040000
END:VEVENT
END:VCALENDAR
";
        let events = parse_events(ics, chrono_tz::Europe::Berlin).unwrap();
        assert_eq!(events.len(), 2);

        // 02:30 doesn't exist that night; 03:30 CEST is 01:30 UTC
        let expected_start = Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap();
        let expected_end = Utc.with_ymd_and_hms(2025, 3, 30, 2, 0, 0).unwrap();
        for event in &events {
            assert_eq!(event.starts_at, Some(expected_start));
            assert_eq!(event.ends_at, Some(expected_end));
            assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 3, 30).unwrap());
        }
    }
}
