pub mod config;
pub mod groups;
pub mod layout;

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use malleabite_core::config::{LayoutConfig, parse_timezone};
use malleabite_core::{Event, IntervalResolver, LayoutEngine, load_events, visible_on};
use tracing::debug;

/// The events of one day, split into timed and all-day, ready to lay out.
pub struct DayView {
    pub day: NaiveDate,
    pub tz: Tz,
    pub timed: Vec<Event>,
    pub all_day: Vec<Event>,
}

impl DayView {
    pub fn load(file: &Path, date: Option<&str>, tz_flag: Option<&str>) -> Result<Self> {
        let tz = resolve_timezone(tz_flag)?;
        let day = match date {
            Some(s) => parse_day(s)?,
            None => Utc::now().with_timezone(&tz).date_naive(),
        };

        let events = load_events(file, tz)
            .with_context(|| format!("Could not load events from {}", file.display()))?;
        let (all_day, timed): (Vec<Event>, Vec<Event>) =
            events.into_iter().partition(|e| e.all_day);

        let resolver = IntervalResolver::new(tz);
        let timed: Vec<Event> = visible_on(&timed, day, &resolver)
            .into_iter()
            .cloned()
            .collect();
        let all_day: Vec<Event> = all_day.into_iter().filter(|e| e.date == day).collect();

        debug!(%day, %tz, timed = timed.len(), all_day = all_day.len(), "Loaded day view");

        Ok(DayView {
            day,
            tz,
            timed,
            all_day,
        })
    }

    pub fn engine(&self) -> LayoutEngine {
        LayoutEngine::new(IntervalResolver::new(self.tz))
    }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(day) => Ok(day),
        Err(_) => bail!("Invalid date format '{}'. Expected YYYY-MM-DD", s),
    }
}

/// `--tz` flag, then the config file, then the system zone, then UTC.
fn resolve_timezone(flag: Option<&str>) -> Result<Tz> {
    if let Some(name) = flag {
        return Ok(parse_timezone(name)?);
    }

    if let Some(tz) = LayoutConfig::load()?.timezone()? {
        return Ok(tz);
    }

    let system = iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok());
    Ok(system.unwrap_or(Tz::UTC))
}
