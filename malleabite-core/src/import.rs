//! Loading event files from disk.

use std::path::Path;

use chrono_tz::Tz;

use crate::error::{MalleabiteError, MalleabiteResult};
use crate::event::Event;
use crate::ics;

/// Load events from an `.ics` file or a JSON array of event records.
///
/// The format is picked by extension; anything other than `.ics` is read as JSON.
pub fn load_events(path: &Path, tz: Tz) -> MalleabiteResult<Vec<Event>> {
    let content = std::fs::read_to_string(path)?;

    let is_ics = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ics"));

    if is_ics {
        ics::parse_events(&content, tz)
    } else {
        parse_json_events(&content)
    }
}

pub fn parse_json_events(content: &str) -> MalleabiteResult<Vec<Event>> {
    serde_json::from_str(content).map_err(|e| MalleabiteError::EventParse(e.to_string()))
}
