/// Hour of day the fallback window starts at when an event has no usable times.
pub const DEFAULT_START_HOUR: u32 = 9;

/// Length of the fallback window, and of clamped intervals.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Title used when an imported event has no SUMMARY.
pub const UNTITLED_EVENT: &str = "(No title)";
