//! Terminal rendering for laid-out events.
//!
//! Extension traits adding colored output to malleabite-core types using owo_colors.

use chrono_tz::Tz;
use malleabite_core::{IntervalSource, PlacedEvent, ResolvedEvent, TimeInterval};
use owo_colors::OwoColorize;

/// Render with times shown in a given zone.
pub trait Render {
    fn render_in(&self, tz: Tz) -> String;
}

/// Colorize the resolution tag: fallbacks stand out, explicit times stay quiet
fn source_label(source: IntervalSource) -> String {
    let label = format!("[{}]", source);
    match source {
        IntervalSource::Explicit => label.dimmed().to_string(),
        IntervalSource::Description => label.cyan().to_string(),
        IntervalSource::Default => label.yellow().to_string(),
        IntervalSource::Clamped => label.red().to_string(),
    }
}

impl Render for ResolvedEvent<'_> {
    fn render_in(&self, tz: Tz) -> String {
        format!(
            "{} {} {}",
            format_span(&self.interval, tz),
            self.event.title,
            source_label(self.source)
        )
    }
}

impl Render for PlacedEvent<'_> {
    fn render_in(&self, tz: Tz) -> String {
        let style = self.style();
        let column = format!(
            "col {}/{}",
            self.position.column + 1,
            self.position.total_columns
        );
        let geometry = format!("left {} width {}", style.left_css(), style.width_css());

        format!(
            "{} {} {}",
            self.resolved.render_in(tz),
            column.green(),
            geometry.dimmed()
        )
    }
}

/// "09:00-10:30" in `tz`
pub fn format_span(interval: &TimeInterval, tz: Tz) -> String {
    format!(
        "{}-{}",
        interval.start.with_timezone(&tz).format("%H:%M"),
        interval.end.with_timezone(&tz).format("%H:%M")
    )
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
