use anyhow::Result;
use chrono::{DateTime, Utc};
use malleabite_core::{IntervalSource, PlacedEvent};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::DayView;
use crate::render::Render;

/// One laid-out event, as printed by `--json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutRow<'a> {
    id: &'a str,
    title: &'a str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    source: IntervalSource,
    column: usize,
    total_columns: usize,
    left: String,
    width: String,
}

impl<'a> From<&PlacedEvent<'a>> for LayoutRow<'a> {
    fn from(placed: &PlacedEvent<'a>) -> Self {
        let style = placed.style();
        LayoutRow {
            id: &placed.resolved.event.id,
            title: &placed.resolved.event.title,
            start: placed.resolved.start(),
            end: placed.resolved.end(),
            source: placed.resolved.source,
            column: placed.position.column,
            total_columns: placed.position.total_columns,
            left: style.left_css(),
            width: style.width_css(),
        }
    }
}

pub fn run(view: DayView, json: bool) -> Result<()> {
    let placed = view.engine().place(&view.timed);

    if json {
        let rows: Vec<LayoutRow> = placed.iter().map(LayoutRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", view.day.format("%a %b %-d, %Y").bold());

    if !view.all_day.is_empty() {
        for event in &view.all_day {
            println!("  {} {}", format!("{:>13}", "all-day").dimmed(), event.title);
        }
        println!();
    }

    if placed.is_empty() {
        println!("{}", "No timed events".dimmed());
        return Ok(());
    }

    for event in &placed {
        println!("  {}", event.render_in(view.tz));
    }

    Ok(())
}
