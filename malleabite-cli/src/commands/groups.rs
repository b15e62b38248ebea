use anyhow::Result;
use malleabite_core::layout::assign_columns;
use owo_colors::OwoColorize;

use super::DayView;
use crate::render::{Render, format_span, pluralize};

pub fn run(view: DayView) -> Result<()> {
    let engine = view.engine();
    let groups = engine.groups(&view.timed);

    println!("{}", view.day.format("%a %b %-d, %Y").bold());

    if groups.is_empty() {
        println!("{}", "No timed events".dimmed());
        return Ok(());
    }

    for (index, group) in groups.iter().enumerate() {
        let columns = assign_columns(group)
            .first()
            .map_or(0, |p| p.total_columns);
        let summary = format!(
            "({} {}, {} {})",
            group.len(),
            pluralize("event", group.len()),
            columns,
            pluralize("column", columns)
        );

        println!(
            "  {} {} {}",
            format!("#{}", index + 1).bold(),
            format_span(&group.span(), view.tz),
            summary.dimmed()
        );
        for member in group.members() {
            println!("     {}", member.render_in(view.tz));
        }
    }

    Ok(())
}
