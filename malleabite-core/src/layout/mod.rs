//! Side-by-side layout for overlapping events.
//!
//! Events are resolved, sorted once by start time, swept into overlap groups,
//! and each group is packed into columns first-fit. The same sorted order
//! feeds both grouping and column assignment.

mod columns;
mod group;

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::event::{Event, ResolvedEvent};
use crate::interval::IntervalResolver;
use crate::style::{EventStyle, event_style};

pub use columns::{Position, assign_columns};
pub use group::{OverlapGroup, group_sorted, sort_by_start};

/// An event with its resolved interval, group index and column.
#[derive(Debug, Clone, Copy)]
pub struct PlacedEvent<'a> {
    pub resolved: ResolvedEvent<'a>,
    pub group: usize,
    pub position: Position,
}

impl PlacedEvent<'_> {
    pub fn style(&self) -> EventStyle {
        event_style(Some(self.position))
    }
}

/// Computes layouts with a given interval resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    resolver: IntervalResolver,
}

impl LayoutEngine {
    pub fn new(resolver: IntervalResolver) -> Self {
        LayoutEngine { resolver }
    }

    /// Resolve and sort by start time.
    fn sorted<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Vec<ResolvedEvent<'a>> {
        let mut resolved: Vec<_> = events.into_iter().map(|e| self.resolver.resolve(e)).collect();
        sort_by_start(&mut resolved);
        resolved
    }

    /// The overlap groups, in start-time order.
    pub fn groups<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Vec<OverlapGroup<'a>> {
        group_sorted(&self.sorted(events))
    }

    /// Every event placed in its group and column, in start-time order.
    pub fn place<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Vec<PlacedEvent<'a>> {
        let groups = self.groups(events);
        let mut placed = Vec::with_capacity(groups.iter().map(OverlapGroup::len).sum());

        for (index, group) in groups.iter().enumerate() {
            let positions = assign_columns(group);
            debug!(
                group = index,
                events = group.len(),
                columns = positions.first().map_or(0, |p| p.total_columns),
                "Packed overlap group"
            );

            for (resolved, position) in group.members().iter().zip(positions) {
                placed.push(PlacedEvent {
                    resolved: *resolved,
                    group: index,
                    position,
                });
            }
        }

        placed
    }

    /// Positions keyed by event id.
    pub fn positions<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> EventPositions {
        let mut positions = HashMap::new();
        for placed in self.place(events) {
            // Duplicate ids: the later event in start order wins
            positions.insert(placed.resolved.id().to_string(), placed.position);
        }
        EventPositions { positions }
    }
}

/// Lay out `events` with times anchored in UTC.
pub fn calculate_event_positions<'a>(events: impl IntoIterator<Item = &'a Event>) -> EventPositions {
    LayoutEngine::default().positions(events)
}

/// Events whose resolved interval touches `day` in the resolver's zone.
pub fn visible_on<'a>(
    events: &'a [Event],
    day: NaiveDate,
    resolver: &IntervalResolver,
) -> Vec<&'a Event> {
    let tz = resolver.timezone();
    events
        .iter()
        .filter(|e| resolver.resolve(e).interval.intersects_day(day, &tz))
        .collect()
}

/// Computed positions, keyed by event id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPositions {
    positions: HashMap<String, Position>,
}

impl EventPositions {
    /// The position for `id`, or `None` if the id was not part of the layout.
    pub fn get(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    /// Style for `id`, falling back to full width for unknown ids.
    pub fn style_for(&self, id: &str) -> EventStyle {
        event_style(self.get(id))
    }

    /// Style for `id`, or `None` for unknown ids.
    pub fn lookup_style(&self, id: &str) -> Option<EventStyle> {
        self.get(id).map(|p| event_style(Some(p)))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
