//! Overlap grouping.

use chrono::{DateTime, Utc};

use crate::event::{ResolvedEvent, TimeInterval};

/// A maximal run of events connected by chained overlap.
///
/// Members keep the start-time order they were grouped in. Two members need
/// not overlap each other directly, only through a chain of members that do.
#[derive(Debug, Clone)]
pub struct OverlapGroup<'a> {
    members: Vec<ResolvedEvent<'a>>,
    end: DateTime<Utc>,
}

impl<'a> OverlapGroup<'a> {
    fn start_with(first: ResolvedEvent<'a>) -> Self {
        OverlapGroup {
            end: first.end(),
            members: vec![first],
        }
    }

    fn push(&mut self, event: ResolvedEvent<'a>) {
        self.end = self.end.max(event.end());
        self.members.push(event);
    }

    /// Whether `event` starts before everything in the group has ended.
    fn reaches(&self, event: &ResolvedEvent<'_>) -> bool {
        event.start() < self.end
    }

    pub fn members(&self) -> &[ResolvedEvent<'a>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// From the first member's start to the latest end in the group.
    pub fn span(&self) -> TimeInterval {
        TimeInterval::new(self.members[0].start(), self.end)
    }
}

/// Sort resolved events by start time. Stable, so equal starts keep input order.
pub fn sort_by_start(events: &mut [ResolvedEvent<'_>]) {
    events.sort_by_key(|e| e.start());
}

/// Partition start-sorted events into overlap groups with a single sweep.
pub fn group_sorted<'a>(sorted: &[ResolvedEvent<'a>]) -> Vec<OverlapGroup<'a>> {
    let mut groups = Vec::new();
    let mut iter = sorted.iter().copied();

    let Some(first) = iter.next() else {
        return groups;
    };
    let mut current = OverlapGroup::start_with(first);

    for event in iter {
        if current.reaches(&event) {
            current.push(event);
        } else {
            groups.push(std::mem::replace(&mut current, OverlapGroup::start_with(event)));
        }
    }
    groups.push(current);

    groups
}
