//! First-fit column assignment within an overlap group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::group::OverlapGroup;

/// Where an event sits horizontally: its column and how many columns its group uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub column: usize,
    pub total_columns: usize,
}

impl Position {
    pub const FULL_WIDTH: Position = Position {
        column: 0,
        total_columns: 1,
    };
}

/// Assign columns to a group's members, in member order.
///
/// Each event takes the lowest column whose last occupant has ended by the
/// event's start (an event may start exactly when the previous one ends).
/// Every member gets the same `total_columns`: the number of columns opened.
pub fn assign_columns(group: &OverlapGroup<'_>) -> Vec<Position> {
    if group.len() == 1 {
        return vec![Position::FULL_WIDTH];
    }

    let mut column_ends: Vec<DateTime<Utc>> = Vec::new();
    let mut columns = Vec::with_capacity(group.len());

    for event in group.members() {
        let free = column_ends.iter().position(|end| event.start() >= *end);
        let column = match free {
            Some(col) => {
                column_ends[col] = event.end();
                col
            }
            None => {
                column_ends.push(event.end());
                column_ends.len() - 1
            }
        };
        columns.push(column);
    }

    let total_columns = column_ends.len();
    columns
        .into_iter()
        .map(|column| Position {
            column,
            total_columns,
        })
        .collect()
}
