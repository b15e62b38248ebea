//! Horizontal geometry for a laid-out event.

use serde::{Serialize, Serializer};

use crate::layout::Position;

/// Left offset and width, as percentages of the lane width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventStyle {
    pub left: f64,
    pub width: f64,
}

impl EventStyle {
    pub const FULL: EventStyle = EventStyle {
        left: 0.0,
        width: 100.0,
    };

    pub fn left_css(&self) -> String {
        percent(self.left)
    }

    pub fn width_css(&self) -> String {
        percent(self.width)
    }
}

/// Serializes as CSS strings: `{"left": "50%", "width": "50%"}`
impl Serialize for EventStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("EventStyle", 2)?;
        state.serialize_field("left", &self.left_css())?;
        state.serialize_field("width", &self.width_css())?;
        state.end()
    }
}

fn percent(value: f64) -> String {
    format!("{}%", value)
}

/// Equal-width columns. No position, or a single column, means full width.
pub fn event_style(position: Option<Position>) -> EventStyle {
    match position {
        Some(p) if p.total_columns > 1 => {
            let width = 100.0 / p.total_columns as f64;
            EventStyle {
                left: p.column as f64 * width,
                width,
            }
        }
        _ => EventStyle::FULL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_position_is_full_width() {
        let style = event_style(None);
        assert_eq!(style.left_css(), "0%");
        assert_eq!(style.width_css(), "100%");
    }

    #[test]
    fn test_single_column_is_full_width() {
        assert_eq!(event_style(Some(Position::FULL_WIDTH)), EventStyle::FULL);
    }

    #[test]
    fn test_middle_of_three_columns() {
        let style = event_style(Some(Position {
            column: 1,
            total_columns: 3,
        }));
        assert_eq!(style.width_css(), "33.333333333333336%");
        assert_eq!(style.left_css(), "33.333333333333336%");
    }

    #[test]
    fn test_last_of_four_columns() {
        let style = event_style(Some(Position {
            column: 3,
            total_columns: 4,
        }));
        assert_eq!(style.left_css(), "75%");
        assert_eq!(style.width_css(), "25%");
    }

    #[test]
    fn test_serializes_as_css_strings() {
        let style = event_style(Some(Position {
            column: 1,
            total_columns: 2,
        }));
        let json = serde_json::to_value(style).unwrap();
        assert_eq!(json, serde_json::json!({ "left": "50%", "width": "50%" }));
    }
}
