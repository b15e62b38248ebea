//! Calendar event layout engine for Malleabite.
//!
//! Given the events visible in a day or week view, this crate works out how
//! overlapping events sit side by side:
//! - `interval` turns loosely-shaped event records into concrete time intervals
//! - `layout` groups overlapping events and packs each group into columns
//! - `style` converts a column assignment into left/width percentages
//!
//! `config`, `ics` and `import` cover loading settings and event files.

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ics;
pub mod import;
pub mod interval;
pub mod layout;
pub mod style;

pub use error::{MalleabiteError, MalleabiteResult};
pub use event::{Event, IntervalSource, ResolvedEvent, TimeInterval};
pub use interval::IntervalResolver;
pub use import::load_events;
pub use layout::{
    EventPositions, LayoutEngine, OverlapGroup, PlacedEvent, Position, calculate_event_positions,
    visible_on,
};
pub use style::{EventStyle, event_style};
