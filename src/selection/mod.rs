//! Availability/selection rules, kept free of persistence concerns.

pub mod sheet;
pub mod summary;
pub mod types;

pub use sheet::{build_sheet, not_responded, roster_responses, RosterResponse, SelectionSheet, SheetEntry};
pub use summary::{fixture_sort_key, tally, MatchCounts};
pub use types::{response_rank, Availability, ResponseState, SheetMode, TransitionAction};
