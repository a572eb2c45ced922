//! Per-match aggregate counts and fixture-list ordering.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::models::MatchStatus;

use super::types::{Availability, ResponseState};

/// Disjoint-by-construction dashboard counts for one match.
///
/// Not the sheet buckets: here selection and availability are reported as
/// separate facts, and selected players are subtracted out of the
/// available/maybe tallies so a player is never displayed twice.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub selected: usize,
    pub available: usize,
    pub maybe: usize,
}

pub fn tally(responses: &[ResponseState]) -> MatchCounts {
    let mut counts = MatchCounts::default();
    for r in responses {
        if r.selected {
            counts.selected += 1;
            continue;
        }
        match r.availability {
            Some(Availability::Yes) => counts.available += 1,
            Some(Availability::Maybe) => counts.maybe += 1,
            _ => {}
        }
    }
    counts
}

/// Sort key for fixture listings: scheduled before completed before
/// cancelled, date ascending within each status.
pub fn fixture_sort_key(status: MatchStatus, date: NaiveDate) -> (u8, NaiveDate) {
    (status.rank(), date)
}
