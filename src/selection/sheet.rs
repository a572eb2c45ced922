//! Sheet categorization: the read-side projection shared by the
//! team-selection and bulk-availability pages. Pure; no side effects.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::db::models::{MatchResponse, Player};

use super::types::{response_rank, Availability, ResponseState, SheetMode};

/// One active roster member joined against their (possibly absent)
/// response row for a match. `state: None` means no row exists at all,
/// which is distinct from a row whose availability is unset.
#[derive(Debug, Clone)]
pub struct RosterResponse {
    pub player_id: Uuid,
    pub name: String,
    pub state: Option<ResponseState>,
}

/// Join the club roster against a match's response rows. Inactive players
/// never appear on a sheet.
pub fn roster_responses(players: &[Player], responses: &[MatchResponse]) -> Vec<RosterResponse> {
    let by_player: HashMap<Uuid, ResponseState> = responses
        .iter()
        .map(|r| {
            (
                r.player_id,
                ResponseState {
                    availability: r.availability,
                    selected: r.selected,
                },
            )
        })
        .collect();

    players
        .iter()
        .filter(|p| p.is_active)
        .map(|p| RosterResponse {
            player_id: p.id,
            name: p.name.clone(),
            state: by_player.get(&p.id).copied(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetEntry {
    pub player_id: Uuid,
    pub name: String,
    pub availability: Option<Availability>,
    pub selected: bool,
}

impl SheetEntry {
    fn from_roster(r: &RosterResponse) -> Self {
        let state = r.state.unwrap_or_default();
        SheetEntry {
            player_id: r.player_id,
            name: r.name.clone(),
            availability: state.availability,
            selected: state.selected,
        }
    }
}

/// The categorized sheet for one match. Buckets are mutually exclusive;
/// `selected` is populated in team-selection mode only.
#[derive(Debug, Default, Serialize)]
pub struct SelectionSheet {
    pub selected: Vec<SheetEntry>,
    pub available: Vec<SheetEntry>,
    pub maybe: Vec<SheetEntry>,
    pub awaiting: Vec<SheetEntry>,
    pub unavailable: Vec<SheetEntry>,
    /// Selected players whose availability is anything but yes. Surfaced
    /// as a warning, never silently corrected.
    pub unavailable_selected: Vec<SheetEntry>,
    /// |available| plus selected players who answered yes.
    pub total_available: usize,
}

/// Classify every active roster member into exactly one bucket.
///
/// Team-selection mode: selection trumps availability and gets its own
/// bucket. Bulk mode: players stay in their availability bucket and keep
/// `selected` as an attribute. The divergence is deliberate.
pub fn build_sheet(mode: SheetMode, roster: &[RosterResponse]) -> SelectionSheet {
    let mut sheet = SelectionSheet::default();

    for r in roster {
        let entry = SheetEntry::from_roster(r);

        if entry.selected && entry.availability != Some(Availability::Yes) {
            sheet.unavailable_selected.push(entry.clone());
        }
        if entry.availability == Some(Availability::Yes) {
            sheet.total_available += 1;
        }

        if mode == SheetMode::TeamSelection && entry.selected {
            sheet.selected.push(entry);
            continue;
        }
        match entry.availability {
            Some(Availability::Yes) => sheet.available.push(entry),
            Some(Availability::Maybe) => sheet.maybe.push(entry),
            Some(Availability::No) => sheet.unavailable.push(entry),
            None => sheet.awaiting.push(entry),
        }
    }

    // Name order everywhere; the selected bucket additionally groups by
    // each member's own availability precedence first.
    for bucket in [
        &mut sheet.available,
        &mut sheet.maybe,
        &mut sheet.awaiting,
        &mut sheet.unavailable,
        &mut sheet.unavailable_selected,
    ] {
        bucket.sort_by_key(|e| e.name.to_lowercase());
    }
    sheet
        .selected
        .sort_by_key(|e| (response_rank(e.availability), e.name.to_lowercase()));

    sheet
}

/// Active players with no response row at all for the match, regardless
/// of which field a row would have set.
pub fn not_responded(roster: &[RosterResponse]) -> Vec<SheetEntry> {
    let mut out: Vec<SheetEntry> = roster
        .iter()
        .filter(|r| r.state.is_none())
        .map(SheetEntry::from_roster)
        .collect();
    out.sort_by_key(|e| e.name.to_lowercase());
    out
}
