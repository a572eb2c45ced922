use serde::{Deserialize, Serialize};

/// A player's self-reported answer for one match.
///
/// "No answer yet" is not a variant: it is the absence of a value
/// (`Option::None`), both for rows that were created by a team-selection
/// write and for players with no row at all.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Availability {
    Yes,
    Maybe,
    No,
}

impl Availability {
    /// Precedence used when ordering mixed responses: yes < maybe < no,
    /// with the unset slot (2) reserved between maybe and no.
    pub const fn rank(self) -> u8 {
        match self {
            Availability::Yes => 0,
            Availability::Maybe => 1,
            Availability::No => 3,
        }
    }
}

/// Precedence of an optional response; unset sits between maybe and no.
pub fn response_rank(availability: Option<Availability>) -> u8 {
    availability.map_or(2, |a| a.rank())
}

/// One state-transition applied by the squad editors.
///
/// Closed set: an unknown action fails JSON deserialization at the HTTP
/// boundary instead of falling through a string comparison.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    SetAvailable,
    SetMaybe,
    SetUnavailable,
    AddToTeam,
    RemoveFromTeam,
}

/// The two independent axes of a (match, player) response record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseState {
    pub availability: Option<Availability>,
    pub selected: bool,
}

impl TransitionAction {
    /// Mutate one axis, leaving the other untouched. Adding a player to
    /// the team never manufactures an availability answer.
    pub fn apply(self, state: &mut ResponseState) {
        match self {
            TransitionAction::SetAvailable => state.availability = Some(Availability::Yes),
            TransitionAction::SetMaybe => state.availability = Some(Availability::Maybe),
            TransitionAction::SetUnavailable => state.availability = Some(Availability::No),
            TransitionAction::AddToTeam => state.selected = true,
            TransitionAction::RemoveFromTeam => state.selected = false,
        }
    }
}

/// Which projection a selection sheet is built for.
///
/// The two views bucket selected players differently on purpose: the
/// team-selection page pulls them into their own bucket, the bulk
/// availability page keeps them inside their availability bucket and
/// carries `selected` as a plain attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMode {
    TeamSelection,
    BulkAvailability,
}
