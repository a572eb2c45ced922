use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::selection::Availability;

/// An authenticating account (one per verified email).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub home_ground: String,
    /// Fee charged per match, in pence. Never negative.
    pub default_fee_pence: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Club membership roles. Admins and captains manage the club; everyone
/// else only answers for themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Captain,
    Player,
}

/// A roster entry. Belongs to exactly one club, forever. `account_id` is
/// set by email linkage and may legitimately stay null.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: Uuid,
    pub club_id: Uuid,
    pub account_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A team this club plays against. Counterparty and away-venue source.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Opposition {
    pub id: Uuid,
    pub club_id: Uuid,
    pub name: String,
    pub home_ground: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl MatchStatus {
    /// Listing order: upcoming fixtures first, cancelled last.
    pub const fn rank(self) -> u8 {
        match self {
            MatchStatus::Scheduled => 0,
            MatchStatus::Completed => 1,
            MatchStatus::Cancelled => 2,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Match {
    pub id: Uuid,
    pub club_id: Uuid,
    pub opposition_id: Uuid,
    pub match_date: NaiveDate,
    pub start_time: NaiveTime,
    pub venue: String,
    pub is_home: bool,
    pub fee_pence: i64,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

/// The per-(match, player) response row. Created lazily on first write;
/// availability stays null until the player actually answers, even when
/// the row was created by a team-selection write.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MatchResponse {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub availability: Option<Availability>,
    pub selected: bool,
    pub updated_at: DateTime<Utc>,
}
