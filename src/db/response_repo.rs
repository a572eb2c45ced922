//! Persistence of per-(match, player) response rows.
//!
//! Rows are created lazily on first write. Every write path goes through
//! an upsert keyed on (match_id, player_id), so a single call can never
//! lose its own update; concurrent requests remain last-writer-wins at
//! row granularity.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::selection::{Availability, ResponseState, TransitionAction};

use super::models::MatchResponse;

/// All response rows for one match.
pub async fn for_match(db: &PgPool, match_id: Uuid) -> Result<Vec<MatchResponse>> {
    sqlx::query_as::<_, MatchResponse>(
        "SELECT match_id, player_id, availability, selected, updated_at
           FROM match_responses WHERE match_id = $1",
    )
    .bind(match_id)
    .fetch_all(db)
    .await
    .context("fetching match responses")
}

/// Every response row belonging to a club's fixtures, for list tallies
/// and the per-player editor.
pub async fn for_club_matches(db: &PgPool, club: Uuid) -> Result<Vec<MatchResponse>> {
    sqlx::query_as::<_, MatchResponse>(
        r#"SELECT r.match_id, r.player_id, r.availability, r.selected, r.updated_at
             FROM match_responses r
             JOIN matches m ON m.id = r.match_id
            WHERE m.club_id = $1"#,
    )
    .bind(club)
    .fetch_all(db)
    .await
    .context("fetching club responses")
}

/// Record an availability answer, creating the row if this is the first
/// write for the pair. The selection axis is never touched: a fresh row
/// starts unselected, an existing row keeps its value.
pub async fn set_availability(
    db: &PgPool,
    match_id: Uuid,
    player_id: Uuid,
    value: Availability,
) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO match_responses (match_id, player_id, availability, selected)
           VALUES ($1, $2, $3, FALSE)
           ON CONFLICT (match_id, player_id)
           DO UPDATE SET availability = EXCLUDED.availability,
                         updated_at   = now()"#,
    )
    .bind(match_id)
    .bind(player_id)
    .bind(value)
    .execute(db)
    .await
    .context("recording availability")?;
    Ok(())
}

/// Apply one transition to a set of players on one match.
///
/// Validates before any write: the list must be non-empty and every id
/// must be a roster entry of the match's club — offenders are named and
/// nothing is written. Application happens inside one transaction with a
/// row lock per pair, then the whole batch commits together. Returns the
/// number of distinct players affected.
pub async fn apply_transition(
    db: &PgPool,
    club: Uuid,
    match_id: Uuid,
    player_ids: &[Uuid],
    action: TransitionAction,
) -> ServiceResult<u64> {
    if player_ids.is_empty() {
        return Err(ServiceError::InvalidInput("no players given".into()));
    }
    let mut ids = player_ids.to_vec();
    ids.sort();
    ids.dedup();

    let mut tx = db.begin().await.context("begin squad transaction")?;

    let known: Vec<Uuid> = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM players WHERE club_id = $1 AND id = ANY($2)",
    )
    .bind(club)
    .bind(&ids)
    .fetch_all(&mut *tx)
    .await
    .context("validating squad player ids")?;

    if known.len() != ids.len() {
        let foreign: Vec<String> = ids
            .iter()
            .filter(|id| !known.contains(id))
            .map(|id| id.to_string())
            .collect();
        return Err(ServiceError::InvalidInput(format!(
            "players not in club roster: {}",
            foreign.join(", ")
        )));
    }

    for pid in &ids {
        let mut state: ResponseState = sqlx::query_as::<_, (Option<Availability>, bool)>(
            "SELECT availability, selected FROM match_responses
              WHERE match_id = $1 AND player_id = $2 FOR UPDATE",
        )
        .bind(match_id)
        .bind(pid)
        .fetch_optional(&mut *tx)
        .await
        .context("reading response row")?
        .map(|(availability, selected)| ResponseState {
            availability,
            selected,
        })
        .unwrap_or_default();

        action.apply(&mut state);

        sqlx::query(
            r#"INSERT INTO match_responses (match_id, player_id, availability, selected)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (match_id, player_id)
               DO UPDATE SET availability = EXCLUDED.availability,
                             selected     = EXCLUDED.selected,
                             updated_at   = now()"#,
        )
        .bind(match_id)
        .bind(pid)
        .bind(state.availability)
        .bind(state.selected)
        .execute(&mut *tx)
        .await
        .context("writing response row")?;
    }

    tx.commit().await.context("commit squad transaction")?;
    Ok(ids.len() as u64)
}
