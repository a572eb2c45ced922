use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::selection::fixture_sort_key;

use super::models::{Club, Match, MatchStatus, Opposition};

/// Venue fallback, applied once at creation and never retroactively: an
/// empty venue takes the club's ground at home, the opposition's away.
pub fn resolved_venue(supplied: &str, is_home: bool, club: &Club, opposition: &Opposition) -> String {
    if !supplied.trim().is_empty() {
        return supplied.to_string();
    }
    if is_home {
        club.home_ground.clone()
    } else {
        opposition.home_ground.clone()
    }
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<Match>> {
    sqlx::query_as::<_, Match>(
        "SELECT id, club_id, opposition_id, match_date, start_time, venue, is_home,
                fee_pence, status, created_at
           FROM matches WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching match")
}

/// A club's fixtures: scheduled first, then completed, then cancelled,
/// date order within each (time breaks date ties via the stable sort).
pub async fn of_club(db: &PgPool, club: Uuid) -> Result<Vec<Match>> {
    let mut fixtures = sqlx::query_as::<_, Match>(
        r#"SELECT id, club_id, opposition_id, match_date, start_time, venue, is_home,
                  fee_pence, status, created_at
             FROM matches
            WHERE club_id = $1
            ORDER BY match_date, start_time"#,
    )
    .bind(club)
    .fetch_all(db)
    .await
    .context("listing club matches")?;

    fixtures.sort_by_key(|m| fixture_sort_key(m.status, m.match_date));
    Ok(fixtures)
}

/// Insert a fixture. The caller has already checked that the opposition
/// belongs to the club; fee falls back to the club default, venue to the
/// home/away ground.
pub async fn create(
    db: &PgPool,
    club: &Club,
    opposition: &Opposition,
    match_date: NaiveDate,
    start_time: NaiveTime,
    venue: &str,
    is_home: bool,
    fee_pence: Option<i64>,
) -> Result<Match> {
    let venue = resolved_venue(venue, is_home, club, opposition);
    let fee = fee_pence.unwrap_or(club.default_fee_pence);

    sqlx::query_as::<_, Match>(
        r#"INSERT INTO matches (club_id, opposition_id, match_date, start_time, venue,
                                is_home, fee_pence, status)
           VALUES ($1, $2, $3, $4, $5, $6, $7, 'scheduled')
           RETURNING id, club_id, opposition_id, match_date, start_time, venue, is_home,
                     fee_pence, status, created_at"#,
    )
    .bind(club.id)
    .bind(opposition.id)
    .bind(match_date)
    .bind(start_time)
    .bind(venue)
    .bind(is_home)
    .bind(fee)
    .fetch_one(db)
    .await
    .context("inserting match")
}

/// Edit a fixture. Venue is stored exactly as supplied — the fill rule is
/// a creation-time convenience only.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    db: &PgPool,
    id: Uuid,
    opposition_id: Uuid,
    match_date: NaiveDate,
    start_time: NaiveTime,
    venue: &str,
    is_home: bool,
    fee_pence: i64,
    status: MatchStatus,
) -> Result<bool> {
    let rows = sqlx::query(
        r#"UPDATE matches
              SET opposition_id = $2, match_date = $3, start_time = $4, venue = $5,
                  is_home = $6, fee_pence = $7, status = $8
            WHERE id = $1"#,
    )
    .bind(id)
    .bind(opposition_id)
    .bind(match_date)
    .bind(start_time)
    .bind(venue)
    .bind(is_home)
    .bind(fee_pence)
    .bind(status)
    .execute(db)
    .await
    .context("updating match")?
    .rows_affected();
    Ok(rows > 0)
}

/// Remove a fixture and its responses, transactionally.
pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool> {
    let mut tx = db.begin().await.context("begin match delete")?;

    sqlx::query("DELETE FROM match_responses WHERE match_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting match responses")?;

    let rows = sqlx::query("DELETE FROM matches WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting match")?
        .rows_affected();

    tx.commit().await.context("commit match delete")?;
    Ok(rows > 0)
}
