use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Player, Role};

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<Player>> {
    sqlx::query_as::<_, Player>(
        "SELECT id, club_id, account_id, name, email, phone, role, is_active, created_at
           FROM players WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching player")
}

/// The club's active roster, name order.
pub async fn active_players(db: &PgPool, club: Uuid) -> Result<Vec<Player>> {
    sqlx::query_as::<_, Player>(
        "SELECT id, club_id, account_id, name, email, phone, role, is_active, created_at
           FROM players WHERE club_id = $1 AND is_active ORDER BY name",
    )
    .bind(club)
    .fetch_all(db)
    .await
    .context("fetching active roster")
}

/// Every roster entry including inactive ones, for the management list.
pub async fn players_of_club(db: &PgPool, club: Uuid) -> Result<Vec<Player>> {
    sqlx::query_as::<_, Player>(
        "SELECT id, club_id, account_id, name, email, phone, role, is_active, created_at
           FROM players WHERE club_id = $1 ORDER BY name",
    )
    .bind(club)
    .fetch_all(db)
    .await
    .context("fetching club roster")
}

/// The account's roster entry inside one club, if linked.
pub async fn player_for_account(db: &PgPool, club: Uuid, account: Uuid) -> Result<Option<Player>> {
    sqlx::query_as::<_, Player>(
        "SELECT id, club_id, account_id, name, email, phone, role, is_active, created_at
           FROM players WHERE club_id = $1 AND account_id = $2",
    )
    .bind(club)
    .bind(account)
    .fetch_optional(db)
    .await
    .context("resolving player for account")
}

/// Insert a roster entry. A new player with an email is linked to an
/// existing account with the same address (case-insensitive) right away;
/// an already-linked address is never re-linked.
pub async fn create(
    db: &PgPool,
    club: Uuid,
    name: &str,
    email: &str,
    phone: &str,
    role: Role,
    is_active: bool,
) -> Result<Player> {
    let account_id: Option<Uuid> = if email.is_empty() {
        None
    } else {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM accounts WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(db)
            .await
            .context("matching player email to account")?
    };

    sqlx::query_as::<_, Player>(
        r#"INSERT INTO players (club_id, account_id, name, email, phone, role, is_active)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING id, club_id, account_id, name, email, phone, role, is_active, created_at"#,
    )
    .bind(club)
    .bind(account_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(is_active)
    .fetch_one(db)
    .await
    .context("inserting player")
}

/// Edit a roster entry. The owning club and any account linkage are
/// deliberately untouched.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    name: &str,
    email: &str,
    phone: &str,
    role: Role,
    is_active: bool,
) -> Result<bool> {
    let rows = sqlx::query(
        r#"UPDATE players
              SET name = $2, email = $3, phone = $4, role = $5, is_active = $6
            WHERE id = $1"#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(is_active)
    .execute(db)
    .await
    .context("updating player")?
    .rows_affected();
    Ok(rows > 0)
}

/// Remove a player and their match responses, transactionally.
pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool> {
    let mut tx = db.begin().await.context("begin player delete")?;

    sqlx::query("DELETE FROM match_responses WHERE player_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting player responses")?;

    let rows = sqlx::query("DELETE FROM players WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting player")?
        .rows_affected();

    tx.commit().await.context("commit player delete")?;
    Ok(rows > 0)
}

/// Link every unlinked roster entry whose email matches the freshly
/// verified account. Existing links are never overwritten.
pub async fn link_players_to_account(db: &PgPool, account: Uuid, email: &str) -> Result<u64> {
    let rows = sqlx::query(
        r#"UPDATE players
              SET account_id = $1
            WHERE lower(email) = lower($2)
              AND account_id IS NULL"#,
    )
    .bind(account)
    .bind(email)
    .execute(db)
    .await
    .context("linking players to account")?
    .rows_affected();
    Ok(rows)
}
