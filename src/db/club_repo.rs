use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Account, Club};

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<Club>> {
    sqlx::query_as::<_, Club>(
        "SELECT id, name, home_ground, default_fee_pence, created_by, created_at
           FROM clubs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching club")
}

/// Clubs in which the account has an active linked roster entry.
pub async fn clubs_for_account(db: &PgPool, account: Uuid) -> Result<Vec<Club>> {
    sqlx::query_as::<_, Club>(
        r#"SELECT DISTINCT c.id, c.name, c.home_ground, c.default_fee_pence,
                  c.created_by, c.created_at
             FROM clubs c
             JOIN players p ON p.club_id = c.id
            WHERE p.account_id = $1
              AND p.is_active
            ORDER BY c.name"#,
    )
    .bind(account)
    .fetch_all(db)
    .await
    .context("listing clubs for account")
}

/// True iff an active player of the club, linked to this account, holds
/// the admin or captain role.
pub async fn is_admin_or_captain(db: &PgPool, club: Uuid, account: Uuid) -> Result<bool> {
    Ok(sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(
               SELECT 1
                 FROM players
                WHERE club_id    = $1
                  AND account_id = $2
                  AND is_active
                  AND role IN ('admin', 'captain')
           )"#,
    )
    .bind(club)
    .bind(account)
    .fetch_one(db)
    .await
    .context("checking club privilege")?)
}

/// True iff the account is linked to any active player of the club.
pub async fn is_member(db: &PgPool, club: Uuid, account: Uuid) -> Result<bool> {
    Ok(sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(
               SELECT 1
                 FROM players
                WHERE club_id    = $1
                  AND account_id = $2
                  AND is_active
           )"#,
    )
    .bind(club)
    .bind(account)
    .fetch_one(db)
    .await
    .context("checking club membership")?)
}

/// Create a club and enrol its creator as the first admin player, in one
/// transaction. The founder's roster name is their email local part.
pub async fn create(
    db: &PgPool,
    name: &str,
    home_ground: &str,
    default_fee_pence: i64,
    creator: Uuid,
) -> Result<Club> {
    let mut tx = db.begin().await.context("begin club create")?;

    let account: Account =
        sqlx::query_as::<_, Account>("SELECT id, email, created_at FROM accounts WHERE id = $1")
            .bind(creator)
            .fetch_one(&mut *tx)
            .await
            .context("fetching creator account")?;

    let club = sqlx::query_as::<_, Club>(
        r#"INSERT INTO clubs (name, home_ground, default_fee_pence, created_by)
           VALUES ($1, $2, $3, $4)
           RETURNING id, name, home_ground, default_fee_pence, created_by, created_at"#,
    )
    .bind(name)
    .bind(home_ground)
    .bind(default_fee_pence)
    .bind(creator)
    .fetch_one(&mut *tx)
    .await
    .context("inserting club")?;

    let founder_name = account.email.split('@').next().unwrap_or("admin");
    sqlx::query(
        r#"INSERT INTO players (club_id, account_id, name, email, phone, role, is_active)
           VALUES ($1, $2, $3, $4, '', 'admin', TRUE)"#,
    )
    .bind(club.id)
    .bind(account.id)
    .bind(founder_name)
    .bind(&account.email)
    .execute(&mut *tx)
    .await
    .context("enrolling founder admin")?;

    tx.commit().await.context("commit club create")?;
    Ok(club)
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    name: &str,
    home_ground: &str,
    default_fee_pence: i64,
) -> Result<bool> {
    let rows = sqlx::query(
        "UPDATE clubs SET name = $2, home_ground = $3, default_fee_pence = $4 WHERE id = $1",
    )
    .bind(id)
    .bind(name)
    .bind(home_ground)
    .bind(default_fee_pence)
    .execute(db)
    .await
    .context("updating club")?
    .rows_affected();
    Ok(rows > 0)
}

/// Delete a club and everything it owns: responses, matches, oppositions,
/// players. One transaction; the ownership graph is spelled out here
/// rather than hidden in FK cascade rules.
pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool> {
    let mut tx = db.begin().await.context("begin club delete")?;

    sqlx::query(
        "DELETE FROM match_responses
          WHERE match_id IN (SELECT id FROM matches WHERE club_id = $1)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("deleting club match responses")?;

    sqlx::query("DELETE FROM matches WHERE club_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting club matches")?;

    sqlx::query("DELETE FROM oppositions WHERE club_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting club oppositions")?;

    sqlx::query("DELETE FROM players WHERE club_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting club players")?;

    let rows = sqlx::query("DELETE FROM clubs WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting club")?
        .rows_affected();

    tx.commit().await.context("commit club delete")?;
    Ok(rows > 0)
}
