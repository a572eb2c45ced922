use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Opposition;

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<Opposition>> {
    sqlx::query_as::<_, Opposition>(
        "SELECT id, club_id, name, home_ground, created_at FROM oppositions WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching opposition")
}

pub async fn of_club(db: &PgPool, club: Uuid) -> Result<Vec<Opposition>> {
    sqlx::query_as::<_, Opposition>(
        "SELECT id, club_id, name, home_ground, created_at
           FROM oppositions WHERE club_id = $1 ORDER BY name",
    )
    .bind(club)
    .fetch_all(db)
    .await
    .context("listing oppositions")
}

pub async fn create(db: &PgPool, club: Uuid, name: &str, home_ground: &str) -> Result<Opposition> {
    sqlx::query_as::<_, Opposition>(
        r#"INSERT INTO oppositions (club_id, name, home_ground)
           VALUES ($1, $2, $3)
           RETURNING id, club_id, name, home_ground, created_at"#,
    )
    .bind(club)
    .bind(name)
    .bind(home_ground)
    .fetch_one(db)
    .await
    .context("inserting opposition")
}

pub async fn update(db: &PgPool, id: Uuid, name: &str, home_ground: &str) -> Result<bool> {
    let rows = sqlx::query("UPDATE oppositions SET name = $2, home_ground = $3 WHERE id = $1")
        .bind(id)
        .bind(name)
        .bind(home_ground)
        .execute(db)
        .await
        .context("updating opposition")?
        .rows_affected();
    Ok(rows > 0)
}

/// Remove an opposition together with its fixtures and their responses.
pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool> {
    let mut tx = db.begin().await.context("begin opposition delete")?;

    sqlx::query(
        "DELETE FROM match_responses
          WHERE match_id IN (SELECT id FROM matches WHERE opposition_id = $1)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("deleting opposition match responses")?;

    sqlx::query("DELETE FROM matches WHERE opposition_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting opposition matches")?;

    let rows = sqlx::query("DELETE FROM oppositions WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("deleting opposition")?
        .rows_affected();

    tx.commit().await.context("commit opposition delete")?;
    Ok(rows > 0)
}
