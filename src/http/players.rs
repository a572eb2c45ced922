//! Roster management (create / list / update / delete)

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Role;
use crate::db::{club_repo, player_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::http::auth::JwtAuth;
use crate::http::{require_admin_or_captain, require_member};

//////////////////////////////////////////////////
// Requests
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct PlayerReq {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

//////////////////////////////////////////////////
// Handlers
//////////////////////////////////////////////////

/// POST /api/clubs/{club_id}/players/create
#[post("/clubs/{club_id}/players/create")]
pub async fn create(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<PlayerReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let club_id = path.into_inner();
    club_repo::get(&db, club_id)
        .await?
        .ok_or(ServiceError::NotFound("club"))?;
    require_admin_or_captain(&db, club_id, auth.account_id).await?;

    if info.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("player name is required".into()));
    }

    let player = player_repo::create(
        &db,
        club_id,
        info.name.trim(),
        &info.email,
        &info.phone,
        info.role,
        info.is_active,
    )
    .await?;
    Ok(HttpResponse::Ok().json(player))
}

/// GET /api/clubs/{club_id}/players
#[get("/clubs/{club_id}/players")]
pub async fn list(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let club_id = path.into_inner();
    club_repo::get(&db, club_id)
        .await?
        .ok_or(ServiceError::NotFound("club"))?;
    require_member(&db, club_id, auth.account_id).await?;

    let players = player_repo::players_of_club(&db, club_id).await?;
    Ok(HttpResponse::Ok().json(players))
}

/// POST /api/players/{id}/update — the owning club never changes.
#[post("/players/{id}/update")]
pub async fn update(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<PlayerReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let player = player_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("player"))?;
    require_admin_or_captain(&db, player.club_id, auth.account_id).await?;

    if info.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("player name is required".into()));
    }

    player_repo::update(
        &db,
        id,
        info.name.trim(),
        &info.email,
        &info.phone,
        info.role,
        info.is_active,
    )
    .await?;
    Ok(HttpResponse::Ok().body("updated"))
}

/// POST /api/players/{id}/delete
#[post("/players/{id}/delete")]
pub async fn delete(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let player = player_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("player"))?;
    require_admin_or_captain(&db, player.club_id, auth.account_id).await?;

    player_repo::delete(&db, id).await?;
    Ok(HttpResponse::Ok().body("deleted"))
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(list)
        .service(update)
        .service(delete);
}
