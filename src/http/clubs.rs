//! Club management (create / mine / detail / update / delete)

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Club, Player};
use crate::db::{club_repo, player_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::http::auth::JwtAuth;
use crate::http::{require_admin_or_captain, require_member};

/// Fee assumed when a new club doesn't name one: £10.00.
const DEFAULT_FEE_PENCE: i64 = 1_000;

//////////////////////////////////////////////////
// Data transfer objects
//////////////////////////////////////////////////

#[derive(Serialize)]
pub struct ClubDetail {
    pub club: Club,
    /// The caller's own roster entry in this club, when linked.
    pub current_player: Option<Player>,
}

//////////////////////////////////////////////////
// Requests
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct ClubReq {
    pub name: String,
    #[serde(default)]
    pub home_ground: String,
    pub default_fee_pence: Option<i64>,
}

fn validate(name: &str, fee_pence: i64) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("club name is required".into()));
    }
    if fee_pence < 0 {
        return Err(ServiceError::InvalidInput(
            "match fee cannot be negative".into(),
        ));
    }
    Ok(())
}

//////////////////////////////////////////////////
// Handlers
//////////////////////////////////////////////////

/// POST /api/clubs/create — the creator becomes the first admin player.
#[post("/clubs/create")]
pub async fn create(
    auth: JwtAuth,
    info: web::Json<ClubReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let fee = info.default_fee_pence.unwrap_or(DEFAULT_FEE_PENCE);
    validate(&info.name, fee)?;

    let club = club_repo::create(&db, info.name.trim(), &info.home_ground, fee, auth.account_id)
        .await?;
    Ok(HttpResponse::Ok().json(club))
}

/// GET /api/clubs/mine
#[get("/clubs/mine")]
pub async fn mine(auth: JwtAuth, db: web::Data<PgPool>) -> ServiceResult<HttpResponse> {
    let clubs = club_repo::clubs_for_account(&db, auth.account_id).await?;
    Ok(HttpResponse::Ok().json(clubs))
}

/// GET /api/clubs/{id}
#[get("/clubs/{id}")]
pub async fn detail(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let club = club_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("club"))?;
    require_member(&db, id, auth.account_id).await?;

    let current_player = player_repo::player_for_account(&db, id, auth.account_id).await?;
    Ok(HttpResponse::Ok().json(ClubDetail {
        club,
        current_player,
    }))
}

/// POST /api/clubs/{id}/update
#[post("/clubs/{id}/update")]
pub async fn update(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<ClubReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let club = club_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("club"))?;
    require_admin_or_captain(&db, id, auth.account_id).await?;

    let fee = info.default_fee_pence.unwrap_or(club.default_fee_pence);
    validate(&info.name, fee)?;

    club_repo::update(&db, id, info.name.trim(), &info.home_ground, fee).await?;
    Ok(HttpResponse::Ok().body("updated"))
}

/// POST /api/clubs/{id}/delete — cascades to the whole tenant.
#[post("/clubs/{id}/delete")]
pub async fn delete(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    club_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("club"))?;
    require_admin_or_captain(&db, id, auth.account_id).await?;

    club_repo::delete(&db, id).await?;
    log::info!("club {id} deleted by account {}", auth.account_id);
    Ok(HttpResponse::Ok().body("deleted"))
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // `mine` before `{id}` so the literal segment wins.
    cfg.service(create)
        .service(mine)
        .service(detail)
        .service(update)
        .service(delete);
}
