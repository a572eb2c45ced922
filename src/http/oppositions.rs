//! Opposition management (create / list / update / delete)

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{club_repo, opposition_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::http::auth::JwtAuth;
use crate::http::{require_admin_or_captain, require_member};

#[derive(Deserialize)]
pub struct OppositionReq {
    pub name: String,
    #[serde(default)]
    pub home_ground: String,
}

/// POST /api/clubs/{club_id}/oppositions/create
#[post("/clubs/{club_id}/oppositions/create")]
pub async fn create(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<OppositionReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let club_id = path.into_inner();
    club_repo::get(&db, club_id)
        .await?
        .ok_or(ServiceError::NotFound("club"))?;
    require_admin_or_captain(&db, club_id, auth.account_id).await?;

    if info.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "opposition name is required".into(),
        ));
    }

    let opposition =
        opposition_repo::create(&db, club_id, info.name.trim(), &info.home_ground).await?;
    Ok(HttpResponse::Ok().json(opposition))
}

/// GET /api/clubs/{club_id}/oppositions
#[get("/clubs/{club_id}/oppositions")]
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

    let oppositions = opposition_repo::of_club(&db, club_id).await?;
    Ok(HttpResponse::Ok().json(oppositions))
}

/// POST /api/oppositions/{id}/update
#[post("/oppositions/{id}/update")]
pub async fn update(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<OppositionReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let opposition = opposition_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("opposition"))?;
    require_admin_or_captain(&db, opposition.club_id, auth.account_id).await?;

    if info.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "opposition name is required".into(),
        ));
    }

    opposition_repo::update(&db, id, info.name.trim(), &info.home_ground).await?;
    Ok(HttpResponse::Ok().body("updated"))
}

/// POST /api/oppositions/{id}/delete — takes its fixtures with it.
#[post("/oppositions/{id}/delete")]
pub async fn delete(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let opposition = opposition_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("opposition"))?;
    require_admin_or_captain(&db, opposition.club_id, auth.account_id).await?;

    opposition_repo::delete(&db, id).await?;
    Ok(HttpResponse::Ok().body("deleted"))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(list)
        .service(update)
        .service(delete);
}
