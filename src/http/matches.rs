//! Fixture management (create / list / detail / update / delete)

use std::collections::HashMap;

use actix_web::{get, post, web, HttpResponse};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Match, MatchStatus};
use crate::db::{club_repo, match_repo, opposition_repo, response_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::http::auth::JwtAuth;
use crate::http::{require_admin_or_captain, require_member};
use crate::selection::{tally, MatchCounts, ResponseState};

//////////////////////////////////////////////////
// Data transfer objects
//////////////////////////////////////////////////

/// One row of the club fixture list: the match plus its disjoint
/// dashboard counts (selected players are subtracted out of the
/// available/maybe tallies).
#[derive(Serialize)]
pub struct MatchListEntry {
    pub fixture: Match,
    pub counts: MatchCounts,
}

//////////////////////////////////////////////////
// Requests
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct MatchCreateReq {
    pub opposition_id: Uuid,
    pub match_date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub venue: String,
    pub is_home: bool,
    pub fee_pence: Option<i64>,
}

#[derive(Deserialize)]
pub struct MatchUpdateReq {
    pub opposition_id: Uuid,
    pub match_date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub venue: String,
    pub is_home: bool,
    pub fee_pence: i64,
    pub status: MatchStatus,
}

fn validate_fee(fee_pence: i64) -> ServiceResult<()> {
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

/// POST /api/clubs/{club_id}/matches/create
#[post("/clubs/{club_id}/matches/create")]
pub async fn create(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<MatchCreateReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let club_id = path.into_inner();
    let club = club_repo::get(&db, club_id)
        .await?
        .ok_or(ServiceError::NotFound("club"))?;
    require_admin_or_captain(&db, club_id, auth.account_id).await?;

    let opposition = opposition_repo::get(&db, info.opposition_id)
        .await?
        .ok_or(ServiceError::NotFound("opposition"))?;
    if opposition.club_id != club.id {
        return Err(ServiceError::InvalidInput(
            "opposition belongs to another club".into(),
        ));
    }
    if let Some(fee) = info.fee_pence {
        validate_fee(fee)?;
    }

    let fixture = match_repo::create(
        &db,
        &club,
        &opposition,
        info.match_date,
        info.start_time,
        &info.venue,
        info.is_home,
        info.fee_pence,
    )
    .await?;
    Ok(HttpResponse::Ok().json(fixture))
}

/// GET /api/clubs/{club_id}/matches — fixtures with response counts.
#[get("/clubs/{club_id}/matches")]
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

    let fixtures = match_repo::of_club(&db, club_id).await?;
    let responses = response_repo::for_club_matches(&db, club_id).await?;

    let mut by_match: HashMap<Uuid, Vec<ResponseState>> = HashMap::new();
    for r in &responses {
        by_match.entry(r.match_id).or_default().push(ResponseState {
            availability: r.availability,
            selected: r.selected,
        });
    }

    let rows: Vec<MatchListEntry> = fixtures
        .into_iter()
        .map(|fixture| {
            let counts = by_match
                .get(&fixture.id)
                .map(|states| tally(states))
                .unwrap_or_default();
            MatchListEntry { fixture, counts }
        })
        .collect();
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/matches/{id}
#[get("/matches/{id}")]
pub async fn detail(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let fixture = match_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("match"))?;
    require_member(&db, fixture.club_id, auth.account_id).await?;
    Ok(HttpResponse::Ok().json(fixture))
}

/// POST /api/matches/{id}/update — the venue fill rule never re-applies.
#[post("/matches/{id}/update")]
pub async fn update(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<MatchUpdateReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let fixture = match_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("match"))?;
    require_admin_or_captain(&db, fixture.club_id, auth.account_id).await?;

    let opposition = opposition_repo::get(&db, info.opposition_id)
        .await?
        .ok_or(ServiceError::NotFound("opposition"))?;
    if opposition.club_id != fixture.club_id {
        return Err(ServiceError::InvalidInput(
            "opposition belongs to another club".into(),
        ));
    }
    validate_fee(info.fee_pence)?;

    match_repo::update(
        &db,
        id,
        info.opposition_id,
        info.match_date,
        info.start_time,
        &info.venue,
        info.is_home,
        info.fee_pence,
        info.status,
    )
    .await?;
    Ok(HttpResponse::Ok().body("updated"))
}

/// POST /api/matches/{id}/delete
#[post("/matches/{id}/delete")]
pub async fn delete(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let id = path.into_inner();
    let fixture = match_repo::get(&db, id)
        .await?
        .ok_or(ServiceError::NotFound("match"))?;
    require_admin_or_captain(&db, fixture.club_id, auth.account_id).await?;

    match_repo::delete(&db, id).await?;
    Ok(HttpResponse::Ok().body("deleted"))
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(list)
        .service(detail)
        .service(update)
        .service(delete);
}
