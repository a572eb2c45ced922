//! Availability & team-selection endpoints.
//!
//! Permission model: the two match-scoped editors are admin/captain-only;
//! the player-scoped operations also allow the subject player themself.
//! Team-membership actions always require admin/captain — self-service is
//! availability only.

use std::collections::HashMap;

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Match, Player};
use crate::db::{club_repo, match_repo, player_repo, response_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::http::auth::JwtAuth;
use crate::http::require_admin_or_captain;
use crate::selection::{
    build_sheet, not_responded, roster_responses, Availability, ResponseState, SelectionSheet,
    SheetEntry, SheetMode, TransitionAction,
};

//////////////////////////////////////////////////
// Data transfer objects
//////////////////////////////////////////////////

#[derive(Serialize)]
pub struct SheetResponse {
    pub sheet: SelectionSheet,
    /// Players with no response row at all, whichever field a row would
    /// have carried.
    pub not_responded: Vec<SheetEntry>,
}

/// One row of the per-player fixtures editor.
#[derive(Serialize)]
pub struct FixtureEntry {
    pub fixture: Match,
    pub availability: Option<Availability>,
    pub selected: bool,
    /// False when no response row exists yet — distinct from an unset
    /// availability on a row created by team selection.
    pub responded: bool,
    pub selected_count: usize,
}

//////////////////////////////////////////////////
// Requests
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct SetAvailabilityReq {
    pub player_id: Uuid,
    pub value: Availability,
}

#[derive(Deserialize)]
pub struct SquadReq {
    pub player_ids: Vec<Uuid>,
    pub action: TransitionAction,
}

#[derive(Deserialize)]
pub struct PlayerFixturesReq {
    pub match_ids: Vec<Uuid>,
    pub action: TransitionAction,
}

//////////////////////////////////////////////////
// Helpers
//////////////////////////////////////////////////

async fn sheet_for(db: &PgPool, fixture: &Match, mode: SheetMode) -> ServiceResult<SheetResponse> {
    let players = player_repo::active_players(db, fixture.club_id).await?;
    let responses = response_repo::for_match(db, fixture.id).await?;
    let roster = roster_responses(&players, &responses);
    Ok(SheetResponse {
        sheet: build_sheet(mode, &roster),
        not_responded: not_responded(&roster),
    })
}

/// Self-or-staff guard for player-scoped operations. Returns whether the
/// caller holds admin/captain (self-service callers get `false`).
async fn authorize_for_player(db: &PgPool, player: &Player, account: Uuid) -> ServiceResult<bool> {
    let is_staff = club_repo::is_admin_or_captain(db, player.club_id, account).await?;
    if !is_staff && player.account_id != Some(account) {
        return Err(ServiceError::PermissionDenied("not your player record"));
    }
    Ok(is_staff)
}

//////////////////////////////////////////////////
// Handlers
//////////////////////////////////////////////////

/// GET /api/matches/{id}/selection — selection trumps availability.
#[get("/matches/{id}/selection")]
pub async fn selection_sheet(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let fixture = match_repo::get(&db, path.into_inner())
        .await?
        .ok_or(ServiceError::NotFound("match"))?;
    require_admin_or_captain(&db, fixture.club_id, auth.account_id).await?;

    let body = sheet_for(&db, &fixture, SheetMode::TeamSelection).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/matches/{id}/availability — selected players stay in their
/// availability bucket here.
#[get("/matches/{id}/availability")]
pub async fn availability_sheet(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let fixture = match_repo::get(&db, path.into_inner())
        .await?
        .ok_or(ServiceError::NotFound("match"))?;
    require_admin_or_captain(&db, fixture.club_id, auth.account_id).await?;

    let body = sheet_for(&db, &fixture, SheetMode::BulkAvailability).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/matches/{id}/availability — record one player's answer.
#[post("/matches/{id}/availability")]
pub async fn set_availability(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<SetAvailabilityReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let fixture = match_repo::get(&db, path.into_inner())
        .await?
        .ok_or(ServiceError::NotFound("match"))?;
    let player = player_repo::get(&db, info.player_id)
        .await?
        .ok_or(ServiceError::NotFound("player"))?;
    if player.club_id != fixture.club_id {
        return Err(ServiceError::InvalidInput(
            "player is not in this match's club".into(),
        ));
    }
    authorize_for_player(&db, &player, auth.account_id).await?;

    response_repo::set_availability(&db, fixture.id, player.id, info.value).await?;
    Ok(HttpResponse::Ok().body("availability recorded"))
}

/// POST /api/matches/{id}/squad — bulk transition for one match.
#[post("/matches/{id}/squad")]
pub async fn apply_squad(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<SquadReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let fixture = match_repo::get(&db, path.into_inner())
        .await?
        .ok_or(ServiceError::NotFound("match"))?;
    require_admin_or_captain(&db, fixture.club_id, auth.account_id).await?;

    let affected = response_repo::apply_transition(
        &db,
        fixture.club_id,
        fixture.id,
        &info.player_ids,
        info.action,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "players_affected": affected })))
}

/// GET /api/players/{id}/fixtures — one player across all club fixtures.
#[get("/players/{id}/fixtures")]
pub async fn player_fixtures(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let player = player_repo::get(&db, path.into_inner())
        .await?
        .ok_or(ServiceError::NotFound("player"))?;
    authorize_for_player(&db, &player, auth.account_id).await?;

    let fixtures = match_repo::of_club(&db, player.club_id).await?;
    let responses = response_repo::for_club_matches(&db, player.club_id).await?;

    let mut selected_counts: HashMap<Uuid, usize> = HashMap::new();
    let mut own: HashMap<Uuid, ResponseState> = HashMap::new();
    for r in &responses {
        if r.selected {
            *selected_counts.entry(r.match_id).or_default() += 1;
        }
        if r.player_id == player.id {
            own.insert(
                r.match_id,
                ResponseState {
                    availability: r.availability,
                    selected: r.selected,
                },
            );
        }
    }

    let rows: Vec<FixtureEntry> = fixtures
        .into_iter()
        .map(|fixture| {
            let response = own.get(&fixture.id).copied();
            let state = response.unwrap_or_default();
            FixtureEntry {
                selected_count: selected_counts.get(&fixture.id).copied().unwrap_or(0),
                availability: state.availability,
                selected: state.selected,
                responded: response.is_some(),
                fixture,
            }
        })
        .collect();
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/players/{id}/fixtures — one action across many fixtures,
/// applied through the same per-match transition primitive.
#[post("/players/{id}/fixtures")]
pub async fn apply_player_fixtures(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<PlayerFixturesReq>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    let player = player_repo::get(&db, path.into_inner())
        .await?
        .ok_or(ServiceError::NotFound("player"))?;
    let is_staff = authorize_for_player(&db, &player, auth.account_id).await?;

    if !is_staff
        && matches!(
            info.action,
            TransitionAction::AddToTeam | TransitionAction::RemoveFromTeam
        )
    {
        return Err(ServiceError::PermissionDenied(
            "team selection requires admin or captain",
        ));
    }
    if info.match_ids.is_empty() {
        return Err(ServiceError::InvalidInput("no matches given".into()));
    }

    // Resolve and validate every fixture before the first write.
    let mut match_ids = info.match_ids.clone();
    match_ids.sort();
    match_ids.dedup();
    let mut fixtures = Vec::with_capacity(match_ids.len());
    for mid in match_ids {
        let fixture = match_repo::get(&db, mid)
            .await?
            .ok_or(ServiceError::NotFound("match"))?;
        if fixture.club_id != player.club_id {
            return Err(ServiceError::InvalidInput(format!(
                "match {mid} belongs to another club"
            )));
        }
        fixtures.push(fixture);
    }

    let mut affected = 0u64;
    for fixture in &fixtures {
        affected += response_repo::apply_transition(
            &db,
            fixture.club_id,
            fixture.id,
            &[player.id],
            info.action,
        )
        .await?;
    }
    Ok(HttpResponse::Ok().json(json!({ "matches_affected": affected })))
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(selection_sheet)
        .service(availability_sheet)
        .service(set_availability)
        .service(apply_squad)
        .service(player_fixtures)
        .service(apply_player_fixtures);
}
