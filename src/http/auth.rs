//! Magic-link authentication (JWT + refresh)
//!
//! Verification also performs roster linkage: every unlinked player whose
//! email matches the verified address is attached to the account.

use actix_web::{get, post, web, HttpResponse};
use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

use crate::config::settings;
use crate::db::player_repo;
use crate::error::{ServiceError, ServiceResult};

//////////////////////////////////////////////////
// Data structs
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // account_id
    exp: usize,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

//////////////////////////////////////////////////
// ─────────────  JwtAuth extractor  ─────────────
//////////////////////////////////////////////////

pub mod extractor {
    use super::Claims;
    use actix_web::{
        dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest, Result as ActixResult,
    };
    use futures_util::future::{ready, Ready};
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use std::env;
    use uuid::Uuid;

    /// Extracts and validates a Bearer-JWT, exposing the account UUID.
    #[derive(Debug, Clone)]
    pub struct JwtAuth {
        pub account_id: Uuid,
    }

    impl FromRequest for JwtAuth {
        type Error = actix_web::Error;
        type Future = Ready<ActixResult<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
            let res = (|| {
                // Expect:  Authorization: Bearer <JWT>
                let hdr = req
                    .headers()
                    .get("Authorization")
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| ErrorUnauthorized("missing Authorization header"))?;

                let token = hdr
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| ErrorUnauthorized("malformed Authorization header"))?;

                let secret =
                    env::var("JWT_SECRET").map_err(|_| ErrorUnauthorized("server mis-config"))?;
                let data = decode::<Claims>(
                    token,
                    &DecodingKey::from_secret(secret.as_bytes()),
                    &Validation::default(),
                )
                .map_err(|_| ErrorUnauthorized("invalid / expired token"))?;

                let account_id =
                    Uuid::parse_str(&data.claims.sub).map_err(|_| ErrorUnauthorized("bad sub"))?;

                Ok(JwtAuth { account_id })
            })();

            ready(res)
        }
    }
}
pub use extractor::JwtAuth; // <-- makes path crate::http::auth::JwtAuth work

/// Sign a short-lived access token for the account.
fn issue_access_token(account_id: Uuid) -> ServiceResult<(String, i64)> {
    let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let ttl = settings().access_token_ttl;
    let exp = (Utc::now() + Duration::minutes(ttl)).timestamp() as usize;
    let claims = Claims {
        sub: account_id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("signing access token")?;
    Ok((token, ttl * 60))
}

//////////////////////////////////////////////////
// POST /api/magic_link
//////////////////////////////////////////////////
#[post("/magic_link")]
pub async fn magic_link(
    info: web::Json<MagicLinkRequest>,
    redis: web::Data<RedisClient>,
) -> ServiceResult<HttpResponse> {
    if !info.email.contains('@') {
        return Err(ServiceError::InvalidInput("not an email address".into()));
    }

    let token = Uuid::new_v4().to_string();
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .context("redis unavailable")?;
    let _: () = conn
        .set_ex(&token, &info.email, settings().magic_link_ttl)
        .await
        .context("storing magic link")?;

    log::info!(
        "Magic link for {}:\n  https://your-domain.com/api/verify?token={}",
        info.email,
        token
    );
    Ok(HttpResponse::Ok().body("Magic link sent; check your email"))
}

//////////////////////////////////////////////////
// GET /api/verify
//////////////////////////////////////////////////
#[get("/verify")]
pub async fn verify(
    query: web::Query<VerifyQuery>,
    redis: web::Data<RedisClient>,
    db: web::Data<PgPool>,
) -> ServiceResult<HttpResponse> {
    // 1) resolve token → email
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .context("redis unavailable")?;
    let email: String = match conn
        .get::<_, Option<String>>(&query.token)
        .await
        .context("reading magic link")?
    {
        Some(e) => {
            let _: () = conn.del(&query.token).await.unwrap_or(());
            e
        }
        None => {
            return Err(ServiceError::InvalidInput(
                "invalid or expired token".into(),
            ))
        }
    };

    // 2) upsert account
    let account_id: Uuid = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO accounts (email)
           VALUES ($1)
           ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
           RETURNING id"#,
    )
    .bind(&email)
    .fetch_one(&**db)
    .await
    .context("upserting account")?;

    // 3) attach any unlinked roster entries with this address
    let linked = player_repo::link_players_to_account(&db, account_id, &email).await?;
    if linked > 0 {
        log::info!("linked {linked} roster entries to {email}");
    }

    // 4) presence key
    let presence = format!("session:{account_id}");
    let _: () = conn
        .set_ex(&presence, "1", settings().presence_ttl)
        .await
        .unwrap_or(());

    // 5) issue JWT
    let (access_token, expires_in) = issue_access_token(account_id)?;

    // 6) store refresh token
    let refresh_token = Uuid::new_v4().to_string();
    let refresh_key = format!("refresh:{refresh_token}");
    let refresh_ttl = settings().refresh_token_ttl as u64 * 24 * 3_600;
    let _: () = conn
        .set_ex(&refresh_key, account_id.to_string(), refresh_ttl)
        .await
        .context("storing refresh token")?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token,
        expires_in,
    }))
}

//////////////////////////////////////////////////
// POST /api/refresh
//////////////////////////////////////////////////
#[post("/refresh")]
pub async fn refresh(
    info: web::Json<RefreshRequest>,
    redis: web::Data<RedisClient>,
) -> ServiceResult<HttpResponse> {
    // 1) consume old refresh → account_id
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .context("redis unavailable")?;
    let key = format!("refresh:{}", info.refresh_token);
    let account_id_str: String = match conn
        .get::<_, Option<String>>(&key)
        .await
        .context("reading refresh token")?
    {
        Some(v) => {
            let _: () = conn.del(&key).await.unwrap_or(());
            v
        }
        None => return Err(ServiceError::PermissionDenied("invalid refresh token")),
    };
    let account_id = Uuid::parse_str(&account_id_str).context("decoding refresh token owner")?;

    // 2) refresh presence TTL
    let presence = format!("session:{account_id}");
    let _: () = conn
        .set_ex(&presence, "1", settings().presence_ttl)
        .await
        .unwrap_or(());

    // 3) new access token
    let (access_token, expires_in) = issue_access_token(account_id)?;

    // 4) mint new refresh
    let new_refresh = Uuid::new_v4().to_string();
    let refresh_key = format!("refresh:{new_refresh}");
    let refresh_ttl = settings().refresh_token_ttl as u64 * 24 * 3_600;
    let _: () = conn
        .set_ex(&refresh_key, account_id.to_string(), refresh_ttl)
        .await
        .context("storing refresh token")?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token: new_refresh,
        expires_in,
    }))
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(magic_link).service(verify).service(refresh);
}
