pub mod auth;
pub mod clubs;
pub mod health;
pub mod matches;
pub mod oppositions;
pub mod players;
pub mod routes;
pub mod selection;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::club_repo;
use crate::error::{ServiceError, ServiceResult};

/// Boundary guard: the account must hold admin or captain in the club.
/// Repositories and the selection engine never re-check this.
pub(crate) async fn require_admin_or_captain(
    db: &PgPool,
    club: Uuid,
    account: Uuid,
) -> ServiceResult<()> {
    if club_repo::is_admin_or_captain(db, club, account).await? {
        Ok(())
    } else {
        Err(ServiceError::PermissionDenied(
            "requires club admin or captain",
        ))
    }
}

/// Boundary guard: the account must be linked to an active player of the
/// club.
pub(crate) async fn require_member(db: &PgPool, club: Uuid, account: Uuid) -> ServiceResult<()> {
    if club_repo::is_member(db, club, account).await? {
        Ok(())
    } else {
        Err(ServiceError::PermissionDenied("not a member of this club"))
    }
}
