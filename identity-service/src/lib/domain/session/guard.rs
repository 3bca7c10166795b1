use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenCodec;
use auth::TokenType;

use crate::domain::session::errors::AuthError;
use crate::domain::session::ports::AccessGuardPort;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Flat role-set membership. No role implies another.
pub fn role_permits(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

/// Resolves callers from access tokens and enforces role membership.
///
/// The store is authoritative: the role and email embedded in the token are
/// not used for the decision, the user is fetched again on every call.
pub struct AccessGuard<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    codec: Arc<TokenCodec>,
}

impl<UR> AccessGuard<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, codec: Arc<TokenCodec>) -> Self {
        Self { repository, codec }
    }
}

#[async_trait]
impl<UR> AccessGuardPort for AccessGuard<UR>
where
    UR: UserRepository,
{
    async fn resolve_identity(&self, bearer_token: &str) -> Result<User, AuthError> {
        let claims = self
            .codec
            .parse(bearer_token, TokenType::Access)
            .map_err(|e| {
                if let Some(reason) = e.reason() {
                    tracing::debug!(reason = %reason, "Access token rejected");
                }
                AuthError::Unauthorized
            })?;

        let user_id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::debug!(error = %e, "Access token subject is not a user id");
            AuthError::Unauthorized
        })?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Inactive user presented an access token");
            return Err(AuthError::Forbidden);
        }

        Ok(user)
    }

    fn require_role(&self, user: &User, allowed: &[Role]) -> Result<(), AuthError> {
        if role_permits(user.role, allowed) {
            Ok(())
        } else {
            tracing::info!(user_id = %user.id, role = %user.role, "Role not permitted");
            Err(AuthError::Forbidden)
        }
    }
}
