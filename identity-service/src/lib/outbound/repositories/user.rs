use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::StoreError;

const USER_COLUMNS: &str = r#"
    id, email, username, password_hash, auth_provider, provider_user_id,
    profile_picture, role, is_active, is_verified, created_at, updated_at
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: String,
    password_hash: Option<String>,
    auth_provider: String,
    provider_user_id: Option<String>,
    profile_picture: Option<String>,
    role: String,
    is_active: bool,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            auth_provider: row.auth_provider.parse()?,
            provider_user_id: row.provider_user_id,
            profile_picture: row.profile_picture,
            role: row.role.parse()?,
            is_active: row.is_active,
            is_verified: row.is_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, email: &EmailAddress, username: &Username) -> StoreError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            unique_violation(db_err.constraint(), email, username)
        }
        _ => StoreError::Unavailable(e.to_string()),
    }
}

/// Unique violations are never retryable, whichever constraint fired.
fn unique_violation(
    constraint: Option<&str>,
    email: &EmailAddress,
    username: &Username,
) -> StoreError {
    match constraint {
        Some("users_username_key") => StoreError::DuplicateUsername(username.as_str().to_string()),
        Some("users_email_key") => StoreError::DuplicateEmail(email.as_str().to_string()),
        other => StoreError::InvalidRecord(format!(
            "unique constraint violated: {}",
            other.unwrap_or("unknown")
        )),
    }
}

fn map_read_error(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            r#"
            INSERT INTO users (id, email, username, password_hash, auth_provider, role, is_active, is_verified)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(UserId::new().0)
            .bind(user.email.as_str())
            .bind(user.username.as_str())
            .bind(user.password_hash.as_deref())
            .bind(user.auth_provider.as_str())
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.is_verified)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.email, &user.username))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM users
            WHERE ($1::BOOLEAN IS NULL OR is_active = $1)
            ORDER BY created_at DESC
            "#,
            USER_COLUMNS
        );

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(filter.is_active)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let query = format!(
            r#"
            UPDATE users
            SET email = $2, username = $3, password_hash = $4, role = $5,
                is_active = $6, is_verified = $7, profile_picture = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id.0)
            .bind(user.email.as_str())
            .bind(user.username.as_str())
            .bind(user.password_hash.as_deref())
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.is_verified)
            .bind(user.profile_picture.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.email, &user.username))?
            .ok_or_else(|| StoreError::NotFound(user.id.to_string()))?;

        row.try_into()
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<User, StoreError> {
        let query = format!(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        row.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::errors::AuthError;

    fn identity() -> (EmailAddress, Username) {
        (
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            Username::new("alice".to_string()).unwrap(),
        )
    }

    #[test]
    fn test_unique_violation_on_named_constraints() {
        let (email, username) = identity();

        assert_eq!(
            unique_violation(Some("users_email_key"), &email, &username),
            StoreError::DuplicateEmail("a@x.com".to_string())
        );
        assert_eq!(
            unique_violation(Some("users_username_key"), &email, &username),
            StoreError::DuplicateUsername("alice".to_string())
        );
    }

    #[test]
    fn test_unique_violation_on_other_constraint_is_not_retryable() {
        let (email, username) = identity();

        for constraint in [Some("users_pkey"), None] {
            let err = unique_violation(constraint, &email, &username);
            assert!(matches!(err, StoreError::InvalidRecord(_)));

            let auth_err = AuthError::from(err);
            assert!(matches!(auth_err, AuthError::Internal(_)));
            assert!(!auth_err.is_retryable());
        }
    }
}
