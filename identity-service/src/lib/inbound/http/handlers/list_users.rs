use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::get_current_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserFilter;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<UserResponseData>>, ApiError> {
    let filter = UserFilter {
        is_active: query.is_active,
    };

    state
        .user_service
        .list_users(&caller, filter)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.iter().map(UserResponseData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    #[serde(rename = "isActive")]
    is_active: Option<bool>,
}
