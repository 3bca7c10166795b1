use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiSuccess<MessageResponseData> {
    let ack = state.session_service.logout(&user).await;
    ApiSuccess::new(StatusCode::OK, ack.into())
}
