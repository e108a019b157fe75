use crate::api::AppState;
use crate::api::schemas::notifications::{DispatchResponse, SendBulkNotificationRequest, SendNotificationRequest};
use crate::error::{AppError, Result};
use axum::{Json, extract::State, response::IntoResponse};

/// Sends a notification to every device of one user.
///
/// # Errors
/// Returns `AppError::BadRequest` if the payload is invalid.
/// Returns `AppError::NoTokensFound` if the user has no registered devices.
/// Returns `AppError::Database` if the token lookup fails.
pub async fn send_to_user(
    State(state): State<AppState>,
    Json(payload): Json<SendNotificationRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;
    let (user_id, request) = payload.into_parts();

    let outcome = state.dispatch_service.dispatch_to_user(&user_id, &request).await?;

    Ok(Json(DispatchResponse::from(outcome)))
}

/// Sends a notification to every device of many users.
///
/// # Errors
/// Returns `AppError::BadRequest` if the payload is invalid.
/// Returns `AppError::NoTokensFound` if none of the users have registered devices.
/// Returns `AppError::Database` if the token lookup fails.
pub async fn send_to_users(
    State(state): State<AppState>,
    Json(payload): Json<SendBulkNotificationRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;
    let (user_ids, request) = payload.into_parts();

    let outcome = state.dispatch_service.dispatch_to_users(&user_ids, &request).await?;

    Ok(Json(DispatchResponse::from(outcome)))
}
