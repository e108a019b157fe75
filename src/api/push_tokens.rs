use crate::api::AppState;
use crate::api::schemas::push_tokens::{
    DeviceListResponse, PushTokenResponse, RegisterPushTokenRequest, UnregisterPushTokenRequest, validate_user_id,
};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

/// Registers or refreshes a device token for a user.
///
/// # Errors
/// Returns `AppError::BadRequest` if the payload is invalid.
/// Returns `AppError::Database` if the token store is unavailable.
pub async fn register_token(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPushTokenRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;

    state
        .registration_service
        .register(&payload.user_id, payload.fcm_token.trim(), payload.device_info.as_deref())
        .await?;

    Ok(Json(PushTokenResponse { success: true, message: "Token registered".to_string() }))
}

/// Removes a device token from a user.
///
/// # Errors
/// Returns `AppError::BadRequest` if the payload is invalid.
/// Returns `AppError::Database` if the token store is unavailable.
pub async fn unregister_token(
    State(state): State<AppState>,
    Json(payload): Json<UnregisterPushTokenRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;

    state.registration_service.unregister(&payload.user_id, payload.fcm_token.trim()).await?;

    Ok(Json(PushTokenResponse { success: true, message: "Token removed".to_string() }))
}

/// Lists the devices registered for a user.
///
/// # Errors
/// Returns `AppError::BadRequest` if the user id is invalid.
/// Returns `AppError::Database` if the token store is unavailable.
pub async fn list_devices(State(state): State<AppState>, Path(user_id): Path<String>) -> Result<impl IntoResponse> {
    validate_user_id(&user_id).map_err(AppError::BadRequest)?;

    let devices = state.registration_service.list_devices(&user_id).await?;

    Ok(Json(DeviceListResponse { user_id, devices }))
}
