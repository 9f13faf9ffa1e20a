//! Session token route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use bistro_core::Email;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Request body for token issuance.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: Email,
}

/// Issued token response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a session token for the given identity.
///
/// The frontend calls this after its own login flow completes; the token
/// carries the email claim the guards check on later requests.
///
/// # Errors
///
/// Returns an error if signing fails.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    let token = state
        .tokens()
        .issue(body.email.as_str())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(TokenResponse { token }))
}
