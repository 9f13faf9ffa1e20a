//! Authentication and authorization extractors.
//!
//! Guard failures short-circuit request handling before any persistence
//! mutation: `Identity` rejects without touching the store at all, and
//! `RequireAdmin` only ever performs the single user lookup its check
//! requires.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::User;
use crate::services::Claims;
use crate::state::AppState;

/// Extractor that requires a valid Bearer token (the authenticate guard).
///
/// Missing or malformed `Authorization` headers and invalid or expired
/// tokens all reject with 401. On success the decoded identity claim is
/// available to the handler.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(Identity(claims): Identity) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
#[derive(Debug)]
pub struct Identity(pub Claims);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthenticated("missing authorization header".to_owned()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthenticated("expected a bearer token".to_owned()))?;

        let claims = state.tokens().verify(token)?;

        Ok(Self(claims))
    }
}

/// Extractor that requires an authenticated admin (the authorize guard).
///
/// Authenticates first — it is constructed through [`Identity`], so it can
/// never observe a request the authenticate guard hasn't passed — then
/// looks up the user record for the claimed email. No record, or a record
/// without the admin role, rejects with 403.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Identity(claims) = Identity::from_request_parts(parts, state).await?;

        let user = state
            .store()
            .find_user_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::Forbidden("no such user".to_owned()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("admin role required".to_owned()));
        }

        Ok(Self(user))
    }
}

/// Route-specific ownership guard.
///
/// The authenticated email must equal the email the route addresses;
/// anything else is 403, regardless of whether matching records exist.
///
/// # Errors
///
/// Returns `AppError::Forbidden` on a mismatch.
pub fn require_owner(claims: &Claims, email: &str) -> Result<(), AppError> {
    if claims.email == email {
        Ok(())
    } else {
        Err(AppError::Forbidden("not the owner".to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    use super::*;
    use crate::test_support::{promote, register, test_state};

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/users");
        if let Some(v) = value {
            builder = builder.header("authorization", v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_identity_rejects_missing_header() {
        let state = test_state();
        let mut parts = parts_with_header(None);

        let err = Identity::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_identity_rejects_non_bearer_scheme() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));

        let err = Identity::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_identity_rejects_invalid_token() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Bearer not.a.token"));

        let err = Identity::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_identity_accepts_valid_token() {
        let state = test_state();
        let token = state.tokens().issue("diner@example.com").unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let Identity(claims) = Identity::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(claims.email, "diner@example.com");
    }

    #[tokio::test]
    async fn test_require_admin_rejects_unauthenticated_without_store_access() {
        let state = test_state();
        let mut parts = parts_with_header(None);

        let err = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        // Fails at the authenticate step: 401, not 403.
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_admin_rejects_unknown_user() {
        let state = test_state();
        let token = state.tokens().issue("ghost@example.com").unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let err = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_require_admin_rejects_regular_user() {
        let state = test_state();
        register(&state, "diner@example.com").await;

        let token = state.tokens().issue("diner@example.com").unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let err = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_require_admin_accepts_admin() {
        let state = test_state();
        register(&state, "chef@example.com").await;
        promote(&state, "chef@example.com").await;

        let token = state.tokens().issue("chef@example.com").unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let RequireAdmin(admin) = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(admin.is_admin());
        assert_eq!(admin.email.as_str(), "chef@example.com");
    }

    #[tokio::test]
    async fn test_require_owner() {
        let state = test_state();
        let token = state.tokens().issue("diner@example.com").unwrap();
        let claims = state.tokens().verify(&token).unwrap();

        assert!(require_owner(&claims, "diner@example.com").is_ok());

        let err = require_owner(&claims, "other@example.com").unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }
}
