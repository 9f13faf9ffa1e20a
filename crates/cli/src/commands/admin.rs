//! Admin role management.
//!
//! The first admin has to come from somewhere: role grants over the API
//! require an existing admin, so operators bootstrap one here.

use bistro_core::UserRole;

use bistro_api::db::{PgStore, Store};

use super::CliError;

/// Grant the admin role to the user registered under `email`.
///
/// # Errors
///
/// Returns `CliError::UnknownUser` if no user is registered with that email,
/// or a database error if the lookup or update fails.
pub async fn grant(email: &str) -> Result<(), CliError> {
    let store = PgStore::new(super::connect().await?);

    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| CliError::UnknownUser(email.to_owned()))?;

    store.set_user_role(user.id, UserRole::Admin).await?;

    tracing::info!("Granted admin role to {} ({})", user.name, user.email);
    Ok(())
}
