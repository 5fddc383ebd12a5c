//! User reconciliation.

use crate::error::{ReconcileError, ReconcileResult};
use crate::ids::UserId;
use crate::matcher::find_by_name;
use crate::reconcile::tenant::get_tenant;
use crate::traits::{TenantOps, UserOps};
use crate::types::User;

/// Look up a user by name, failing when it does not exist.
pub async fn get_user<C>(client: &C, name: &str) -> ReconcileResult<User>
where
    C: UserOps + ?Sized,
{
    let users = client.list_users().await?;
    find_by_name(&users, name)
        .cloned()
        .ok_or_else(|| ReconcileError::user_not_found(name))
}

/// Ensure a user with the given name exists, bound to `tenant_name`.
///
/// The tenant must already exist (the tenant reconciler runs first);
/// otherwise this fails with
/// [`TenantNotFound`](crate::error::ReconcileError::TenantNotFound), in
/// check mode too. Existence by name is authoritative: password and email
/// drift on an existing user is not detected or corrected, since the
/// remote never returns the password.
pub async fn ensure_user_exists<C>(
    client: &C,
    user_name: &str,
    password: &str,
    email: &str,
    tenant_name: &str,
    check_mode: bool,
) -> ReconcileResult<(bool, Option<UserId>)>
where
    C: TenantOps + UserOps + ?Sized,
{
    let tenant = get_tenant(client, tenant_name).await?;

    let users = client.list_users().await?;
    if let Some(existing) = find_by_name(&users, user_name) {
        tracing::debug!(name = %user_name, user_id = %existing.id, "User already present");
        return Ok((false, Some(existing.id.clone())));
    }

    if check_mode {
        return Ok((true, None));
    }

    let created = client
        .create_user(user_name, password, email, &tenant.id)
        .await?;
    tracing::info!(
        name = %user_name,
        tenant = %tenant_name,
        user_id = %created.id,
        "Created user"
    );
    Ok((true, Some(created.id)))
}
