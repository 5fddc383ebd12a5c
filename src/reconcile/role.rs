//! Role grant reconciliation.

use crate::error::ReconcileResult;
use crate::ids::RoleId;
use crate::matcher::find_by_name;
use crate::reconcile::tenant::get_tenant;
use crate::reconcile::user::get_user;
use crate::traits::{RoleOps, TenantOps, UserOps};
use crate::types::Role;

/// Look up a role definition by name in the role catalog.
pub async fn get_role<C>(client: &C, name: &str) -> ReconcileResult<Option<Role>>
where
    C: RoleOps + ?Sized,
{
    let roles = client.list_roles().await?;
    Ok(find_by_name(&roles, name).cloned())
}

/// Ensure `user_name` holds `role_name` within `tenant_name`.
///
/// Both the user and the tenant must already exist (their reconcilers run
/// first); a missing prerequisite fails with the matching not-found error,
/// in check mode too. When the grant is missing, the role definition
/// itself is created first if the catalog does not carry it yet, then
/// granted.
pub async fn ensure_role_exists<C>(
    client: &C,
    user_name: &str,
    tenant_name: &str,
    role_name: &str,
    check_mode: bool,
) -> ReconcileResult<(bool, Option<RoleId>)>
where
    C: TenantOps + UserOps + RoleOps + ?Sized,
{
    let user = get_user(client, user_name).await?;
    let tenant = get_tenant(client, tenant_name).await?;

    let granted = client.roles_for_user(&user.id, &tenant.id).await?;
    if let Some(existing) = find_by_name(&granted, role_name) {
        tracing::debug!(
            user = %user_name,
            tenant = %tenant_name,
            role = %role_name,
            role_id = %existing.id,
            "Role already granted"
        );
        return Ok((false, Some(existing.id.clone())));
    }

    if check_mode {
        return Ok((true, None));
    }

    let role = match get_role(client, role_name).await? {
        Some(role) => role,
        None => {
            let created = client.create_role(role_name).await?;
            tracing::info!(role = %role_name, role_id = %created.id, "Created role definition");
            created
        }
    };

    client.grant_role(&user.id, &tenant.id, &role.id).await?;
    tracing::info!(
        user = %user_name,
        tenant = %tenant_name,
        role = %role_name,
        role_id = %role.id,
        "Granted role"
    );
    Ok((true, Some(role.id)))
}
