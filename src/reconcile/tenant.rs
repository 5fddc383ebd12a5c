//! Tenant reconciliation.

use crate::error::{ReconcileError, ReconcileResult};
use crate::ids::TenantId;
use crate::matcher::find_by_name;
use crate::traits::TenantOps;
use crate::types::Tenant;

/// Look up a tenant by name, failing when it does not exist.
pub async fn get_tenant<C>(client: &C, name: &str) -> ReconcileResult<Tenant>
where
    C: TenantOps + ?Sized,
{
    let tenants = client.list_tenants().await?;
    find_by_name(&tenants, name)
        .cloned()
        .ok_or_else(|| ReconcileError::tenant_not_found(name))
}

/// Check whether a tenant named exactly `name` exists.
pub async fn tenant_exists<C>(client: &C, name: &str) -> ReconcileResult<bool>
where
    C: TenantOps + ?Sized,
{
    let tenants = client.list_tenants().await?;
    Ok(find_by_name(&tenants, name).is_some())
}

/// Ensure a tenant with the given name exists.
///
/// An existing tenant whose description differs from the desired one is
/// reported as `changed` with its current id, but no corrective call is
/// issued: the remote contract exercises no tenant update, so description
/// drift is surfaced rather than silently converged.
pub async fn ensure_tenant_exists<C>(
    client: &C,
    name: &str,
    description: &str,
    check_mode: bool,
) -> ReconcileResult<(bool, Option<TenantId>)>
where
    C: TenantOps + ?Sized,
{
    let tenants = client.list_tenants().await?;
    if let Some(existing) = find_by_name(&tenants, name) {
        if existing.description == description {
            tracing::debug!(name = %name, tenant_id = %existing.id, "Tenant already converged");
            return Ok((false, Some(existing.id.clone())));
        }
        tracing::info!(
            name = %name,
            tenant_id = %existing.id,
            "Tenant description drifted (no update issued)"
        );
        return Ok((true, Some(existing.id.clone())));
    }

    if check_mode {
        return Ok((true, None));
    }

    let created = client.create_tenant(name, description, true).await?;
    tracing::info!(name = %name, tenant_id = %created.id, "Created tenant");
    Ok((true, Some(created.id)))
}
