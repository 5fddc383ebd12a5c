//! Service catalog reconciliation.
//!
//! Services match by name only; type and description drift on an existing
//! service is not corrected (the observed remote contract exercises no
//! update call for services — existence alone determines `changed`).

use crate::error::{ReconcileError, ReconcileResult};
use crate::ids::{EndpointId, ServiceId};
use crate::matcher::find_by_name;
use crate::reconcile::endpoint::{ensure_endpoint_absent, ensure_endpoint_present};
use crate::traits::{EndpointOps, ServiceOps};
use crate::types::{EndpointAddresses, Service};

/// Look up a service by name, failing when it does not exist.
pub async fn get_service<C>(client: &C, name: &str) -> ReconcileResult<Service>
where
    C: ServiceOps + ?Sized,
{
    let services = client.list_services().await?;
    find_by_name(&services, name)
        .cloned()
        .ok_or_else(|| ReconcileError::service_not_found(name))
}

/// Ensure a service with the given name exists.
///
/// Returns `(changed, id)`; the id is `None` when the service would be
/// created in check mode.
pub async fn ensure_service_present<C>(
    client: &C,
    name: &str,
    service_type: &str,
    description: &str,
    check_mode: bool,
) -> ReconcileResult<(bool, Option<ServiceId>)>
where
    C: ServiceOps + ?Sized,
{
    let services = client.list_services().await?;
    if let Some(existing) = find_by_name(&services, name) {
        tracing::debug!(name = %name, service_id = %existing.id, "Service already present");
        return Ok((false, Some(existing.id.clone())));
    }

    if check_mode {
        return Ok((true, None));
    }

    let created = client.create_service(name, service_type, description).await?;
    tracing::info!(
        name = %name,
        service_type = %service_type,
        service_id = %created.id,
        "Created service"
    );
    Ok((true, Some(created.id)))
}

/// Ensure no service with the given name exists.
///
/// Returns whether a change was (or in check mode, would be) made.
pub async fn ensure_service_absent<C>(
    client: &C,
    name: &str,
    check_mode: bool,
) -> ReconcileResult<bool>
where
    C: ServiceOps + ?Sized,
{
    let services = client.list_services().await?;
    let Some(existing) = find_by_name(&services, name) else {
        return Ok(false);
    };

    if !check_mode {
        tracing::info!(name = %name, service_id = %existing.id, "Deleting service");
        client.delete_service(&existing.id).await?;
    }
    Ok(true)
}

/// Ensure a service and its endpoint are present, in dependency order.
///
/// The service reconciler runs first; the endpoint reconciler then works
/// against the resolved service. When check mode reports the service as
/// not-yet-created, the endpoint necessarily would be created too, so the
/// endpoint lookup is skipped rather than failing on the missing
/// prerequisite.
///
/// Returns `(changed, service_id, endpoint_id)` with `changed` true when
/// either reconciler changed (or would change) anything.
#[allow(clippy::too_many_arguments)]
pub async fn ensure_present<C>(
    client: &C,
    name: &str,
    service_type: &str,
    description: &str,
    addresses: &EndpointAddresses,
    region: &str,
    ignore_other_regions: bool,
    check_mode: bool,
) -> ReconcileResult<(bool, Option<ServiceId>, Option<EndpointId>)>
where
    C: ServiceOps + EndpointOps + ?Sized,
{
    let (service_changed, service_id) =
        ensure_service_present(client, name, service_type, description, check_mode).await?;

    let (endpoint_changed, endpoint_id) = if service_id.is_some() {
        ensure_endpoint_present(
            client,
            name,
            addresses,
            region,
            ignore_other_regions,
            check_mode,
        )
        .await?
    } else {
        // Check mode, service not created: the endpoint would be new as well.
        (true, None)
    };

    Ok((
        service_changed || endpoint_changed,
        service_id,
        endpoint_id,
    ))
}

/// Ensure a service and its endpoint are absent.
///
/// The endpoint is removed before its owning service so the catalog never
/// holds an endpoint with a dangling service reference.
pub async fn ensure_absent<C>(
    client: &C,
    name: &str,
    region: &str,
    ignore_other_regions: bool,
    check_mode: bool,
) -> ReconcileResult<bool>
where
    C: ServiceOps + EndpointOps + ?Sized,
{
    let endpoint_changed = match ensure_endpoint_absent(
        client,
        name,
        region,
        ignore_other_regions,
        check_mode,
    )
    .await
    {
        Ok(changed) => changed,
        // Nothing to remove when the service itself is already gone.
        Err(err) if err.is_not_found() => return Ok(false),
        Err(err) => return Err(err),
    };

    let service_changed = ensure_service_absent(client, name, check_mode).await?;
    Ok(endpoint_changed || service_changed)
}
