//! Endpoint reconciliation.
//!
//! Endpoints are keyed loosely: by owning service, optionally narrowed to
//! one region. With `ignore_other_regions` unset, any endpoint already
//! present for the service in *any* region counts as the current one; set,
//! only the endpoint in the requested region counts and endpoints in other
//! regions are left untouched. This supports staged multi-region rollout
//! without creating duplicate endpoints across runs.
//!
//! The remote offers no endpoint update call, so URL or region drift is
//! converged by deleting the stale endpoint and creating a fresh one.

use crate::error::ReconcileResult;
use crate::ids::{EndpointId, ServiceId};
use crate::matcher::first_match;
use crate::reconcile::service::get_service;
use crate::traits::{EndpointOps, ServiceOps};
use crate::types::{Endpoint, EndpointAddresses};

/// Scan listed endpoints for all endpoints current under the region policy.
async fn find_endpoints<C>(
    client: &C,
    service_id: &ServiceId,
    region: &str,
    ignore_other_regions: bool,
) -> ReconcileResult<Vec<Endpoint>>
where
    C: EndpointOps + ?Sized,
{
    let endpoints = client.list_endpoints().await?;
    Ok(endpoints
        .into_iter()
        .filter(|endpoint| {
            endpoint.service_id == *service_id
                && (!ignore_other_regions || endpoint.region == region)
        })
        .collect())
}

/// Scan listed endpoints for the one current under the region policy.
async fn find_endpoint<C>(
    client: &C,
    service_id: &ServiceId,
    region: &str,
    ignore_other_regions: bool,
) -> ReconcileResult<Option<Endpoint>>
where
    C: EndpointOps + ?Sized,
{
    let endpoints = client.list_endpoints().await?;
    Ok(first_match(&endpoints, |endpoint| {
        endpoint.service_id == *service_id
            && (!ignore_other_regions || endpoint.region == region)
    })
    .cloned())
}

/// Look up the endpoint currently standing for `service_name` under the
/// region policy.
///
/// Fails with [`ServiceNotFound`](crate::error::ReconcileError::ServiceNotFound)
/// when the service itself does not exist; endpoint reconciliation presumes
/// the service reconciler ran first. Returns `Ok(None)` when the service
/// exists but no endpoint matches.
pub async fn get_endpoint<C>(
    client: &C,
    service_name: &str,
    region: &str,
    ignore_other_regions: bool,
) -> ReconcileResult<Option<Endpoint>>
where
    C: ServiceOps + EndpointOps + ?Sized,
{
    let service = get_service(client, service_name).await?;
    find_endpoint(client, &service.id, region, ignore_other_regions).await
}

/// Ensure an endpoint with the given URLs exists for `service_name` in
/// `region`.
///
/// Converged only when the current endpoint (per the region policy)
/// carries exactly the desired URLs *and* sits in the requested region;
/// matching URLs alone are not enough. Under the loose policy
/// (`ignore_other_regions` unset) the first endpoint found for the
/// service counts as current regardless of region, so one sitting in
/// another region is deleted and recreated in the requested region, the
/// same as URL drift. In check mode neither call is issued and the
/// reported id is `None`, since the surviving endpoint would be a new
/// one.
pub async fn ensure_endpoint_present<C>(
    client: &C,
    service_name: &str,
    addresses: &EndpointAddresses,
    region: &str,
    ignore_other_regions: bool,
    check_mode: bool,
) -> ReconcileResult<(bool, Option<EndpointId>)>
where
    C: ServiceOps + EndpointOps + ?Sized,
{
    let service = get_service(client, service_name).await?;
    let existing = find_endpoint(client, &service.id, region, ignore_other_regions).await?;

    if let Some(endpoint) = &existing {
        if endpoint.region == region && addresses.matches(endpoint) {
            tracing::debug!(
                service = %service_name,
                region = %region,
                endpoint_id = %endpoint.id,
                "Endpoint already converged"
            );
            return Ok((false, Some(endpoint.id.clone())));
        }
    }

    if check_mode {
        return Ok((true, None));
    }

    if let Some(stale) = existing {
        tracing::info!(
            service = %service_name,
            endpoint_id = %stale.id,
            stale_region = %stale.region,
            "Deleting stale endpoint before recreate"
        );
        client.delete_endpoint(&stale.id).await?;
    }

    let created = client.create_endpoint(&service.id, addresses, region).await?;
    tracing::info!(
        service = %service_name,
        region = %region,
        endpoint_id = %created.id,
        "Created endpoint"
    );
    Ok((true, Some(created.id)))
}

/// Ensure no endpoint stands for `service_name` under the region policy.
///
/// With `ignore_other_regions` unset, *every* endpoint belonging to the
/// service is removed, whatever its region; the service reconciler may run
/// right after this and must never leave an endpoint referencing a deleted
/// service. Set, only the endpoint in the requested region is removed.
///
/// Returns whether a change was (or in check mode, would be) made.
pub async fn ensure_endpoint_absent<C>(
    client: &C,
    service_name: &str,
    region: &str,
    ignore_other_regions: bool,
    check_mode: bool,
) -> ReconcileResult<bool>
where
    C: ServiceOps + EndpointOps + ?Sized,
{
    let service = get_service(client, service_name).await?;
    let endpoints = find_endpoints(client, &service.id, region, ignore_other_regions).await?;
    if endpoints.is_empty() {
        return Ok(false);
    }

    if !check_mode {
        for endpoint in &endpoints {
            tracing::info!(
                service = %service_name,
                endpoint_id = %endpoint.id,
                region = %endpoint.region,
                "Deleting endpoint"
            );
            client.delete_endpoint(&endpoint.id).await?;
        }
    }
    Ok(true)
}
