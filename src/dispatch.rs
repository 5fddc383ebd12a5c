//! Request routing for one reconciliation pass.
//!
//! The caller declares desired state as a tagged [`ReconcileRequest`]
//! rather than a bag of optional fields, so the routing here is exhaustive:
//! a role grant cannot be requested without its user, nor a user without
//! its tenant. [`dispatch`] sequences the applicable reconcilers in
//! dependency order and aggregates the result into a [`DispatchOutcome`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReconcileResult;
use crate::ids::{EndpointId, RoleId, ServiceId, TenantId, UserId};
use crate::reconcile::{
    ensure_absent, ensure_present, ensure_role_exists, ensure_tenant_exists, ensure_user_exists,
};
use crate::traits::IdentityClient;
use crate::types::{DesiredState, EndpointAddresses};

/// Desired state for one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReconcileRequest {
    /// Reconcile a catalog service and its endpoint.
    Service(ServiceRequest),
    /// Reconcile a tenant, optionally a user in it, optionally a role grant.
    Identity(IdentityRequest),
}

/// Desired state for a service and its endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    /// Service name (natural key).
    pub name: String,
    /// Service type (e.g. "identity").
    pub service_type: String,
    /// Service description.
    pub description: String,
    /// Endpoint URL triple.
    pub addresses: EndpointAddresses,
    /// Region the endpoint serves.
    pub region: String,
    /// Leave endpoints in other regions untouched.
    #[serde(default)]
    pub ignore_other_regions: bool,
    /// Whether the service should exist or not.
    pub state: DesiredState,
}

impl ServiceRequest {
    /// Create a present-state request.
    pub fn new(
        name: impl Into<String>,
        service_type: impl Into<String>,
        description: impl Into<String>,
        addresses: EndpointAddresses,
        region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            service_type: service_type.into(),
            description: description.into(),
            addresses,
            region: region.into(),
            ignore_other_regions: false,
            state: DesiredState::Present,
        }
    }

    /// Set the desired state.
    #[must_use]
    pub fn with_state(mut self, state: DesiredState) -> Self {
        self.state = state;
        self
    }

    /// Scope matching to the requested region only.
    #[must_use]
    pub fn with_ignore_other_regions(mut self) -> Self {
        self.ignore_other_regions = true;
        self
    }
}

/// Desired state for a tenant and, optionally, a user and role grant in it.
///
/// The observed contract only exercises present-state for identity
/// resources, so this arm carries no state field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRequest {
    /// Tenant name (natural key).
    pub tenant: String,
    /// Tenant description.
    pub tenant_description: String,
    /// User to ensure within the tenant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRequest>,
}

impl IdentityRequest {
    /// Create a tenant-only request.
    pub fn new(tenant: impl Into<String>, tenant_description: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            tenant_description: tenant_description.into(),
            user: None,
        }
    }

    /// Also ensure a user within the tenant.
    #[must_use]
    pub fn with_user(mut self, user: UserRequest) -> Self {
        self.user = Some(user);
        self
    }
}

/// Desired state for a user, nested in an [`IdentityRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    /// User name (natural key).
    pub name: String,
    /// Password for the create call (write-only on the remote).
    pub password: String,
    /// Contact email.
    pub email: String,
    /// Role to grant to the user within the tenant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserRequest {
    /// Create a user request without a role grant.
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            email: email.into(),
            role: None,
        }
    }

    /// Also grant a role to the user within the tenant.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Aggregated result of one reconciliation pass.
///
/// `changed` reflects the deepest reconciler that ran for identity
/// requests, and the OR of the service and endpoint reconcilers for
/// service requests. Ids are present only for resources that exist after
/// the pass (check-mode creations report none).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Whether a change was made, or in check mode would have been.
    pub changed: bool,
    /// Id of the reconciled service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    /// Id of the reconciled endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<EndpointId>,
    /// Id of the reconciled tenant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    /// Id of the reconciled user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Id of the reconciled role definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    /// Whether this pass ran in check mode.
    pub check_mode: bool,
    /// When the pass executed.
    pub executed_at: DateTime<Utc>,
}

impl DispatchOutcome {
    fn new(changed: bool, check_mode: bool) -> Self {
        Self {
            changed,
            service_id: None,
            endpoint_id: None,
            tenant_id: None,
            user_id: None,
            role_id: None,
            check_mode,
            executed_at: Utc::now(),
        }
    }
}

/// Run one reconciliation pass for the given request.
///
/// Sequencing enforces dependency order: service before endpoint for
/// present state, endpoint removal before service removal for absent
/// state, and tenant before user before role. Errors from any reconciler
/// propagate unchanged; there is no retry and no partial rollback.
pub async fn dispatch<C>(
    client: &C,
    request: &ReconcileRequest,
    check_mode: bool,
) -> ReconcileResult<DispatchOutcome>
where
    C: IdentityClient + ?Sized,
{
    match request {
        ReconcileRequest::Service(req) => dispatch_service(client, req, check_mode).await,
        ReconcileRequest::Identity(req) => dispatch_identity(client, req, check_mode).await,
    }
}

async fn dispatch_service<C>(
    client: &C,
    req: &ServiceRequest,
    check_mode: bool,
) -> ReconcileResult<DispatchOutcome>
where
    C: IdentityClient + ?Sized,
{
    match req.state {
        DesiredState::Present => {
            let (changed, service_id, endpoint_id) = ensure_present(
                client,
                &req.name,
                &req.service_type,
                &req.description,
                &req.addresses,
                &req.region,
                req.ignore_other_regions,
                check_mode,
            )
            .await?;

            let mut outcome = DispatchOutcome::new(changed, check_mode);
            outcome.service_id = service_id;
            outcome.endpoint_id = endpoint_id;
            Ok(outcome)
        }
        DesiredState::Absent => {
            let changed = ensure_absent(
                client,
                &req.name,
                &req.region,
                req.ignore_other_regions,
                check_mode,
            )
            .await?;
            Ok(DispatchOutcome::new(changed, check_mode))
        }
    }
}

async fn dispatch_identity<C>(
    client: &C,
    req: &IdentityRequest,
    check_mode: bool,
) -> ReconcileResult<DispatchOutcome>
where
    C: IdentityClient + ?Sized,
{
    let (tenant_changed, tenant_id) =
        ensure_tenant_exists(client, &req.tenant, &req.tenant_description, check_mode).await?;

    let mut outcome = DispatchOutcome::new(tenant_changed, check_mode);
    outcome.tenant_id = tenant_id;

    let Some(user_req) = &req.user else {
        return Ok(outcome);
    };

    if outcome.tenant_id.is_none() {
        // Check mode, tenant not created: everything deeper would be new too.
        outcome.changed = true;
        return Ok(outcome);
    }

    let (user_changed, user_id) = ensure_user_exists(
        client,
        &user_req.name,
        &user_req.password,
        &user_req.email,
        &req.tenant,
        check_mode,
    )
    .await?;
    outcome.changed = user_changed;
    outcome.user_id = user_id;

    let Some(role_name) = &user_req.role else {
        return Ok(outcome);
    };

    if outcome.user_id.is_none() {
        outcome.changed = true;
        return Ok(outcome);
    }

    let (role_changed, role_id) =
        ensure_role_exists(client, &user_req.name, &req.tenant, role_name, check_mode).await?;
    outcome.changed = role_changed;
    outcome.role_id = role_id;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_request_construction() {
        let request = ReconcileRequest::Identity(
            IdentityRequest::new("acme", "The acme tenant")
                .with_user(UserRequest::new("john", "sekrit", "john@acme.example").with_role("admin")),
        );

        let ReconcileRequest::Identity(identity) = &request else {
            panic!("Expected identity request");
        };
        let user = identity.user.as_ref().unwrap();
        assert_eq!(user.name, "john");
        assert_eq!(user.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_service_request_defaults() {
        let request = ServiceRequest::new(
            "keystone",
            "identity",
            "Keystone Identity Service",
            EndpointAddresses::new("http://pub", "http://int", "http://adm"),
            "RegionOne",
        );

        assert_eq!(request.state, DesiredState::Present);
        assert!(!request.ignore_other_regions);
    }

    #[test]
    fn test_request_serialization_is_tagged() {
        let request = ReconcileRequest::Identity(IdentityRequest::new("acme", "The acme tenant"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["kind"], "identity");
        assert_eq!(json["tenant"], "acme");
        assert!(json.get("user").is_none());
    }

    #[test]
    fn test_outcome_skips_absent_ids() {
        let outcome = DispatchOutcome::new(false, true);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["changed"], false);
        assert_eq!(json["check_mode"], true);
        assert!(json.get("service_id").is_none());
        assert!(json.get("role_id").is_none());
    }
}
