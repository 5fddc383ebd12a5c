//! Identity client capability traits.
//!
//! The reconcilers never talk HTTP themselves; they consume an injected
//! client exposing one trait per remote collection. A real implementation
//! wraps the identity service's SDK; tests substitute an in-memory mock.
//!
//! Every call re-reads remote state. Implementations are expected to be
//! fail-fast: any transport or HTTP error maps to
//! [`ReconcileError::Remote`](crate::error::ReconcileError) and propagates
//! unchanged.

use async_trait::async_trait;

use crate::error::ReconcileResult;
use crate::ids::{EndpointId, RoleId, ServiceId, TenantId, UserId};
use crate::types::{Endpoint, EndpointAddresses, Role, Service, Tenant, User};

/// Operations on the service catalog collection.
#[async_trait]
pub trait ServiceOps: Send + Sync {
    /// List all registered services.
    async fn list_services(&self) -> ReconcileResult<Vec<Service>>;

    /// Create a service, returning the record with its assigned id.
    async fn create_service(
        &self,
        name: &str,
        service_type: &str,
        description: &str,
    ) -> ReconcileResult<Service>;

    /// Delete a service by id.
    async fn delete_service(&self, id: &ServiceId) -> ReconcileResult<()>;
}

/// Operations on the endpoint collection.
#[async_trait]
pub trait EndpointOps: Send + Sync {
    /// List all endpoints, across every service and region.
    async fn list_endpoints(&self) -> ReconcileResult<Vec<Endpoint>>;

    /// Create an endpoint for a service in one region.
    async fn create_endpoint(
        &self,
        service_id: &ServiceId,
        addresses: &EndpointAddresses,
        region: &str,
    ) -> ReconcileResult<Endpoint>;

    /// Delete an endpoint by id.
    async fn delete_endpoint(&self, id: &EndpointId) -> ReconcileResult<()>;
}

/// Operations on the tenant collection.
#[async_trait]
pub trait TenantOps: Send + Sync {
    /// List all tenants.
    async fn list_tenants(&self) -> ReconcileResult<Vec<Tenant>>;

    /// Create a tenant, returning the record with its assigned id.
    async fn create_tenant(
        &self,
        name: &str,
        description: &str,
        enabled: bool,
    ) -> ReconcileResult<Tenant>;
}

/// Operations on the user collection.
#[async_trait]
pub trait UserOps: Send + Sync {
    /// List all users.
    async fn list_users(&self) -> ReconcileResult<Vec<User>>;

    /// Create a user bound to a tenant.
    ///
    /// The password is write-only: it is never returned by list calls.
    async fn create_user(
        &self,
        name: &str,
        password: &str,
        email: &str,
        tenant_id: &TenantId,
    ) -> ReconcileResult<User>;
}

/// Operations on role definitions and role grants.
#[async_trait]
pub trait RoleOps: Send + Sync {
    /// List all role definitions.
    async fn list_roles(&self) -> ReconcileResult<Vec<Role>>;

    /// Create a role definition.
    async fn create_role(&self, name: &str) -> ReconcileResult<Role>;

    /// List the roles granted to a user within a tenant.
    async fn roles_for_user(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
    ) -> ReconcileResult<Vec<Role>>;

    /// Grant a role to a user within a tenant.
    async fn grant_role(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
        role_id: &RoleId,
    ) -> ReconcileResult<()>;
}

/// Marker trait for a client covering every collection the reconcilers use.
pub trait IdentityClient: ServiceOps + EndpointOps + TenantOps + UserOps + RoleOps {}

// Blanket implementation for any client that implements all collection ops
impl<T> IdentityClient for T where T: ServiceOps + EndpointOps + TenantOps + UserOps + RoleOps {}
