//! # keystone-reconcile
//!
//! Idempotent reconciliation of identity-service resources: services,
//! endpoints, tenants, users, and role grants.
//!
//! Each `ensure_*` function compares a desired-state description against
//! the remote state (re-listed on every call) and performs the minimal
//! mutation to converge them, returning a `(changed, id)` pair. A check
//! mode computes the same answer without ever mutating remote state. The
//! [`dispatch`](dispatch::dispatch) entry point routes a tagged request to
//! the applicable reconcilers in dependency order.
//!
//! ## Example
//!
//! ```ignore
//! use keystone_reconcile::prelude::*;
//!
//! let request = ReconcileRequest::Service(ServiceRequest::new(
//!     "keystone",
//!     "identity",
//!     "Keystone Identity Service",
//!     EndpointAddresses::new(
//!         "http://192.168.206.130:5000/v2.0",
//!         "http://192.168.206.130:5000/v2.0",
//!         "http://192.168.206.130:35357/v2.0",
//!     ),
//!     "RegionOne",
//! ));
//!
//! // `client` is any implementation of the collection traits in `traits`.
//! let outcome = dispatch(&client, &request, false).await?;
//! assert!(outcome.changed);
//! ```
//!
//! ## Crate Organization
//!
//! - [`ids`] - Type-safe identifiers (`ServiceId`, `TenantId`, ...)
//! - [`types`] - Remote records and desired-state types
//! - [`error`] - Error types; dependency errors vs. remote failures
//! - [`traits`] - Identity client capability traits
//! - [`matcher`] - Natural-key matching over listed records
//! - [`reconcile`] - The `ensure_*` reconcilers
//! - [`dispatch`] - Tagged requests and the routing entry point

pub mod dispatch;
pub mod error;
pub mod ids;
pub mod matcher;
pub mod reconcile;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```
/// use keystone_reconcile::prelude::*;
/// ```
pub mod prelude {
    // IDs
    pub use crate::ids::{EndpointId, RoleId, ServiceId, TenantId, UserId};

    // Records and desired state
    pub use crate::types::{
        DesiredState, Endpoint, EndpointAddresses, Role, Service, Tenant, User,
    };

    // Error handling
    pub use crate::error::{ReconcileError, ReconcileResult};

    // Client traits
    pub use crate::traits::{
        EndpointOps, IdentityClient, RoleOps, ServiceOps, TenantOps, UserOps,
    };

    // Reconcilers
    pub use crate::reconcile::{
        ensure_absent, ensure_endpoint_absent, ensure_endpoint_present, ensure_present,
        ensure_role_exists, ensure_service_absent, ensure_service_present, ensure_tenant_exists,
        ensure_user_exists, get_endpoint, get_role, get_service, get_tenant, get_user,
        tenant_exists,
    };

    // Dispatch
    pub use crate::dispatch::{
        dispatch, DispatchOutcome, IdentityRequest, ReconcileRequest, ServiceRequest, UserRequest,
    };
}

// Re-export async_trait for client implementors
pub use async_trait::async_trait;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        // Verify the prelude types are accessible
        let _id = ServiceId::new("b6a7ff03f2574cd9b5c7c61186e0d781");
        let _state = DesiredState::Present;
        let _addresses = EndpointAddresses::new("http://pub", "http://int", "http://adm");
        let _request = IdentityRequest::new("foo", "The foo tenant");
    }
}
