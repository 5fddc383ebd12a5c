//! Idempotent reconcilers, one module per resource.
//!
//! Each function compares desired state to freshly listed remote state and
//! performs the minimal mutation to converge them, returning a
//! `(changed, id)` pair. With `check_mode` set, no mutating call is ever
//! issued; the would-be changed flag is still computed, and the id is
//! `None` for any resource that would have been newly created.
//!
//! Dependency ordering (service before endpoint, tenant before user before
//! role, endpoint removal before service removal) is the caller's
//! responsibility; [`dispatch`](crate::dispatch::dispatch) sequences the
//! calls accordingly.

pub mod endpoint;
pub mod role;
pub mod service;
pub mod tenant;
pub mod user;

pub use endpoint::{ensure_endpoint_absent, ensure_endpoint_present, get_endpoint};
pub use role::{ensure_role_exists, get_role};
pub use service::{
    ensure_absent, ensure_present, ensure_service_absent, ensure_service_present, get_service,
};
pub use tenant::{ensure_tenant_exists, get_tenant, tenant_exists};
pub use user::{ensure_user_exists, get_user};
