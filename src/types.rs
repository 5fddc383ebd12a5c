//! Remote resource records and desired-state types.
//!
//! Records mirror the identity service's object model. The crate owns no
//! persistent state: every reconciliation re-fetches these from the remote
//! collections and drops them when the call returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{EndpointId, RoleId, ServiceId, TenantId, UserId};

/// A service registered in the identity catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Remote-assigned identifier.
    pub id: ServiceId,
    /// Natural key: unique service name (e.g. "keystone").
    pub name: String,
    /// Service type (e.g. "identity", "compute").
    pub service_type: String,
    /// Human-readable description.
    pub description: String,
}

/// An endpoint template binding a service to its URLs for one region.
///
/// A service may carry several endpoints, at most one per region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Remote-assigned identifier.
    pub id: EndpointId,
    /// Owning service.
    pub service_id: ServiceId,
    /// Public-facing URL.
    pub public_url: String,
    /// Internal network URL.
    pub internal_url: String,
    /// Administrative URL.
    pub admin_url: String,
    /// Region this endpoint serves.
    pub region: String,
}

/// A tenant (project) in the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Remote-assigned identifier.
    pub id: TenantId,
    /// Natural key: unique tenant name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the tenant is enabled.
    pub enabled: bool,
}

/// A user account.
///
/// The remote never returns the password, so the record carries none;
/// passwords appear only in the create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Remote-assigned identifier.
    pub id: UserId,
    /// Natural key: unique user name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Tenant the user was created in, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

/// A role definition.
///
/// The same record shape is returned both when listing the role catalog and
/// when listing the roles granted to a user within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Remote-assigned identifier.
    pub id: RoleId,
    /// Natural key: unique role name (e.g. "admin").
    pub name: String,
}

/// The public/internal/admin URL triple desired for an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointAddresses {
    /// Public-facing URL.
    pub public_url: String,
    /// Internal network URL.
    pub internal_url: String,
    /// Administrative URL.
    pub admin_url: String,
}

impl EndpointAddresses {
    /// Create a new URL triple.
    pub fn new(
        public_url: impl Into<String>,
        internal_url: impl Into<String>,
        admin_url: impl Into<String>,
    ) -> Self {
        Self {
            public_url: public_url.into(),
            internal_url: internal_url.into(),
            admin_url: admin_url.into(),
        }
    }

    /// Check whether an existing endpoint carries exactly these URLs.
    pub fn matches(&self, endpoint: &Endpoint) -> bool {
        endpoint.public_url == self.public_url
            && endpoint.internal_url == self.internal_url
            && endpoint.admin_url == self.admin_url
    }
}

/// Desired state for a service/endpoint reconciliation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// The resource should exist, converged to the requested fields.
    Present,
    /// The resource should not exist.
    Absent,
}

impl DesiredState {
    /// Get the string representation used on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DesiredState::Present => "present",
            DesiredState::Absent => "absent",
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DesiredState {
    type Err = ParseDesiredStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(DesiredState::Present),
            "absent" => Ok(DesiredState::Absent),
            _ => Err(ParseDesiredStateError(s.to_string())),
        }
    }
}

/// Error parsing a desired state from string.
#[derive(Debug, Clone)]
pub struct ParseDesiredStateError(String);

impl fmt::Display for ParseDesiredStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid desired state '{}', expected one of: present, absent",
            self.0
        )
    }
}

impl std::error::Error for ParseDesiredStateError {}
