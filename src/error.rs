//! Reconciliation error types.
//!
//! Dependency-ordering violations (a prerequisite resource missing) are
//! distinguished from remote call failures; neither is retried. Check mode
//! validates preconditions exactly like a mutating run, so the same errors
//! surface either way.

use thiserror::Error;

/// Error that can occur during a reconciliation pass.
#[derive(Debug, Error)]
pub enum ReconcileError {
    // Dependency errors: a prerequisite resource was expected to exist.
    // These indicate a caller-ordering violation, not a remote fault.
    /// No service with the given name exists.
    #[error("service not found: {name}")]
    ServiceNotFound { name: String },

    /// No endpoint matched the requested service and region policy.
    #[error("endpoint not found for service '{service}' (region: {region:?})")]
    EndpointNotFound {
        service: String,
        region: Option<String>,
    },

    /// No tenant with the given name exists.
    #[error("tenant not found: {name}")]
    TenantNotFound { name: String },

    /// No user with the given name exists.
    #[error("user not found: {name}")]
    UserNotFound { name: String },

    /// A remote list/create/delete/grant call failed.
    ///
    /// Surfaced unchanged to the caller; the crate performs no retries and
    /// no partial rollback.
    #[error("remote call failed: {message}")]
    Remote {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ReconcileError {
    /// Check whether this error reports a missing prerequisite resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ReconcileError::ServiceNotFound { .. }
                | ReconcileError::EndpointNotFound { .. }
                | ReconcileError::TenantNotFound { .. }
                | ReconcileError::UserNotFound { .. }
        )
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            ReconcileError::ServiceNotFound { .. } => "SERVICE_NOT_FOUND",
            ReconcileError::EndpointNotFound { .. } => "ENDPOINT_NOT_FOUND",
            ReconcileError::TenantNotFound { .. } => "TENANT_NOT_FOUND",
            ReconcileError::UserNotFound { .. } => "USER_NOT_FOUND",
            ReconcileError::Remote { .. } => "REMOTE_FAILED",
        }
    }

    // Convenience constructors

    /// Create a service-not-found error.
    pub fn service_not_found(name: impl Into<String>) -> Self {
        ReconcileError::ServiceNotFound { name: name.into() }
    }

    /// Create a tenant-not-found error.
    pub fn tenant_not_found(name: impl Into<String>) -> Self {
        ReconcileError::TenantNotFound { name: name.into() }
    }

    /// Create a user-not-found error.
    pub fn user_not_found(name: impl Into<String>) -> Self {
        ReconcileError::UserNotFound { name: name.into() }
    }

    /// Create a remote failure error.
    pub fn remote(message: impl Into<String>) -> Self {
        ReconcileError::Remote {
            message: message.into(),
            source: None,
        }
    }

    /// Create a remote failure error with source.
    pub fn remote_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ReconcileError::Remote {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let not_found = vec![
            ReconcileError::service_not_found("nova"),
            ReconcileError::EndpointNotFound {
                service: "nova".to_string(),
                region: Some("RegionOne".to_string()),
            },
            ReconcileError::tenant_not_found("foo"),
            ReconcileError::user_not_found("admin"),
        ];

        for err in not_found {
            assert!(
                err.is_not_found(),
                "Expected {} to be a not-found error",
                err.error_code()
            );
        }

        assert!(!ReconcileError::remote("boom").is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = ReconcileError::tenant_not_found("acme");
        assert_eq!(err.to_string(), "tenant not found: acme");

        let err = ReconcileError::remote("connection refused");
        assert_eq!(err.to_string(), "remote call failed: connection refused");
    }

    #[test]
    fn test_remote_error_with_source() {
        let source_err = std::io::Error::other("underlying error");
        let err = ReconcileError::remote_with_source("list failed", source_err);

        assert_eq!(err.error_code(), "REMOTE_FAILED");
        if let ReconcileError::Remote { source, .. } = &err {
            assert!(source.is_some());
        } else {
            panic!("Expected Remote variant");
        }
    }
}
