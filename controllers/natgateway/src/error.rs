//! Controller-specific error types.
//!
//! Provider errors are wrapped with the operation, resource kind, name and
//! resource group they occurred on. The provider message is kept verbatim.

use azure_network_client::{AzureError, ErrorClass};
use thiserror::Error;

/// Errors returned by the NAT gateway service.
#[derive(Debug, Error)]
pub enum NatGatewayError {
    /// Reading the current state failed for a reason other than "not found"
    #[error("failed to get {kind} {name} in {resource_group}: {source}")]
    Get {
        /// Resource kind, e.g. "nat gateway"
        kind: &'static str,
        /// Resource name
        name: String,
        /// Resource group
        resource_group: String,
        /// Provider error
        source: AzureError,
    },

    /// Creating or converging the resource failed
    #[error("failed to create {kind} {name} in resource group {resource_group}: {source}")]
    Create {
        /// Resource kind, e.g. "nat gateway"
        kind: &'static str,
        /// Resource name
        name: String,
        /// Resource group
        resource_group: String,
        /// Provider error
        source: AzureError,
    },

    /// Deleting the resource failed for a reason other than "not found"
    #[error("failed to delete {kind} {name} in resource group {resource_group}: {source}")]
    Delete {
        /// Resource kind, e.g. "nat gateway"
        kind: &'static str,
        /// Resource name
        name: String,
        /// Resource group
        resource_group: String,
        /// Provider error
        source: AzureError,
    },
}

impl NatGatewayError {
    /// The provider error this wraps.
    pub fn provider_error(&self) -> &AzureError {
        match self {
            NatGatewayError::Get { source, .. }
            | NatGatewayError::Create { source, .. }
            | NatGatewayError::Delete { source, .. } => source,
        }
    }

    /// Classification of the underlying provider error.
    ///
    /// A `Transient` result means the caller may run the whole pass again later.
    pub fn classify(&self) -> ErrorClass {
        self.provider_error().classify()
    }

    /// Name of the resource the failure occurred on.
    pub fn name(&self) -> &str {
        match self {
            NatGatewayError::Get { name, .. }
            | NatGatewayError::Create { name, .. }
            | NatGatewayError::Delete { name, .. } => name,
        }
    }
}
