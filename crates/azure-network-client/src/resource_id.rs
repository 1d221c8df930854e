//! Azure resource ID construction and parsing.
//!
//! IDs have the form
//! `/subscriptions/<sub>/resourceGroups/<group>/providers/<namespace>/<type>/<name>`.
//! The reconciler compares IDs as plain strings, so the format produced here
//! must match what the API returns byte for byte.

use crate::error::AzureError;
use std::fmt;
use std::str::FromStr;

/// Resource provider namespace for networking resources.
pub const NETWORK_PROVIDER: &str = "Microsoft.Network";

/// Resource type segment of NAT gateways.
pub const NAT_GATEWAYS: &str = "natGateways";

/// Resource type segment of public IP addresses.
pub const PUBLIC_IP_ADDRESSES: &str = "publicIPAddresses";

/// Builds a resource ID.
pub fn resource_id(
    subscription_id: &str,
    resource_group: &str,
    provider: &str,
    resource_type: &str,
    name: &str,
) -> String {
    format!(
        "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/{provider}/{resource_type}/{name}"
    )
}

/// Builds the ID of a NAT gateway.
pub fn nat_gateway_id(subscription_id: &str, resource_group: &str, name: &str) -> String {
    resource_id(subscription_id, resource_group, NETWORK_PROVIDER, NAT_GATEWAYS, name)
}

/// Builds the ID of a public IP address.
pub fn public_ip_id(subscription_id: &str, resource_group: &str, name: &str) -> String {
    resource_id(subscription_id, resource_group, NETWORK_PROVIDER, PUBLIC_IP_ADDRESSES, name)
}

/// A parsed top-level resource ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    /// Subscription ID
    pub subscription_id: String,
    /// Resource group name
    pub resource_group: String,
    /// Provider namespace, e.g. `Microsoft.Network`
    pub provider: String,
    /// Resource type, e.g. `publicIPAddresses`
    pub resource_type: String,
    /// Resource name
    pub name: String,
}

impl ResourceId {
    /// Parses a resource ID.
    ///
    /// The fixed segment keys are matched case-insensitively since the API is
    /// not consistent about `resourceGroups` vs `resourcegroups`. Nested
    /// (child) resources are rejected.
    pub fn parse(id: &str) -> Result<Self, AzureError> {
        let invalid = || AzureError::InvalidResourceId(id.to_string());

        let segments: Vec<&str> = id
            .strip_prefix('/')
            .ok_or_else(invalid)?
            .split('/')
            .collect();

        match segments.as_slice() {
            [subs, subscription_id, groups, resource_group, providers, provider, resource_type, name]
                if subs.eq_ignore_ascii_case("subscriptions")
                    && groups.eq_ignore_ascii_case("resourceGroups")
                    && providers.eq_ignore_ascii_case("providers")
                    && segments.iter().all(|s| !s.is_empty()) =>
            {
                Ok(Self {
                    subscription_id: (*subscription_id).to_string(),
                    resource_group: (*resource_group).to_string(),
                    provider: (*provider).to_string(),
                    resource_type: (*resource_type).to_string(),
                    name: (*name).to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl FromStr for ResourceId {
    type Err = AzureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&resource_id(
            &self.subscription_id,
            &self.resource_group,
            &self.provider,
            &self.resource_type,
            &self.name,
        ))
    }
}
