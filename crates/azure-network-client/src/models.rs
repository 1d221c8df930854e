//! Azure Resource Manager wire models for NAT gateways
//!
//! Field names follow the ARM JSON representation (camelCase, with the
//! resource-specific fields nested under `properties`).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// NAT gateway resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatGateway {
    /// Resource ID (read-only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Resource name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Resource type (read-only)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Azure region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Resource tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,

    /// SKU
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<NatGatewaySku>,

    /// NAT gateway properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<NatGatewayProperties>,

    /// Entity tag (read-only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl NatGateway {
    /// IDs of the public IP addresses bound to the gateway.
    pub fn public_ip_address_ids(&self) -> BTreeSet<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.public_ip_addresses.as_ref())
            .map(|ips| ips.iter().filter_map(|ip| ip.id.as_deref()).collect())
            .unwrap_or_default()
    }
}

/// NAT gateway SKU
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatGatewaySku {
    /// SKU name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NatGatewaySkuName>,
}

/// NAT gateway SKU names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatGatewaySkuName {
    /// Standard SKU, the only one NAT gateways support
    Standard,
}

/// NAT gateway properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatGatewayProperties {
    /// Idle timeout of outbound flows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout_in_minutes: Option<u32>,

    /// Public IP addresses used for egress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_addresses: Option<Vec<SubResource>>,

    /// Public IP prefixes used for egress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_prefixes: Option<Vec<SubResource>>,

    /// Subnets using the gateway (read-only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<SubResource>>,

    /// Provisioning state (read-only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,

    /// Resource GUID (read-only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_guid: Option<String>,
}

/// Reference to another resource by ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResource {
    /// Resource ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SubResource {
    /// Creates a reference to `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }
}

/// ARM error envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudError {
    /// Error details
    #[serde(default)]
    pub error: Option<CloudErrorBody>,
}

/// ARM error details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudErrorBody {
    /// Machine-readable error code
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nat_gateway() {
        let gw: NatGateway = serde_json::from_value(serde_json::json!({
            "name": "my-node-natgateway",
            "id": "/subscriptions/123/resourceGroups/my-rg/providers/Microsoft.Network/natGateways/my-node-natgateway",
            "type": "Microsoft.Network/natGateways",
            "location": "westus",
            "sku": { "name": "Standard" },
            "properties": {
                "idleTimeoutInMinutes": 4,
                "provisioningState": "Succeeded",
                "publicIpAddresses": [
                    { "id": "/subscriptions/123/resourceGroups/my-rg/providers/Microsoft.Network/publicIPAddresses/pip-node" }
                ]
            }
        }))
        .unwrap();

        assert_eq!(gw.name.as_deref(), Some("my-node-natgateway"));
        assert_eq!(gw.sku.as_ref().and_then(|s| s.name), Some(NatGatewaySkuName::Standard));
        assert_eq!(
            gw.public_ip_address_ids().into_iter().collect::<Vec<_>>(),
            vec!["/subscriptions/123/resourceGroups/my-rg/providers/Microsoft.Network/publicIPAddresses/pip-node"]
        );
    }

    #[test]
    fn test_public_ip_ids_empty_without_properties() {
        assert!(NatGateway::default().public_ip_address_ids().is_empty());
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let gw = NatGateway {
            name: Some("gw".to_string()),
            properties: Some(NatGatewayProperties {
                public_ip_addresses: Some(vec![SubResource::new("pip-id")]),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&gw).unwrap(),
            serde_json::json!({
                "name": "gw",
                "properties": { "publicIpAddresses": [ { "id": "pip-id" } ] }
            })
        );
    }
}
