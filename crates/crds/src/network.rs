//! Network types for an AzureCluster.
//!
//! Defines the virtual network, its subnets and the NAT gateway attachment
//! recorded on each subnet.

use crate::tags::Tags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NetworkSpec describes the virtual network and subnets of a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    /// Virtual network configuration
    #[serde(default)]
    pub vnet: VnetSpec,

    /// Subnets of the virtual network, in declaration order
    #[serde(default)]
    pub subnets: Vec<SubnetSpec>,
}

impl NetworkSpec {
    /// Looks up a subnet by name.
    pub fn subnet(&self, name: &str) -> Option<&SubnetSpec> {
        self.subnets.iter().find(|s| s.name == name)
    }

    /// Subnets with the node role, in declaration order.
    pub fn node_subnets(&self) -> impl Iterator<Item = &SubnetSpec> {
        self.subnets.iter().filter(|s| s.role == SubnetRole::Node)
    }

    /// Replaces the subnet sharing `subnet`'s name, or appends it.
    pub fn upsert_subnet(&mut self, subnet: SubnetSpec) {
        match self.subnets.iter_mut().find(|s| s.name == subnet.name) {
            Some(existing) => *existing = subnet,
            None => self.subnets.push(subnet),
        }
    }
}

/// VnetSpec configures the virtual network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VnetSpec {
    /// Azure resource ID of a pre-existing virtual network.
    ///
    /// Left empty when the virtual network is created for the cluster.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Virtual network name
    pub name: String,

    /// Address prefixes of the virtual network
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cidr_blocks: Vec<String>,

    /// Tags applied to the virtual network
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl VnetSpec {
    /// True if this controller creates the virtual network (and thus owns
    /// what is attached to it). A populated `id` means the network was
    /// supplied externally.
    pub fn is_managed(&self) -> bool {
        self.id.is_empty()
    }
}

/// Role of a subnet in the cluster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SubnetRole {
    /// Subnet hosting worker nodes
    #[default]
    Node,
    /// Subnet hosting control plane machines
    ControlPlane,
}

impl fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnetRole::Node => f.write_str("node"),
            SubnetRole::ControlPlane => f.write_str("control-plane"),
        }
    }
}

/// SubnetSpec configures a subnet of the virtual network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSpec {
    /// Subnet role
    #[serde(default)]
    pub role: SubnetRole,

    /// Azure resource ID of a pre-existing subnet
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Subnet name
    pub name: String,

    /// Address prefixes of the subnet
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cidr_blocks: Vec<String>,

    /// NAT gateway attached to the subnet
    #[serde(default)]
    pub nat_gateway: NatGateway,
}

impl SubnetSpec {
    /// True if a NAT gateway was requested for this subnet.
    pub fn is_nat_gateway_enabled(&self) -> bool {
        !self.nat_gateway.name.is_empty()
    }
}

/// NatGateway is the NAT gateway recorded on a subnet.
///
/// `id` is filled in by the reconciler once the gateway exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NatGateway {
    /// Azure resource ID of the NAT gateway
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// NAT gateway name
    #[serde(default)]
    pub name: String,

    /// Public IP bound to the NAT gateway
    #[serde(default, rename = "ip")]
    pub nat_gateway_ip: PublicIpSpec,
}

/// PublicIpSpec names a public IP address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicIpSpec {
    /// Public IP name
    #[serde(default)]
    pub name: String,

    /// DNS label of the public IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
}

impl PublicIpSpec {
    /// Creates a spec naming a public IP without a DNS label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dns_name: None,
        }
    }
}

/// NatGatewaySpec is the desired state of one NAT gateway.
///
/// Produced per reconciliation pass from the node subnets that request one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NatGatewaySpec {
    /// NAT gateway name, unique within the resource group
    pub name: String,
    /// Subnet the NAT gateway is attached to
    pub subnet: SubnetSpec,
    /// Public IP the NAT gateway egresses through
    pub nat_gateway_ip: PublicIpSpec,
}
