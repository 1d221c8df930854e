//! AzureCluster Custom Resource Definition
//!
//! Describes the Azure infrastructure of a cluster: where it lives
//! (subscription, resource group, location) and its network layout.

use crate::network::NetworkSpec;
use crate::tags::Tags;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// AzureClusterSpec defines the desired Azure infrastructure of a cluster
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1alpha3",
    kind = "AzureCluster",
    namespaced,
    status = "AzureClusterStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct AzureClusterSpec {
    /// Azure subscription the cluster's resources live in
    #[serde(default)]
    pub subscription_id: String,

    /// Resource group holding the cluster's resources
    pub resource_group: String,

    /// Azure region
    pub location: String,

    /// Virtual network and subnets
    #[serde(default)]
    pub network_spec: NetworkSpec,

    /// Tags added to every resource created for the cluster
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub additional_tags: Tags,
}

/// AzureClusterStatus defines the observed state of an AzureCluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AzureClusterStatus {
    /// True once the cluster infrastructure has been provisioned
    #[serde(default)]
    pub ready: bool,

    /// Error message if reconciliation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}
