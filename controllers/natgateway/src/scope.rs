//! Scope: where the NAT gateway service reads desired state from and writes
//! results back to.
//!
//! [`NatGatewayScope`] is the capability set the service depends on;
//! [`ClusterScope`] is the production implementation backed by an
//! [`AzureCluster`] resource.

use crds::{AzureCluster, NatGatewaySpec, SubnetSpec, Tags, VnetSpec};
use kube::ResourceExt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Capability set consumed by the NAT gateway service.
///
/// Methods take `&self`; implementations that record writes use interior
/// mutability. The service calls one method at a time.
pub trait NatGatewayScope: Send + Sync {
    /// Virtual network the NAT gateways' subnets belong to
    fn vnet(&self) -> VnetSpec;

    /// Name of the cluster being reconciled
    fn cluster_name(&self) -> String;

    /// Desired NAT gateways, in processing order
    fn nat_gateway_specs(&self) -> Vec<NatGatewaySpec>;

    /// Subscription the resources live in
    fn subscription_id(&self) -> String;

    /// Resource group the resources live in
    fn resource_group(&self) -> String;

    /// Azure region for new resources
    fn location(&self) -> String;

    /// Tags added to every resource created for the cluster
    fn additional_tags(&self) -> Tags {
        Tags::default()
    }

    /// Records the resolved subnet, including its NAT gateway identity
    fn set_subnet(&self, subnet: SubnetSpec);
}

/// Scope backed by an [`AzureCluster`].
#[derive(Debug)]
pub struct ClusterScope {
    cluster: Mutex<AzureCluster>,
}

impl ClusterScope {
    /// Wraps a cluster resource.
    pub fn new(cluster: AzureCluster) -> Self {
        Self {
            cluster: Mutex::new(cluster),
        }
    }

    /// Returns the cluster, including any subnets written back during a pass.
    pub fn into_cluster(self) -> AzureCluster {
        self.cluster.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn cluster(&self) -> MutexGuard<'_, AzureCluster> {
        self.cluster.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NatGatewayScope for ClusterScope {
    fn vnet(&self) -> VnetSpec {
        self.cluster().spec.network_spec.vnet.clone()
    }

    fn cluster_name(&self) -> String {
        self.cluster().name_any()
    }

    /// One spec per node subnet with a NAT gateway name. Control plane
    /// subnets egress through the API server load balancer instead.
    fn nat_gateway_specs(&self) -> Vec<NatGatewaySpec> {
        self.cluster()
            .spec
            .network_spec
            .node_subnets()
            .filter(|subnet| subnet.is_nat_gateway_enabled())
            .map(|subnet| NatGatewaySpec {
                name: subnet.nat_gateway.name.clone(),
                subnet: subnet.clone(),
                nat_gateway_ip: subnet.nat_gateway.nat_gateway_ip.clone(),
            })
            .collect()
    }

    fn subscription_id(&self) -> String {
        self.cluster().spec.subscription_id.clone()
    }

    fn resource_group(&self) -> String {
        self.cluster().spec.resource_group.clone()
    }

    fn location(&self) -> String {
        self.cluster().spec.location.clone()
    }

    fn additional_tags(&self) -> Tags {
        self.cluster().spec.additional_tags.clone()
    }

    fn set_subnet(&self, subnet: SubnetSpec) {
        self.cluster().spec.network_spec.upsert_subnet(subnet);
    }
}
