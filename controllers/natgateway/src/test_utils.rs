//! Test utilities for unit testing the NAT gateway service
//!
//! Provides a recording scope double and helpers for building test data.

use crate::scope::NatGatewayScope;
use crds::{
    AzureCluster, AzureClusterSpec, NatGateway, NatGatewaySpec, NetworkSpec, PublicIpSpec, SubnetRole,
    SubnetSpec, Tags, VnetSpec,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Tags of a virtual network as tagged for `test-cluster`
pub fn vnet_tags(lifecycle: &str) -> Tags {
    Tags::from_iter([
        ("Name", "my-vnet"),
        ("sigs.k8s.io_cluster-api-provider-azure_cluster_test-cluster", lifecycle),
        ("sigs.k8s.io_cluster-api-provider-azure_role", "common"),
    ])
}

/// Virtual network created by the controller
pub fn managed_vnet() -> VnetSpec {
    VnetSpec {
        name: "my-vnet".to_string(),
        tags: vnet_tags("owned"),
        ..Default::default()
    }
}

/// Virtual network brought by an operator
pub fn custom_vnet() -> VnetSpec {
    VnetSpec {
        id: "1234".to_string(),
        name: "my-vnet".to_string(),
        tags: vnet_tags("shared"),
        ..Default::default()
    }
}

/// Desired NAT gateway on a node subnet
pub fn create_test_nat_gateway_spec(name: &str, subnet_name: &str, ip_name: &str) -> NatGatewaySpec {
    NatGatewaySpec {
        name: name.to_string(),
        subnet: SubnetSpec {
            role: SubnetRole::Node,
            name: subnet_name.to_string(),
            ..Default::default()
        },
        nat_gateway_ip: PublicIpSpec::named(ip_name),
    }
}

/// Helper to create a test AzureCluster with a managed vnet, a control plane
/// subnet, a node subnet with a NAT gateway and a node subnet without one
pub fn create_test_azure_cluster(name: &str) -> AzureCluster {
    let subnet = |role, name: &str, nat_gateway: &str, ip: &str| SubnetSpec {
        role,
        name: name.to_string(),
        nat_gateway: NatGateway {
            name: nat_gateway.to_string(),
            nat_gateway_ip: PublicIpSpec::named(ip),
            ..Default::default()
        },
        ..Default::default()
    };

    AzureCluster::new(
        name,
        AzureClusterSpec {
            subscription_id: "123".to_string(),
            resource_group: "my-rg".to_string(),
            location: "westus".to_string(),
            network_spec: NetworkSpec {
                vnet: managed_vnet(),
                subnets: vec![
                    subnet(SubnetRole::ControlPlane, "cp-subnet", "cp-natgateway", "pip-cp-subnet"),
                    subnet(SubnetRole::Node, "node-subnet", "my-node-natgateway", "pip-node-subnet"),
                    subnet(SubnetRole::Node, "extra-node-subnet", "", ""),
                ],
            },
            additional_tags: Tags::from_iter([("env", "test")]),
        },
    )
}

/// Scope double that serves fixed values and records what the service asks for
pub struct MockScope {
    pub vnet: VnetSpec,
    pub specs: Vec<NatGatewaySpec>,
    pub subscription_id: String,
    pub resource_group: String,
    pub location: String,
    location_calls: AtomicUsize,
    spec_calls: AtomicUsize,
    subnets: Mutex<Vec<SubnetSpec>>,
}

impl MockScope {
    /// Scope for `test-cluster` in subscription `123`, group `my-rg`, region `westus`
    pub fn new(vnet: VnetSpec, specs: Vec<NatGatewaySpec>) -> Self {
        Self {
            vnet,
            specs,
            subscription_id: "123".to_string(),
            resource_group: "my-rg".to_string(),
            location: "westus".to_string(),
            location_calls: AtomicUsize::new(0),
            spec_calls: AtomicUsize::new(0),
            subnets: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `location()` was called
    pub fn location_calls(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }

    /// Number of times `nat_gateway_specs()` was called
    pub fn spec_calls(&self) -> usize {
        self.spec_calls.load(Ordering::SeqCst)
    }

    /// Subnets passed to `set_subnet`, in order
    pub fn subnets_set(&self) -> Vec<SubnetSpec> {
        self.subnets.lock().unwrap().clone()
    }
}

impl NatGatewayScope for MockScope {
    fn vnet(&self) -> VnetSpec {
        self.vnet.clone()
    }

    fn cluster_name(&self) -> String {
        "test-cluster".to_string()
    }

    fn nat_gateway_specs(&self) -> Vec<NatGatewaySpec> {
        self.spec_calls.fetch_add(1, Ordering::SeqCst);
        self.specs.clone()
    }

    fn subscription_id(&self) -> String {
        self.subscription_id.clone()
    }

    fn resource_group(&self) -> String {
        self.resource_group.clone()
    }

    fn location(&self) -> String {
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        self.location.clone()
    }

    fn set_subnet(&self, subnet: SubnetSpec) {
        self.subnets.lock().unwrap().push(subnet);
    }
}
