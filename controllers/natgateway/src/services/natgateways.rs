//! NAT gateway reconciliation.
//!
//! Converges the NAT gateways requested on the cluster's node subnets and
//! records each gateway's identity back on its subnet. Specs are processed in
//! order and the first failure aborts the pass, so no subnet is ever written
//! back with an unverified identity.

use crate::error::NatGatewayError;
use crate::ownership::NetworkOwnership;
use crate::reconciler::Reconciler;
use crate::scope::NatGatewayScope;
use azure_network_client::{
    nat_gateway_id, public_ip_id, AzureError, Context, NatGateway as NatGatewayResource,
    NatGatewayClientTrait, NatGatewayProperties, NatGatewaySku, NatGatewaySkuName, ResourceId,
    SubResource,
};
use crds::{
    cluster_tag_key, NatGateway, NatGatewaySpec, PublicIpSpec, ResourceLifecycle, Tags, NAME_TAG_KEY, ROLE_TAG_KEY,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Name of this service, used in logs.
pub const SERVICE_NAME: &str = "natgateways";

/// Resource kind used in error messages.
const RESOURCE_KIND: &str = "nat gateway";

/// Reconciles NAT gateways for the subnets of a scope.
pub struct NatGatewayService<S, C> {
    scope: S,
    client: C,
}

impl<S, C> NatGatewayService<S, C>
where
    S: NatGatewayScope,
    C: NatGatewayClientTrait,
{
    /// Creates a service over a scope and a provider client.
    pub fn new(scope: S, client: C) -> Self {
        Self { scope, client }
    }

    /// The scope this service reads from and writes to.
    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Consumes the service, returning its scope.
    pub fn into_scope(self) -> S {
        self.scope
    }

    /// Creates or converges every desired NAT gateway.
    ///
    /// A gateway already bound to exactly the desired public IP is left
    /// untouched. Its identity is still written back to the subnet.
    pub async fn reconcile(&self, ctx: &Context) -> Result<(), NatGatewayError> {
        if !self.is_managed("reconcile") {
            return Ok(());
        }

        for spec in self.scope.nat_gateway_specs() {
            self.reconcile_nat_gateway(ctx, spec).await?;
        }
        Ok(())
    }

    /// Deletes every desired NAT gateway. Gateways that are already gone
    /// count as deleted.
    pub async fn delete(&self, ctx: &Context) -> Result<(), NatGatewayError> {
        if !self.is_managed("delete") {
            return Ok(());
        }

        for spec in self.scope.nat_gateway_specs() {
            let resource_group = self.scope.resource_group();
            info!("Deleting nat gateway {} in resource group {}", spec.name, resource_group);

            match self.client.delete(ctx, &resource_group, &spec.name).await {
                Ok(()) => info!("Successfully deleted nat gateway {}", spec.name),
                Err(e) if e.is_not_found() => {
                    debug!("Nat gateway {} already deleted", spec.name);
                }
                Err(source) => {
                    return Err(NatGatewayError::Delete {
                        kind: RESOURCE_KIND,
                        name: spec.name,
                        resource_group,
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    fn is_managed(&self, operation: &str) -> bool {
        let vnet = self.scope.vnet();
        let cluster_name = self.scope.cluster_name();

        if NetworkOwnership::of(&vnet).is_managed() {
            return true;
        }
        info!(
            service = SERVICE_NAME,
            vnet = %vnet.name,
            cluster = %cluster_name,
            lifecycle = ?vnet.tags.lifecycle(&cluster_name),
            "Skipping nat gateways {} in custom vnet mode",
            operation
        );
        false
    }

    async fn reconcile_nat_gateway(&self, ctx: &Context, spec: NatGatewaySpec) -> Result<(), NatGatewayError> {
        let resource_group = self.scope.resource_group();

        match self.client.get(ctx, &resource_group, &spec.name).await {
            Ok(existing) => {
                let desired_ip_id = public_ip_id(&self.scope.subscription_id(), &resource_group, &spec.nat_gateway_ip.name);
                let actual_ip_ids = existing.public_ip_address_ids();

                if actual_ip_ids == BTreeSet::from([desired_ip_id.as_str()]) {
                    debug!("Nat gateway {} exists with expected values, skipping update", spec.name);
                    self.write_back(spec, &resource_group);
                    return Ok(());
                }
                info!(
                    desired = %spec.nat_gateway_ip.name,
                    actual = ?public_ip_names(&actual_ip_ids),
                    "Nat gateway {} public IP has changed, updating",
                    spec.name
                );
            }
            Err(e) if e.is_not_found() => {
                info!("Nat gateway {} doesn't exist yet, creating it", spec.name);
            }
            Err(source) => {
                return Err(NatGatewayError::Get {
                    kind: RESOURCE_KIND,
                    name: spec.name,
                    resource_group,
                    source,
                });
            }
        }

        let desired = self.desired_nat_gateway(&spec, &resource_group);
        if let Err(source) = self
            .client
            .create_or_update(ctx, &resource_group, &spec.name, desired)
            .await
        {
            return Err(NatGatewayError::Create {
                kind: RESOURCE_KIND,
                name: spec.name,
                resource_group,
                source,
            });
        }

        info!("Successfully created nat gateway {}", spec.name);
        self.write_back(spec, &resource_group);
        Ok(())
    }

    /// Payload for `create_or_update`: a Standard SKU gateway bound to the
    /// spec's public IP, tagged as owned by the cluster.
    fn desired_nat_gateway(&self, spec: &NatGatewaySpec, resource_group: &str) -> NatGatewayResource {
        let subscription_id = self.scope.subscription_id();
        let tags = self.scope.additional_tags().merge(&Tags::from_iter([
            (cluster_tag_key(&self.scope.cluster_name()), ResourceLifecycle::Owned.as_str().to_string()),
            (ROLE_TAG_KEY.to_string(), spec.subnet.role.to_string()),
            (NAME_TAG_KEY.to_string(), spec.name.clone()),
        ]));

        NatGatewayResource {
            name: Some(spec.name.clone()),
            location: Some(self.scope.location()),
            tags: Some(tags.0),
            sku: Some(NatGatewaySku {
                name: Some(NatGatewaySkuName::Standard),
            }),
            properties: Some(NatGatewayProperties {
                public_ip_addresses: Some(vec![SubResource::new(public_ip_id(
                    &subscription_id,
                    resource_group,
                    &spec.nat_gateway_ip.name,
                ))]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Records the gateway's identity on its subnet.
    fn write_back(&self, spec: NatGatewaySpec, resource_group: &str) {
        let mut subnet = spec.subnet;
        subnet.nat_gateway = NatGateway {
            id: nat_gateway_id(&self.scope.subscription_id(), resource_group, &spec.name),
            name: spec.name,
            nat_gateway_ip: PublicIpSpec::named(spec.nat_gateway_ip.name),
        };
        self.scope.set_subnet(subnet);
    }
}

/// Public IP names for logging; unparseable IDs are shown as-is.
fn public_ip_names(ids: &BTreeSet<&str>) -> Vec<String> {
    ids.iter()
        .map(|id| {
            ResourceId::parse(id)
                .map(|r| r.name)
                .unwrap_or_else(|_: AzureError| (*id).to_string())
        })
        .collect()
}

#[async_trait::async_trait]
impl<S, C> Reconciler for NatGatewayService<S, C>
where
    S: NatGatewayScope,
    C: NatGatewayClientTrait,
{
    type Error = NatGatewayError;

    async fn reconcile(&self, ctx: &Context) -> Result<(), Self::Error> {
        NatGatewayService::reconcile(self, ctx).await
    }

    async fn delete(&self, ctx: &Context) -> Result<(), Self::Error> {
        NatGatewayService::delete(self, ctx).await
    }
}
