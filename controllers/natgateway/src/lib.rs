//! NAT Gateway Controller
//!
//! Reconciles the NAT gateways of an AzureCluster's node subnets:
//! - Ownership: only acts when the cluster owns its virtual network
//! - Reconcile: creates missing gateways, converges gateways bound to the
//!   wrong public IP, and records each gateway's identity on its subnet
//! - Delete: removes the gateways, treating already-deleted ones as done
//!
//! Each pass is a single sequential run; scheduling passes and retrying
//! failed ones is left to the caller.

pub mod error;
pub mod ownership;
pub mod reconciler;
pub mod scope;
pub mod services;
pub mod telemetry;
#[cfg(test)]
mod test_utils;

pub use error::NatGatewayError;
pub use ownership::NetworkOwnership;
pub use reconciler::Reconciler;
pub use scope::{ClusterScope, NatGatewayScope};
pub use services::NatGatewayService;
