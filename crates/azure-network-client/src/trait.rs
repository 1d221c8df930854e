//! NatGatewayClient trait for mocking
//!
//! This trait abstracts the NAT gateway API to enable mocking in unit tests.
//! The concrete AzureNetworkClient implements this trait, and tests can use mock implementations.

use crate::context::Context;
use crate::error::AzureError;
use crate::models::NatGateway;

/// Trait for NAT gateway API operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NatGatewayClientTrait: Send + Sync {
    /// Fetch a NAT gateway by name
    async fn get(&self, ctx: &Context, resource_group: &str, name: &str) -> Result<NatGateway, AzureError>;

    /// Create a NAT gateway, or replace an existing one with `nat_gateway`
    async fn create_or_update(&self, ctx: &Context, resource_group: &str, name: &str, nat_gateway: NatGateway) -> Result<(), AzureError>;

    /// Delete a NAT gateway by name
    async fn delete(&self, ctx: &Context, resource_group: &str, name: &str) -> Result<(), AzureError>;
}
