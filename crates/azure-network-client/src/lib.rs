//! Azure Network Client
//!
//! A Rust client for the NAT gateway operations of the Azure Resource Manager
//! `Microsoft.Network` provider, plus the pieces every caller needs around it:
//! a cancellation [`Context`], error classification and resource IDs.
//!
//! # Example
//!
//! ```no_run
//! use azure_network_client::{AzureNetworkClient, Context, NatGatewayClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads AZURE_SUBSCRIPTION_ID and AZURE_ACCESS_TOKEN
//! let client = AzureNetworkClient::from_env()?;
//!
//! let ctx = Context::with_timeout(std::time::Duration::from_secs(60));
//! match client.get(&ctx, "my-rg", "my-node-natgateway").await {
//!     Ok(gw) => println!("found {:?}", gw.id),
//!     Err(e) if e.is_not_found() => println!("not created yet"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `test-util`: enables [`MockNatGatewayClient`], an in-memory implementation
//!   of [`NatGatewayClientTrait`] with failure injection and a call log

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod nat_gateway_trait;
pub mod resource_id;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::AzureNetworkClient;
pub use config::AzureClientConfig;
pub use context::{CancelHandle, Context};
pub use error::{AzureError, ErrorClass};
pub use models::*;
pub use nat_gateway_trait::NatGatewayClientTrait;
pub use resource_id::{nat_gateway_id, public_ip_id, resource_id, ResourceId};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockCall, MockNatGatewayClient, Operation};
