//! Resource-family services.

pub mod natgateways;

pub use natgateways::NatGatewayService;
