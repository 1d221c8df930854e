//! Mock NAT gateway client for unit testing
//!
//! This module provides a mock implementation of NatGatewayClientTrait that can be used
//! in unit tests without reaching Azure. Resources live in memory, failures can be
//! injected per operation, and every call is recorded for later assertions.

use crate::context::Context;
use crate::error::AzureError;
use crate::models::NatGateway;
use crate::nat_gateway_trait::NatGatewayClientTrait;
use crate::resource_id::nat_gateway_id;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// NAT gateway operation, used to target failures and filter the call log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `get`
    Get,
    /// `create_or_update`
    CreateOrUpdate,
    /// `delete`
    Delete,
}

/// A recorded call against the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Operation invoked
    pub operation: Operation,
    /// Resource group argument
    pub resource_group: String,
    /// Name argument
    pub name: String,
    /// Payload, for `create_or_update`
    pub payload: Option<NatGateway>,
}

/// Mock NAT gateway client for testing
#[derive(Clone)]
pub struct MockNatGatewayClient {
    subscription_id: String,
    // In-memory storage keyed by (resource group, name)
    nat_gateways: Arc<Mutex<HashMap<(String, String), NatGateway>>>,
    failures: Arc<Mutex<HashMap<Operation, (u16, String)>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockNatGatewayClient {
    /// Create a new mock client for a subscription
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            nat_gateways: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a NAT gateway to the mock store (for test setup)
    ///
    /// The gateway is keyed by its `name`.
    pub fn add_nat_gateway(&self, resource_group: &str, nat_gateway: NatGateway) {
        let name = nat_gateway.name.clone().unwrap_or_default();
        self.nat_gateways
            .lock()
            .unwrap()
            .insert((resource_group.to_string(), name), nat_gateway);
    }

    /// Look up a stored NAT gateway
    pub fn nat_gateway(&self, resource_group: &str, name: &str) -> Option<NatGateway> {
        self.nat_gateways
            .lock()
            .unwrap()
            .get(&(resource_group.to_string(), name.to_string()))
            .cloned()
    }

    /// Make every call of `operation` fail with the given status and message
    ///
    /// Errors carry empty package and method names, so a 500 renders as
    /// `#: Internal Server Error: StatusCode=500`.
    pub fn fail_with(&self, operation: Operation, status: u16, message: impl Into<String>) {
        self.failures.lock().unwrap().insert(operation, (status, message.into()));
    }

    /// Stop failing `operation`
    pub fn clear_failure(&self, operation: Operation) {
        self.failures.lock().unwrap().remove(&operation);
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls of one operation, in order
    pub fn calls_for(&self, operation: Operation) -> Vec<MockCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .collect()
    }

    fn record(&self, operation: Operation, resource_group: &str, name: &str, payload: Option<NatGateway>) {
        self.calls.lock().unwrap().push(MockCall {
            operation,
            resource_group: resource_group.to_string(),
            name: name.to_string(),
            payload,
        });
    }

    /// Injected failure or context error for this call, if any
    fn check(&self, ctx: &Context, operation: Operation) -> Result<(), AzureError> {
        if let Some(err) = ctx.err() {
            return Err(err);
        }
        match self.failures.lock().unwrap().get(&operation) {
            Some((status, message)) => Err(AzureError::with_response("", "", *status, message.clone())),
            None => Ok(()),
        }
    }

    fn not_found() -> AzureError {
        AzureError::with_response("", "", 404, "Not found")
    }
}

#[async_trait::async_trait]
impl NatGatewayClientTrait for MockNatGatewayClient {
    async fn get(&self, ctx: &Context, resource_group: &str, name: &str) -> Result<NatGateway, AzureError> {
        self.record(Operation::Get, resource_group, name, None);
        self.check(ctx, Operation::Get)?;
        self.nat_gateway(resource_group, name).ok_or_else(Self::not_found)
    }

    async fn create_or_update(&self, ctx: &Context, resource_group: &str, name: &str, nat_gateway: NatGateway) -> Result<(), AzureError> {
        self.record(Operation::CreateOrUpdate, resource_group, name, Some(nat_gateway.clone()));
        self.check(ctx, Operation::CreateOrUpdate)?;

        let mut stored = nat_gateway;
        stored.id = Some(nat_gateway_id(&self.subscription_id, resource_group, name));
        stored.name = Some(name.to_string());
        self.nat_gateways
            .lock()
            .unwrap()
            .insert((resource_group.to_string(), name.to_string()), stored);
        Ok(())
    }

    async fn delete(&self, ctx: &Context, resource_group: &str, name: &str) -> Result<(), AzureError> {
        self.record(Operation::Delete, resource_group, name, None);
        self.check(ctx, Operation::Delete)?;
        self.nat_gateways
            .lock()
            .unwrap()
            .remove(&(resource_group.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(Self::not_found)
    }
}
