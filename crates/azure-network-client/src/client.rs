//! Azure Resource Manager client for NAT gateways
//!
//! Implements the NAT gateway operations of the `Microsoft.Network` provider:
//! `/subscriptions/{sub}/resourceGroups/{group}/providers/Microsoft.Network/natGateways/{name}`

use crate::config::AzureClientConfig;
use crate::context::Context;
use crate::error::AzureError;
use crate::models::{CloudError, NatGateway};
use crate::nat_gateway_trait::NatGatewayClientTrait;
use crate::resource_id::nat_gateway_id;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

/// API version used for every NAT gateway request.
pub const API_VERSION: &str = "2019-06-01";

/// Client package name reported in response errors.
pub const PACKAGE: &str = "network.NatGatewaysClient";

/// Azure Resource Manager client scoped to one subscription
pub struct AzureNetworkClient {
    client: Client,
    endpoint: String,
    subscription_id: String,
    token: String,
}

impl AzureNetworkClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `config` - Endpoint, subscription, token and request timeout
    pub fn new(config: AzureClientConfig) -> Result<Self, AzureError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            subscription_id: config.subscription_id,
            token: config.access_token,
        })
    }

    /// Create a client from `AZURE_*` environment variables
    pub fn from_env() -> Result<Self, AzureError> {
        Self::new(AzureClientConfig::from_env()?)
    }

    fn nat_gateway_url(&self, resource_group: &str, name: &str) -> String {
        format!(
            "{}{}",
            self.endpoint,
            nat_gateway_id(&self.subscription_id, resource_group, name)
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .query(&[("api-version", API_VERSION)])
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
    }

    /// Turns a non-success response into an [`AzureError::Response`].
    ///
    /// The message comes from the ARM error envelope when the body has one,
    /// otherwise from the status reason phrase.
    async fn response_error(method: &str, response: Response) -> AzureError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<CloudError>(&body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| match (e.code, e.message) {
                (Some(code), Some(message)) => Some(format!("{code}: {message}")),
                (None, Some(message)) => Some(message),
                (Some(code), None) => Some(code),
                (None, None) => None,
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

        AzureError::with_response(PACKAGE, method, status.as_u16(), message)
    }

    async fn get_nat_gateway(&self, resource_group: &str, name: &str) -> Result<NatGateway, AzureError> {
        let url = self.nat_gateway_url(resource_group, name);
        debug!("Fetching nat gateway {} in {}", name, resource_group);

        let response = self.request(Method::GET, &url).send().await?;
        if !response.status().is_success() {
            return Err(Self::response_error("Get", response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn put_nat_gateway(&self, resource_group: &str, name: &str, nat_gateway: &NatGateway) -> Result<(), AzureError> {
        let url = self.nat_gateway_url(resource_group, name);
        debug!("Creating or updating nat gateway {} in {}", name, resource_group);

        let response = self.request(Method::PUT, &url).json(nat_gateway).send().await?;
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(()),
            _ => Err(Self::response_error("CreateOrUpdate", response).await),
        }
    }

    async fn delete_nat_gateway(&self, resource_group: &str, name: &str) -> Result<(), AzureError> {
        let url = self.nat_gateway_url(resource_group, name);
        debug!("Deleting nat gateway {} in {}", name, resource_group);

        let response = self.request(Method::DELETE, &url).send().await?;
        match response.status() {
            StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(Self::response_error("Delete", response).await),
        }
    }
}

#[async_trait::async_trait]
impl NatGatewayClientTrait for AzureNetworkClient {
    async fn get(&self, ctx: &Context, resource_group: &str, name: &str) -> Result<NatGateway, AzureError> {
        ctx.run(self.get_nat_gateway(resource_group, name)).await
    }

    async fn create_or_update(&self, ctx: &Context, resource_group: &str, name: &str, nat_gateway: NatGateway) -> Result<(), AzureError> {
        ctx.run(self.put_nat_gateway(resource_group, name, &nat_gateway)).await
    }

    async fn delete(&self, ctx: &Context, resource_group: &str, name: &str) -> Result<(), AzureError> {
        ctx.run(self.delete_nat_gateway(resource_group, name)).await
    }
}
