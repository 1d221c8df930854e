//! Common interface of resource-family services.

use azure_network_client::Context;

/// A service that converges one family of Azure resources.
///
/// Callers drive each pass themselves and decide whether and when to run it
/// again; implementations do not retry internally.
#[async_trait::async_trait]
pub trait Reconciler: Send + Sync {
    /// Error returned when a pass fails
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates or updates the resources to match the desired state
    async fn reconcile(&self, ctx: &Context) -> Result<(), Self::Error>;

    /// Removes the resources
    async fn delete(&self, ctx: &Context) -> Result<(), Self::Error>;
}
