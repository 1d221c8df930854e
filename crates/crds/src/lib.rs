//! AzureCluster CRD Definitions
//!
//! Kubernetes Custom Resource Definitions and network types consumed by the
//! Azure network controllers.

pub mod azure_cluster;
pub mod network;
pub mod tags;

pub use azure_cluster::*;
pub use network::*;
pub use tags::*;
