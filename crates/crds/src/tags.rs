//! Resource tags and the ownership tag convention.
//!
//! Every Azure resource created for a cluster carries a tag keyed by
//! [`cluster_tag_key`] whose value is the [`ResourceLifecycle`]: `owned` when
//! the cluster created the resource, `shared` when it was brought by an
//! operator and must be left alone.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Prefix of the per-cluster ownership tag key.
pub const CLUSTER_TAG_PREFIX: &str = "sigs.k8s.io_cluster-api-provider-azure_cluster_";

/// Key of the tag describing the role a resource plays in the cluster.
pub const ROLE_TAG_KEY: &str = "sigs.k8s.io_cluster-api-provider-azure_role";

/// Key of the human-readable name tag.
pub const NAME_TAG_KEY: &str = "Name";

/// Builds the ownership tag key for a cluster.
pub fn cluster_tag_key(cluster_name: &str) -> String {
    format!("{CLUSTER_TAG_PREFIX}{cluster_name}")
}

/// Lifecycle of a resource relative to the cluster that tagged it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceLifecycle {
    /// Created and managed by the cluster.
    Owned,
    /// Supplied externally; the cluster only uses it.
    Shared,
}

impl ResourceLifecycle {
    /// Tag value for this lifecycle.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceLifecycle::Owned => "owned",
            ResourceLifecycle::Shared => "shared",
        }
    }
}

impl fmt::Display for ResourceLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String-keyed tag map as attached to Azure resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Tags(pub BTreeMap<String, String>);

impl Tags {
    /// Creates an empty tag map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tag value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Inserts or replaces a tag.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Reads the ownership lifecycle recorded for `cluster_name`.
    ///
    /// Unknown tag values are treated as absent.
    pub fn lifecycle(&self, cluster_name: &str) -> Option<ResourceLifecycle> {
        match self.get(&cluster_tag_key(cluster_name))? {
            "owned" => Some(ResourceLifecycle::Owned),
            "shared" => Some(ResourceLifecycle::Shared),
            _ => None,
        }
    }

    /// True if the tags mark the resource as owned by `cluster_name`.
    pub fn has_owned(&self, cluster_name: &str) -> bool {
        self.lifecycle(cluster_name) == Some(ResourceLifecycle::Owned)
    }

    /// Returns a copy of `self` with every tag from `other` applied on top.
    pub fn merge(&self, other: &Tags) -> Tags {
        let mut merged = self.clone();
        for (key, value) in &other.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    /// True if no tags are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Tags(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vnet_tags(lifecycle: &str) -> Tags {
        Tags::from_iter([
            ("Name", "my-vnet"),
            ("sigs.k8s.io_cluster-api-provider-azure_cluster_test-cluster", lifecycle),
            ("sigs.k8s.io_cluster-api-provider-azure_role", "common"),
        ])
    }

    #[test]
    fn test_cluster_tag_key() {
        assert_eq!(
            cluster_tag_key("test-cluster"),
            "sigs.k8s.io_cluster-api-provider-azure_cluster_test-cluster"
        );
    }

    #[test]
    fn test_lifecycle_owned_and_shared() {
        assert_eq!(vnet_tags("owned").lifecycle("test-cluster"), Some(ResourceLifecycle::Owned));
        assert_eq!(vnet_tags("shared").lifecycle("test-cluster"), Some(ResourceLifecycle::Shared));
        assert!(vnet_tags("owned").has_owned("test-cluster"));
        assert!(!vnet_tags("shared").has_owned("test-cluster"));
    }

    #[test]
    fn test_lifecycle_other_cluster_or_unknown_value() {
        assert_eq!(vnet_tags("owned").lifecycle("another-cluster"), None);
        assert_eq!(vnet_tags("borrowed").lifecycle("test-cluster"), None);
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = Tags::from_iter([("a", "1"), ("b", "2")]);
        let extra = Tags::from_iter([("b", "3"), ("c", "4")]);
        let merged = base.merge(&extra);
        assert_eq!(merged.get("a"), Some("1"));
        assert_eq!(merged.get("b"), Some("3"));
        assert_eq!(merged.get("c"), Some("4"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let tags = Tags::from_iter([("Name", "my-vnet")]);
        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(json, serde_json::json!({ "Name": "my-vnet" }));
    }
}
