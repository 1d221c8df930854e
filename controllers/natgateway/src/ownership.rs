//! Network ownership classification.
//!
//! Resources attached to a virtual network are only touched when this
//! controller owns the network. A virtual network with a populated ID was
//! supplied by an operator ("custom vnet mode") and is left alone, along with
//! everything attached to it.

use crds::VnetSpec;

/// Whether the parent virtual network is managed by this controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOwnership {
    /// Created by this controller; attached resources are ours to manage
    Managed,
    /// Supplied externally; attached resources must not be touched
    Unmanaged,
}

impl NetworkOwnership {
    /// Classifies a virtual network. Total over its input: an empty ID is
    /// `Managed`, anything else `Unmanaged`.
    pub fn of(vnet: &VnetSpec) -> Self {
        if vnet.is_managed() {
            NetworkOwnership::Managed
        } else {
            NetworkOwnership::Unmanaged
        }
    }

    /// True for [`NetworkOwnership::Managed`].
    pub fn is_managed(self) -> bool {
        self == NetworkOwnership::Managed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::Tags;

    #[test]
    fn test_empty_id_is_managed() {
        let vnet = VnetSpec {
            name: "my-vnet".to_string(),
            ..Default::default()
        };
        assert_eq!(NetworkOwnership::of(&vnet), NetworkOwnership::Managed);
        assert!(NetworkOwnership::of(&vnet).is_managed());
    }

    #[test]
    fn test_populated_id_is_unmanaged_regardless_of_tags() {
        let vnet = VnetSpec {
            id: "1234".to_string(),
            name: "my-vnet".to_string(),
            tags: Tags::from_iter([(
                "sigs.k8s.io_cluster-api-provider-azure_cluster_test-cluster",
                "owned",
            )]),
            ..Default::default()
        };
        assert_eq!(NetworkOwnership::of(&vnet), NetworkOwnership::Unmanaged);
    }
}
