use serde::{Deserialize, Serialize};

use crate::layer::RemoteLayer;
use crate::resource::{ResourceLeaf, ResourceTree};
use crate::types::ProjectId;

/// A parsed project document.
///
/// Built only by [`parse_project`](crate::parser::parse_project) and
/// handed to the caller as-is; a newer version of the same project is a
/// new value, never an update of this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Initial map extent identifier.
    pub screen: String,
    pub version: i32,
    /// Render-order layers with folders flattened away.
    pub layers: Vec<RemoteLayer>,
    /// Serialized [`ResourceTree`].
    pub tree: String,
    pub url: String,
    /// Owner username.
    pub user: String,
    /// Content fingerprint used for change detection.
    pub hash: String,
}

impl Project {
    /// Decode the embedded tree.
    pub fn resource_tree(&self) -> ResourceTree {
        ResourceTree::from_json(&self.tree)
    }

    /// The flat-list layer a tree leaf refers to.
    ///
    /// Correlation is by position, so leaves with the same title, type and
    /// url still resolve to their own layer. `None` when the leaf does not
    /// belong to this project's tree.
    pub fn layer_for(&self, leaf: &ResourceLeaf) -> Option<&RemoteLayer> {
        self.layers.get(leaf.index).filter(|layer| leaf.refers_to(layer))
    }

    /// Whether `other` carries different content, judged by `hash`.
    pub fn differs_from(&self, other: &Project) -> bool {
        self.id != other.id || self.hash != other.hash
    }
}
