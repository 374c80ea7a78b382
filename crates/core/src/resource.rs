//! Folder/layer hierarchy as presented for navigation.
//!
//! The tree is a second projection over the same `layers` array the
//! flat layer list is built from. Folders (`"type": "dir"`) are kept as
//! [`ResourceGroup`] nodes instead of being flattened; recognized layers
//! become [`ResourceLeaf`] nodes carrying enough identity to correlate
//! them with the flat list. Unrecognized entries are skipped in both
//! projections.
//!
//! The serialized form uses the layer JSON shape, so a serialized tree
//! can be fed back through [`parse_resources`].

use serde_json::{json, Value};

use crate::json_field::Fields;
use crate::layer::{LayerKind, RemoteLayer};
use crate::types::layer_type;

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceNode {
    Group(ResourceGroup),
    Leaf(ResourceLeaf),
}

/// A folder and its immediate children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup {
    pub title: String,
    /// True when the group sits at the root of the tree.
    pub top_level: bool,
    pub children: Vec<ResourceNode>,
}

/// A reference to one layer of the flat list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLeaf {
    pub title: String,
    pub layer_type: String,
    pub url: String,
    /// True when the leaf sits at the root of the tree.
    pub top_level: bool,
    /// Position of the referenced layer in the flat list (pre-order over
    /// the recognized layers of the source array). Not serialized; it is
    /// recomputed from position when a tree is decoded.
    pub index: usize,
}

impl ResourceLeaf {
    /// Whether `layer` is the flat-list entry this leaf refers to.
    pub fn refers_to(&self, layer: &RemoteLayer) -> bool {
        self.title == layer.title() && self.layer_type == layer.layer_type() && self.url == layer.url()
    }
}

impl ResourceNode {
    pub fn title(&self) -> &str {
        match self {
            ResourceNode::Group(g) => &g.title,
            ResourceNode::Leaf(l) => &l.title,
        }
    }

    pub fn is_top_level(&self) -> bool {
        match self {
            ResourceNode::Group(g) => g.top_level,
            ResourceNode::Leaf(l) => l.top_level,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            ResourceNode::Group(g) => json!({
                "type": layer_type::DIR,
                "title": g.title,
                "layers": g.children.iter().map(ResourceNode::to_value).collect::<Vec<_>>(),
            }),
            ResourceNode::Leaf(l) => json!({
                "type": l.layer_type,
                "title": l.title,
                "url": l.url,
            }),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ResourceLeaf>) {
        match self {
            ResourceNode::Group(g) => g.children.iter().for_each(|c| c.collect_leaves(out)),
            ResourceNode::Leaf(l) => out.push(l),
        }
    }
}

/// Ordered sequence of root nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceTree {
    pub resources: Vec<ResourceNode>,
}

impl ResourceTree {
    pub fn new(resources: Vec<ResourceNode>) -> Self {
        Self { resources }
    }

    /// Build the tree from a `layers` array.
    pub fn from_layers(json: Option<&[Value]>) -> Self {
        Self::new(parse_resources(json, true))
    }

    /// Decode a serialized tree. Anything that is not a JSON array
    /// yields an empty tree.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => Self::from_layers(Some(&items)),
            _ => Self::default(),
        }
    }

    /// Serialize to a compact JSON array. Structurally identical trees
    /// produce byte-identical output.
    pub fn to_json(&self) -> String {
        Value::Array(self.resources.iter().map(ResourceNode::to_value).collect()).to_string()
    }

    /// All leaves in pre-order, which matches the flat layer order of
    /// the document the tree was parsed from.
    pub fn leaves(&self) -> Vec<&ResourceLeaf> {
        let mut out = Vec::new();
        self.resources.iter().for_each(|n| n.collect_leaves(&mut out));
        out
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Parse a `layers` array into tree nodes.
///
/// `"dir"` entries become groups whose `layers` are parsed recursively
/// with `top_level = false`; recognized layer types become leaves;
/// everything else, including non-object elements, is skipped.
pub fn parse_resources(json: Option<&[Value]>, top_level: bool) -> Vec<ResourceNode> {
    let mut next_index = 0;
    parse_nodes(json, top_level, &mut next_index)
}

/// Leaves are numbered in visiting order, so `next_index` ends up equal to
/// the length of the flat list built from the same array.
fn parse_nodes(json: Option<&[Value]>, top_level: bool, next_index: &mut usize) -> Vec<ResourceNode> {
    let Some(items) = json else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| {
            let fields = Fields::of(item);
            let kind = fields.string("type");
            match LayerKind::classify(&kind)? {
                LayerKind::Folder => Some(ResourceNode::Group(ResourceGroup {
                    title: fields.string("title"),
                    top_level,
                    children: parse_nodes(fields.array("layers"), false, next_index),
                })),
                LayerKind::Tiles | LayerKind::Vector => {
                    let index = *next_index;
                    *next_index += 1;
                    Some(ResourceNode::Leaf(ResourceLeaf {
                        title: fields.string("title"),
                        layer_type: kind,
                        url: fields.string("url"),
                        top_level,
                        index,
                    }))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn layers(v: &Value) -> Option<&[Value]> {
        v.as_array().map(Vec::as_slice)
    }

    #[test]
    fn null_input_yields_empty_sequence() {
        assert!(parse_resources(None, true).is_empty());
    }

    #[test]
    fn dir_becomes_group_with_children() {
        let v = json!([
            {"type": "dir", "title": "G", "layers": [
                {"type": "tms", "title": "Base", "url": "http://x"},
                {"type": "dir", "title": "Inner", "layers": [
                    {"type": "ngw", "title": "Points"}
                ]}
            ]},
            {"type": "ngfp", "title": "Form"}
        ]);
        let nodes = parse_resources(layers(&v), true);
        assert_eq!(nodes.len(), 2);

        let ResourceNode::Group(g) = &nodes[0] else {
            panic!("Expected group, got {:?}", nodes[0]);
        };
        assert_eq!(g.title, "G");
        assert!(g.top_level);
        assert_eq!(g.children.len(), 2);
        assert_matches!(&g.children[0], ResourceNode::Leaf(l) if l.title == "Base" && !l.top_level);
        assert_matches!(&g.children[1], ResourceNode::Group(inner) if inner.children.len() == 1 && !inner.top_level);
        assert_matches!(&nodes[1], ResourceNode::Leaf(l) if l.layer_type == "ngfp" && l.top_level);
    }

    #[test]
    fn unknown_types_and_non_objects_are_skipped() {
        let v = json!([{"type": "wms", "title": "W"}, 42, "x", {"title": "no type"}, {"type": "tms", "title": "T"}]);
        let nodes = parse_resources(layers(&v), true);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].title(), "T");
    }

    #[test]
    fn dir_without_layers_is_an_empty_group() {
        let v = json!([{"type": "dir", "title": "Empty"}]);
        let nodes = parse_resources(layers(&v), true);
        assert_matches!(&nodes[0], ResourceNode::Group(g) if g.children.is_empty());
    }

    #[test]
    fn serialization_is_deterministic_and_round_trips() {
        let v = json!([
            {"type": "dir", "title": "G", "visible": true, "layers": [
                {"type": "tms", "title": "Base", "url": "http://x", "lifetime": 3600}
            ]}
        ]);
        let a = ResourceTree::from_layers(layers(&v));
        let b = ResourceTree::from_layers(layers(&v));
        assert_eq!(a.to_json(), b.to_json());

        let decoded = ResourceTree::from_json(&a.to_json());
        assert_eq!(decoded, a);

        let reparsed: Value = serde_json::from_str(&a.to_json()).unwrap();
        assert_eq!(reparsed[0]["type"], "dir");
        assert_eq!(reparsed[0]["layers"][0]["title"], "Base");
        assert!(reparsed[0]["layers"][0].get("lifetime").is_none());
    }

    #[test]
    fn from_json_tolerates_garbage() {
        assert!(ResourceTree::from_json("not json").is_empty());
        assert!(ResourceTree::from_json("{}").is_empty());
        assert_eq!(ResourceTree::default().to_json(), "[]");
    }

    #[test]
    fn leaves_are_in_pre_order() {
        let v = json!([
            {"type": "tms", "title": "A"},
            {"type": "dir", "title": "G", "layers": [
                {"type": "ngw", "title": "B"},
                {"type": "dir", "title": "H", "layers": [{"type": "ngrc", "title": "C"}]}
            ]},
            {"type": "ngfp", "title": "D"}
        ]);
        let tree = ResourceTree::from_layers(layers(&v));
        let titles: Vec<_> = tree.leaves().into_iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn leaf_indexes_count_recognized_layers_only() {
        let v = json!([
            {"type": "wms", "title": "Skipped"},
            {"type": "dir", "title": "G", "layers": [
                {"type": "ngw", "title": "A"},
                "not an object",
                {"type": "dir", "title": "H", "layers": [{"type": "tms", "title": "B"}]}
            ]},
            {"type": "ngfp", "title": "C"}
        ]);
        let tree = ResourceTree::from_layers(layers(&v));
        let indexes: Vec<_> = tree.leaves().into_iter().map(|l| l.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);

        let decoded = ResourceTree::from_json(&tree.to_json());
        assert_eq!(decoded, tree);
    }
}
