//! Project and layer model for the collector client.
//!
//! Parses remote project documents into a flat layer list and a
//! navigable resource tree. Everything in this crate is pure: no
//! network or file I/O.

pub mod error;
pub mod hashing;
pub mod json_field;
pub mod layer;
pub mod parser;
pub mod project;
pub mod resource;
pub mod types;

pub use layer::{LayerInfo, LayerKind, NgwLayer, RemoteLayer, TmsLayer};
pub use parser::{parse_document, parse_layers, parse_project, parse_projects};
pub use project::Project;
pub use resource::{parse_resources, ResourceGroup, ResourceLeaf, ResourceNode, ResourceTree};
