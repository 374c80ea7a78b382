//! Project document parser.
//!
//! Turns the loosely-typed project JSON into a [`Project`]: a flat,
//! type-discriminated layer list plus a serialized [`ResourceTree`].
//! Both projections are built from the same `layers` array by two
//! independent recursive walks ([`parse_layers`] and
//! [`parse_resources`]).
//!
//! Parsing never fails. Missing or mistyped fields take their zero
//! value (see [`Fields`]), unknown layer types are dropped and
//! non-object entries are ignored. Only [`parse_document`] reports an
//! error, for text that is not JSON at all.

use serde_json::Value;

use crate::error::CoreError;
use crate::json_field::Fields;
use crate::layer::{LayerInfo, LayerKind, NgwLayer, RemoteLayer, TmsLayer};
use crate::project::Project;
use crate::resource::{parse_resources, ResourceTree};

/// Decode raw response text into a JSON value.
pub fn parse_document(text: &str) -> Result<Value, CoreError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse every element of a project list, preserving order.
///
/// Elements that are not objects produce default-valued projects rather
/// than gaps. A non-array input yields an empty list.
pub fn parse_projects(json: &Value) -> Vec<Project> {
    json.as_array()
        .map(|items| items.iter().map(parse_project).collect())
        .unwrap_or_default()
}

/// Parse a single project document.
pub fn parse_project(json: &Value) -> Project {
    let fields = Fields::of(json);
    let json_layers = fields.array("layers");

    let layers = parse_layers(json_layers);
    let tree = ResourceTree::from_layers(json_layers);

    tracing::debug!(
        layers = layers.len(),
        roots = tree.resources.len(),
        "Parsed project document"
    );

    Project {
        id: fields.int("id"),
        title: fields.string("title"),
        description: fields.string("description"),
        screen: fields.string("screen"),
        version: fields.int("version"),
        layers,
        tree: tree.to_json(),
        url: fields.string("url"),
        user: fields.string("username"),
        hash: fields.string("hash"),
    }
}

/// Flatten a `layers` array into render order.
///
/// Folders are recursed into depth-first and their layers are spliced in
/// at the folder's position; the folder itself produces no entry.
pub fn parse_layers(json: Option<&[Value]>) -> Vec<RemoteLayer> {
    let mut out = Vec::new();
    if let Some(items) = json {
        collect_layers(items, &mut out);
    }
    out
}

fn collect_layers(items: &[Value], out: &mut Vec<RemoteLayer>) {
    for item in items.iter().filter(|item| item.is_object()) {
        let fields = Fields::of(item);
        let layer_type = fields.string("type");

        match LayerKind::classify(&layer_type) {
            Some(LayerKind::Folder) => {
                if let Some(children) = fields.array("layers") {
                    collect_layers(children, out);
                }
            }
            Some(LayerKind::Tiles) => out.push(RemoteLayer::Tms(TmsLayer {
                info: layer_info(&fields, layer_type),
                lifetime: fields.long("lifetime"),
                tms_type: fields.int("tms_type"),
            })),
            Some(LayerKind::Vector) => out.push(RemoteLayer::Ngw(NgwLayer {
                info: layer_info(&fields, layer_type),
                login: fields.string("login"),
                password: fields.tristate_string("password"),
                editable: fields.boolean("editable"),
                syncable: fields.boolean("syncable"),
                style: fields
                    .object("style")
                    .and_then(|style| serde_json::to_string(style).ok())
                    .unwrap_or_default(),
            })),
            None => {}
        }
    }
}

fn layer_info(fields: &Fields<'_>, layer_type: String) -> LayerInfo {
    LayerInfo {
        title: fields.string("title"),
        layer_type,
        description: fields.string("description"),
        url: fields.string("url"),
        visible: fields.boolean("visible"),
        min_zoom: fields.float("min_zoom"),
        max_zoom: fields.float("max_zoom"),
    }
}
