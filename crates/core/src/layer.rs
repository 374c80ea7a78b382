//! Remote map layer model.
//!
//! A project references two families of layers: tile sources (`tms`,
//! `ngrc`) and editable/syncable vector sources (`ngw`, `ngfp`). Both
//! share the fields in [`LayerInfo`]; [`RemoteLayer`] is the closed sum
//! over the two variants.
//!
//! The serde encoding is the flat layer object (common fields next to
//! the variant fields, discriminated by `"type"`). It is lossless:
//! `password: None` is written as `"password": null` and read back as
//! `None`, distinct from `Some("")`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::layer_type;

/// How a `type` discriminator is handled by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// `tms` / `ngrc`: tile source.
    Tiles,
    /// `ngw` / `ngfp`: vector source.
    Vector,
    /// `dir`: folder whose children are parsed recursively.
    Folder,
}

impl LayerKind {
    /// Classify a discriminator. Returns `None` for unrecognized types,
    /// which are skipped by both the flat and the tree projections.
    pub fn classify(layer_type: &str) -> Option<Self> {
        match layer_type {
            layer_type::TMS | layer_type::NGRC => Some(Self::Tiles),
            layer_type::NGW | layer_type::NGFP => Some(Self::Vector),
            layer_type::DIR => Some(Self::Folder),
            _ => None,
        }
    }
}

/// Fields shared by every layer variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub title: String,
    /// Discriminator as received (`tms`, `ngrc`, `ngw` or `ngfp`).
    #[serde(rename = "type")]
    pub layer_type: String,
    pub description: String,
    pub url: String,
    pub visible: bool,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

/// Tile source layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmsLayer {
    #[serde(flatten)]
    pub info: LayerInfo,
    /// Tile cache lifetime in seconds.
    pub lifetime: i64,
    /// Tiling scheme identifier.
    pub tms_type: i32,
}

/// Vector source layer backed by a NextGIS Web resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgwLayer {
    #[serde(flatten)]
    pub info: LayerInfo,
    pub login: String,
    /// `None` when the server sent `null`; always serialized, as `null`
    /// in that case.
    pub password: Option<String>,
    pub editable: bool,
    pub syncable: bool,
    /// Style document re-serialized to a string, empty when absent.
    pub style: String,
}

/// One remote layer referenced by a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RemoteLayer {
    Tms(TmsLayer),
    Ngw(NgwLayer),
}

impl RemoteLayer {
    pub fn info(&self) -> &LayerInfo {
        match self {
            RemoteLayer::Tms(l) => &l.info,
            RemoteLayer::Ngw(l) => &l.info,
        }
    }

    pub fn title(&self) -> &str {
        &self.info().title
    }

    pub fn layer_type(&self) -> &str {
        &self.info().layer_type
    }

    pub fn url(&self) -> &str {
        &self.info().url
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            RemoteLayer::Tms(_) => LayerKind::Tiles,
            RemoteLayer::Ngw(_) => LayerKind::Vector,
        }
    }
}

impl<'de> Deserialize<'de> for RemoteLayer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let layer_type = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))?;

        match LayerKind::classify(layer_type) {
            Some(LayerKind::Tiles) => serde_json::from_value(value)
                .map(RemoteLayer::Tms)
                .map_err(D::Error::custom),
            Some(LayerKind::Vector) => serde_json::from_value(value)
                .map(RemoteLayer::Ngw)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(format!(
                "unsupported layer type `{layer_type}`"
            ))),
        }
    }
}
