/// Remote projects are addressed by a 32-bit integer id.
pub type ProjectId = i32;

/// Layer discriminators understood by the parser.
pub mod layer_type {
    pub const TMS: &str = "tms";
    pub const NGRC: &str = "ngrc";
    pub const NGW: &str = "ngw";
    pub const NGFP: &str = "ngfp";
    /// Folder entry; never materialized as a layer.
    pub const DIR: &str = "dir";
}
