//! Model layer
//!
//! Kind enumeration and resource identity shared by every component.
//! Resource bodies themselves stay untyped (`serde_json::Value`) so that
//! unknown fields survive the round trip to the exported manifest.

pub mod object;
mod resource_kind;
mod resource_ref;

pub use resource_kind::ResourceKind;
pub use resource_ref::ResourceRef;
