//! Resource identity

use super::ResourceKind;
use std::fmt;

/// Identity of a resource inside the exported namespace
///
/// Two refs are equal iff kind and name match; the namespace is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// File stem used by exporters, e.g. `services-web`
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.kind.plural(), self.name)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.plural(), self.name)
    }
}
