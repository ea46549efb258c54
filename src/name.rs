//! Qualified names used as keys for listed objects.

use std::fmt;

use kube_core::Resource;

/// Derives the fully qualified name of an object.
///
/// Namespaced objects render as `namespace/name`.
/// A missing or empty namespace yields the bare name.
pub fn fqn(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}/{name}"),
        _ => name.to_string(),
    }
}

/// Uniquely identifies an object of a known type by namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    /// The object namespace, if any
    pub namespace: Option<String>,
    /// The object name
    pub name: String,
}

impl QualifiedName {
    /// Returns `None` if the object has no name.
    pub fn from_resource<K: Resource>(resource: &K) -> Option<Self> {
        let meta = resource.meta();
        Some(Self {
            namespace: meta.namespace.clone().filter(|ns| !ns.is_empty()),
            name: meta.name.clone()?,
        })
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fqn(self.namespace.as_deref(), &self.name))
    }
}
