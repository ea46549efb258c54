//! Listing of raw objects for a single resource kind.

use std::{any::TypeId, borrow::Cow, error::Error as StdError, fmt, future::Future};

use k8s_openapi::NamespaceResourceScope;
use kube_core::{ApiResource, DynamicObject, Resource};

mod client;
pub use client::{KubeFactory, KubeResourceClient};

/// Identifies the collection to list by group, version and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// The API group, or empty string for the core group.
    pub group: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub kind: Cow<'static, str>,
    /// The plural name used in request paths.
    pub plural: Cow<'static, str>,
    /// Whether objects of this kind live in a namespace.
    pub namespaced: bool,
}

/// Cluster roles from `rbac.authorization.k8s.io/v1`.
pub const CLUSTER_ROLES: ResourceId = ResourceId::new(
    "rbac.authorization.k8s.io",
    "v1",
    "ClusterRole",
    "clusterroles",
    false,
);

impl ResourceId {
    pub const fn new(
        group: &'static str,
        version: &'static str,
        kind: &'static str,
        plural: &'static str,
        namespaced: bool,
    ) -> Self {
        Self {
            group: Cow::Borrowed(group),
            version: Cow::Borrowed(version),
            kind: Cow::Borrowed(kind),
            plural: Cow::Borrowed(plural),
            namespaced,
        }
    }

    /// Derives the identifier of a statically typed kind.
    pub fn of<K>() -> Self
    where
        K: Resource<DynamicType = ()>,
        K::Scope: 'static,
    {
        Self {
            group: Cow::Owned(K::group(&()).into_owned()),
            version: Cow::Owned(K::version(&()).into_owned()),
            kind: Cow::Owned(K::kind(&()).into_owned()),
            plural: Cow::Owned(K::plural(&()).into_owned()),
            namespaced: TypeId::of::<K::Scope>() == TypeId::of::<NamespaceResourceScope>(),
        }
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn to_api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.to_string(),
            version: self.version.to_string(),
            api_version: self.api_version(),
            kind: self.kind.to_string(),
            plural: self.plural.to_string(),
        }
    }

    /// The namespace a list request for this kind is restricted to.
    ///
    /// Cluster-scoped kinds always list the whole collection.
    pub fn target_namespace<'a>(&self, scope: &'a Scope) -> Option<&'a str> {
        match scope {
            Scope::Namespace(ns) if self.namespaced => Some(ns.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.plural)
    }
}

/// The namespaces a list request covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    AllNamespaces,
    Namespace(String),
}

/// A client bound to one resource kind.
pub trait ResourceClient {
    /// Lists every object visible in `scope`.
    ///
    /// Cluster-scoped kinds ignore the namespace and return the whole collection.
    fn list(
        &self,
        scope: &Scope,
    ) -> impl Future<Output = Result<Vec<DynamicObject>, TransportError>> + Send;
}

/// Binds resource identifiers to live clients.
pub trait Factory {
    type Client: ResourceClient;

    fn resolve(&self, resource: &ResourceId) -> Self::Client;
}

/// The list request to the apiserver failed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to list {resource}: {source}")]
    Kube {
        resource: String,
        #[source]
        source: kube_client::Error,
    },
    #[error("failed to list {resource}: {source}")]
    Other {
        resource: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl TransportError {
    pub fn other(
        resource: &ResourceId,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Other {
            resource: resource.to_string(),
            source: source.into(),
        }
    }

    /// The underlying kube error, if the failure came from the apiserver client.
    pub fn as_kube(&self) -> Option<&kube_client::Error> {
        match self {
            Self::Kube { source, .. } => Some(source),
            Self::Other { .. } => None,
        }
    }
}
