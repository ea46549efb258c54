//! kube-typed-list fetches every object of one resource kind from the apiserver
//! and converts the dynamic wire objects into typed `k8s-openapi` structs,
//! keyed by their fully qualified name (`namespace/name`, or `name` for
//! cluster-scoped kinds).
//!
//! Conversion is all-or-nothing: a single object that does not decode as the
//! expected kind fails the whole call, so callers never see a map with
//! silently missing entries.
//!
//! ```no_run
//! # async fn demo(client: kube_client::Client) -> Result<(), kube_typed_list::Error> {
//! let factory = kube_typed_list::KubeFactory::new(client);
//! let roles = kube_typed_list::list_cluster_roles(&factory, &Default::default()).await?;
//! for (fqn, role) in &roles {
//!     println!("{fqn}: {} rules", role.rules.as_ref().map_or(0, Vec::len));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Like other `k8s-openapi` dependents, this crate does not pick a Kubernetes
//! version; enable one of the `k8s-openapi` version features in the final binary.

mod aggregate;
pub use aggregate::{
    aggregate, convert, fetch, list, list_cluster_roles, list_with, ConversionError, Error,
    Mismatch,
};
pub mod config;
pub use config::{Config, DuplicatePolicy};
pub mod lister;
pub use lister::{
    Factory, KubeFactory, ResourceClient, ResourceId, Scope, TransportError, CLUSTER_ROLES,
};
pub mod name;
