use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::lister::Scope;

/// What to do when two listed objects share a qualified name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later object replaces the earlier one.
    #[default]
    Overwrite,
    /// Fail the call with [`Error::Duplicate`](crate::Error::Duplicate).
    Reject,
}

/// Parameters for [`list`](crate::list) and friends.
///
/// The default lists all namespaces, keeps the last duplicate
/// and waits on the apiserver without a deadline.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub scope: Scope,
    pub duplicates: DuplicatePolicy,
    /// Deadline for the list request.
    pub timeout: Option<Duration>,
    /// Aborts the list request when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl Config {
    /// Restricts the request to `scope`.
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
