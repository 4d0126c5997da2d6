//! TransportId - network identity in the consensus transport's namespace
//!
//! The consensus engine advertises itself and its leader using the
//! `host:port` form it uses for replication traffic. Clients are reached
//! on a different address; translation between the two namespaces is the
//! leader resolver's job, this type only carries the transport form.

use std::fmt;

/// A `host:port` identity in the consensus transport's address namespace.
///
/// Compared verbatim for leadership checks; the host component is the
/// input to client-address translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransportId(String);

impl TransportId {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// The host component, with IPv6 brackets stripped.
    /// `None` if the identity is not in `host:port` form.
    pub fn host(&self) -> Option<&str> {
        let (host, _port) = self.0.rsplit_once(':')?;
        Some(host.trim_start_matches('[').trim_end_matches(']'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TransportId {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}

impl From<&str> for TransportId {
    fn from(addr: &str) -> Self {
        Self(addr.to_string())
    }
}
