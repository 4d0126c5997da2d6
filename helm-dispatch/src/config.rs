//! Static cluster configuration for the dispatch layer
//!
//! The surrounding process loads and merges configuration files; the
//! dispatch layer only consumes the resulting types. Both tables are set
//! once at client construction and read-only afterwards.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 15_000;

/// Logical host identifier to client-facing port, for every cluster member.
///
/// Used only for leader-address translation: the consensus transport
/// advertises leadership in its internal address family, and this table
/// bridges it to the address clients should dial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ClusterMembers {
    members: HashMap<String, u16>,
}

impl ClusterMembers {
    pub fn new(members: HashMap<String, u16>) -> Self {
        Self { members }
    }

    /// Iterate `(host, client_port)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> + '_ {
        self.members.iter().map(|(host, port)| (host.as_str(), *port))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<(String, u16)> for ClusterMembers {
    fn from_iter<I: IntoIterator<Item = (String, u16)>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// Construction-time configuration for a `DispatchClient`.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Cluster address table for leader translation.
    pub members: ClusterMembers,
    /// Bounded wait for consensus commitment of one submission.
    #[serde(default = "default_submit_timeout_ms")]
    submit_timeout_ms: u64,
}

impl DispatchConfig {
    pub fn new(members: ClusterMembers) -> Self {
        Self {
            members,
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
        }
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}

fn default_submit_timeout_ms() -> u64 {
    DEFAULT_SUBMIT_TIMEOUT_MS
}
