//! Leader resolver - transport identity to client-facing address
//!
//! The consensus transport advertises leadership in the address family it
//! uses for replication traffic; clients dial a different port, and often a
//! different namespace entirely (logical hostnames vs raw IPs). The
//! resolver bridges the two without assuming they coincide: it resolves
//! every configured member and looks for one whose addresses contain the
//! leader's host.
//!
//! Matching is inherently racy and best-effort. It runs as a pure function
//! over a snapshot of the address table, re-evaluated on every call and
//! never cached; "no match" is a normal return, not an error.

use crate::config::ClusterMembers;
use helm_model::TransportId;
use std::net::IpAddr;
use tokio::net::lookup_host;
use tracing::debug;

/// Translates the leader's transport identity into a client-facing
/// `host:port` address using the static cluster address table.
#[derive(Debug, Clone)]
pub struct LeaderResolver {
    members: ClusterMembers,
}

impl LeaderResolver {
    pub fn new(members: ClusterMembers) -> Self {
        Self { members }
    }

    /// The externally reachable address for `leader`, or `None` when no
    /// table entry resolves to the leader's host (stale configuration,
    /// partial cluster view, transient DNS failure).
    pub async fn client_address(&self, leader: &TransportId) -> Option<String> {
        let Some(leader_host) = leader.host() else {
            debug!(leader = %leader, "Leader identity is not in host:port form");
            return None;
        };
        // An IP-literal leader host is compared address-wise; anything else
        // falls back to textual comparison against resolved addresses.
        let leader_ip: Option<IpAddr> = leader_host.parse().ok();

        for (host, client_port) in self.members.iter() {
            // Port 0 here: only the resolved addresses matter.
            let resolved = match lookup_host((host, 0u16)).await {
                Ok(addrs) => addrs,
                Err(e) => {
                    // Skip this candidate, keep scanning the table.
                    debug!(host, error = %e, "Member host did not resolve");
                    continue;
                }
            };

            for addr in resolved {
                let matches = match leader_ip {
                    Some(ip) => addr.ip() == ip,
                    None => addr.ip().to_string() == leader_host,
                };
                if matches {
                    return Some(format!("{}:{}", host, client_port));
                }
            }
        }

        debug!(leader = %leader, "No cluster member resolved to the leader host");
        None
    }
}
