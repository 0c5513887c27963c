// ── Declared member record ──
//
// The flat record a host persists between runs. Operator-set fields mirror
// Central's member shape; the trailing block is computed on every read
// and never sent to Central.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_DESCRIPTION: &str = "Managed by ztm";

/// Declared configuration plus the computed fields populated by reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRecord {
    /// External identifier; empty until the member exists on Central.
    pub id: String,
    pub network_id: String,
    pub node_id: String,
    pub name: String,
    pub description: String,
    pub hidden: bool,
    /// Seconds.
    pub offline_notify_delay: u64,
    pub authorized: bool,
    pub allow_ethernet_bridging: bool,
    pub no_auto_assign_ips: bool,
    /// Assignment-pool addresses; derived addresses are not listed here.
    pub ip_assignments: BTreeSet<String>,
    pub capabilities: BTreeSet<u32>,
    /// Tag id (decimal text) to tag value.
    pub tags: BTreeMap<String, u32>,

    // Computed
    pub ipv4_assignments: BTreeSet<String>,
    pub ipv6_assignments: BTreeSet<String>,
    pub rfc4193_address: String,
    pub zt6plane_address: String,
}

impl Default for MemberRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            network_id: String::new(),
            node_id: String::new(),
            name: String::new(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            hidden: false,
            offline_notify_delay: 0,
            authorized: true,
            allow_ethernet_bridging: false,
            no_auto_assign_ips: false,
            ip_assignments: BTreeSet::new(),
            capabilities: BTreeSet::new(),
            tags: BTreeMap::new(),
            ipv4_assignments: BTreeSet::new(),
            ipv6_assignments: BTreeSet::new(),
            rfc4193_address: String::new(),
            zt6plane_address: String::new(),
        }
    }
}

impl MemberRecord {
    /// A fresh record for a member that does not exist yet.
    pub fn new(network_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            node_id: node_id.into(),
            ..Self::default()
        }
    }

    /// A record seeded only with a composite `<network>-<node>` id.
    pub fn import(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether Central has assigned this record an external identifier.
    pub fn is_created(&self) -> bool {
        !self.id.is_empty()
    }

    /// Mark the member as absent.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// The first identifier that differs from `desired`, if any.
    ///
    /// A change in either one forces destroy-and-recreate.
    pub fn immutable_change(&self, desired: &Self) -> Option<&'static str> {
        if self.network_id != desired.network_id {
            Some("network_id")
        } else if self.node_id != desired.node_id {
            Some("node_id")
        } else {
            None
        }
    }

    /// Copy the operator-controlled fields of `desired` onto this record,
    /// keeping identity and computed fields.
    pub fn merge_mutable(&mut self, desired: &Self) {
        self.name.clone_from(&desired.name);
        self.description.clone_from(&desired.description);
        self.hidden = desired.hidden;
        self.offline_notify_delay = desired.offline_notify_delay;
        self.authorized = desired.authorized;
        self.allow_ethernet_bridging = desired.allow_ethernet_bridging;
        self.no_auto_assign_ips = desired.no_auto_assign_ips;
        self.ip_assignments.clone_from(&desired.ip_assignments);
        self.capabilities.clone_from(&desired.capabilities);
        self.tags.clone_from(&desired.tags);
    }
}
