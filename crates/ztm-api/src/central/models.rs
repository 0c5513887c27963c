// Central API member types
//
// Field names follow the camelCase JSON of `/api/v1/network/{nwid}/member/{node}`.
// Everything is `#[serde(default)]` because Central omits empty collections
// and older controllers skip fields they don't know about.

use serde::{Deserialize, Serialize};

/// A node's membership record within a network, as held by Central.
///
/// Read-only fields Central adds on reads (`lastOnline`, `physicalAddress`,
/// `clientVersion`, ...) land in `extra` and are not modeled explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Composite `<networkId>-<nodeId>` identifier assigned by Central.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub network_id: String,
    #[serde(default)]
    pub node_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hidden: bool,
    /// Seconds before an offline notification fires.
    #[serde(default)]
    pub offline_notify_delay: u64,
    #[serde(default)]
    pub config: MemberConfig,
    /// Catch-all for read-only fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The controller-side configuration block of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberConfig {
    #[serde(default = "default_authorized")]
    pub authorized: bool,
    /// Permits Ethernet bridging through this member.
    #[serde(default)]
    pub active_bridge: bool,
    #[serde(default)]
    pub no_auto_assign_ips: bool,
    #[serde(default)]
    pub capabilities: Vec<u32>,
    /// `[tagId, tagValue]` pairs.
    #[serde(default)]
    pub tags: Vec<(u32, u32)>,
    #[serde(default)]
    pub ip_assignments: Vec<String>,
}

fn default_authorized() -> bool {
    true
}

impl Default for MemberConfig {
    fn default() -> Self {
        Self {
            authorized: default_authorized(),
            active_bridge: false,
            no_auto_assign_ips: false,
            capabilities: Vec::new(),
            tags: Vec::new(),
            ip_assignments: Vec::new(),
        }
    }
}
