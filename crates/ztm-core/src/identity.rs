// ── Member identity ──
//
// A member is addressed by its (network, node) pair. Central's composite
// identifier is `<networkId>-<nodeId>`, which is also the only thing an
// import supplies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The `(network_id, node_id)` pair that addresses a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberIdentity {
    pub network_id: String,
    pub node_id: String,
}

impl MemberIdentity {
    pub fn new(network_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            node_id: node_id.into(),
        }
    }

    /// Resolve identifiers from declared fields, falling back to the
    /// composite external id when either declared field is empty.
    pub fn resolve(
        declared_network_id: &str,
        declared_node_id: &str,
        external_id: &str,
    ) -> Result<Self, CoreError> {
        if !declared_network_id.is_empty() && !declared_node_id.is_empty() {
            return Ok(Self::new(declared_network_id, declared_node_id));
        }
        external_id.parse()
    }

    /// The composite `<network>-<node>` identifier.
    pub fn external_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MemberIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.network_id, self.node_id)
    }
}

impl FromStr for MemberIdentity {
    type Err = CoreError;

    /// Split `<network>-<node>`; exactly one separator, both halves non-empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidImportIdentifier { id: s.to_owned() };
        let (network_id, node_id) = s.split_once('-').ok_or_else(invalid)?;
        if network_id.is_empty() || node_id.is_empty() || node_id.contains('-') {
            return Err(invalid());
        }
        Ok(Self::new(network_id, node_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn declared_fields_win() {
        let id = MemberIdentity::resolve("8056c2e21c000001", "0123456789", "aaaa-bbbb").unwrap();
        assert_eq!(id, MemberIdentity::new("8056c2e21c000001", "0123456789"));
    }

    #[test]
    fn empty_declared_fields_split_external_id() {
        let id = MemberIdentity::resolve("", "", "8056c2e21c000001-0123456789").unwrap();
        assert_eq!(id.network_id, "8056c2e21c000001");
        assert_eq!(id.node_id, "0123456789");
    }

    #[test]
    fn one_missing_declared_field_uses_external_id() {
        let id = MemberIdentity::resolve("8056c2e21c000001", "", "aaaa-bbbb").unwrap();
        assert_eq!(id, MemberIdentity::new("aaaa", "bbbb"));
    }

    #[test]
    fn malformed_import_ids_are_rejected() {
        for bad in ["", "8056c2e21c000001", "-0123456789", "8056c2e21c000001-", "a-b-c"] {
            let err = MemberIdentity::resolve("", "", bad).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidImportIdentifier { ref id } if id == bad),
                "expected InvalidImportIdentifier for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        let id = MemberIdentity::new("8056c2e21c000001", "0123456789");
        assert_eq!(id.external_id(), "8056c2e21c000001-0123456789");
        assert_eq!(id.external_id().parse::<MemberIdentity>().unwrap(), id);
    }
}
