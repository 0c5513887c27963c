// ── Record <-> Central conversions ──
//
// `MemberRecord` is flat; Central nests the controller settings under
// `config` and encodes tags as `[id, value]` pairs. Reads also refresh the
// computed fields: the address-family split of the assignment pool and
// both derived IPv6 addresses.

use std::collections::BTreeMap;

use ztm_api::{Member, MemberConfig};

use crate::address;
use crate::error::CoreError;
use crate::identity::MemberIdentity;
use crate::model::MemberRecord;

// ── Tags ───────────────────────────────────────────────────────────

/// Parse the declared tag mapping into Central's `[id, value]` pairs.
///
/// Every key must be a decimal tag id.
pub fn tag_pairs(tags: &BTreeMap<String, u32>) -> Result<Vec<(u32, u32)>, CoreError> {
    tags.iter()
        .map(|(key, value)| {
            key.trim()
                .parse::<u32>()
                .map(|id| (id, *value))
                .map_err(|_| CoreError::InvalidTagKey { key: key.clone() })
        })
        .collect()
}

/// Key Central's tag pairs by the decimal text of each tag id.
///
/// Duplicate ids collapse to the last value Central reported.
pub fn tag_map(pairs: &[(u32, u32)]) -> BTreeMap<String, u32> {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), *value))
        .collect()
}

// ── Record → Central ───────────────────────────────────────────────

impl TryFrom<&MemberRecord> for Member {
    type Error = CoreError;

    fn try_from(record: &MemberRecord) -> Result<Self, Self::Error> {
        Ok(Member {
            id: record.id.clone(),
            network_id: record.network_id.clone(),
            node_id: record.node_id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            hidden: record.hidden,
            offline_notify_delay: record.offline_notify_delay,
            config: MemberConfig {
                authorized: record.authorized,
                active_bridge: record.allow_ethernet_bridging,
                no_auto_assign_ips: record.no_auto_assign_ips,
                capabilities: record.capabilities.iter().copied().collect(),
                tags: tag_pairs(&record.tags)?,
                ip_assignments: record.ip_assignments.iter().cloned().collect(),
            },
            extra: serde_json::Map::new(),
        })
    }
}

// ── Central → Record ───────────────────────────────────────────────

/// Overwrite `record` with what Central reported for `identity`.
///
/// Identifiers come from `identity` rather than the payload so an
/// imported record keeps the pair it was resolved with.
pub fn apply_remote(
    record: &mut MemberRecord,
    member: &Member,
    identity: &MemberIdentity,
) -> Result<(), CoreError> {
    let (ipv4, ipv6) = address::partition_assignments(&member.config.ip_assignments);

    record.rfc4193_address = address::rfc4193_address(&identity.network_id, &identity.node_id)?;
    record.zt6plane_address = address::six_plane_address(&identity.network_id, &identity.node_id);

    record.id = if member.id.is_empty() {
        identity.external_id()
    } else {
        member.id.clone()
    };
    record.network_id.clone_from(&identity.network_id);
    record.node_id.clone_from(&identity.node_id);
    record.name.clone_from(&member.name);
    record.description.clone_from(&member.description);
    record.hidden = member.hidden;
    record.offline_notify_delay = member.offline_notify_delay;
    record.authorized = member.config.authorized;
    record.allow_ethernet_bridging = member.config.active_bridge;
    record.no_auto_assign_ips = member.config.no_auto_assign_ips;
    record.ip_assignments = member.config.ip_assignments.iter().cloned().collect();
    record.ipv4_assignments = ipv4;
    record.ipv6_assignments = ipv6;
    record.capabilities = member.config.capabilities.iter().copied().collect();
    record.tags = tag_map(&member.config.tags);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    const NWID: &str = "8056c2e21c000001";
    const NODE: &str = "0123456789";

    fn set<T: Ord + Clone>(items: &[T]) -> BTreeSet<T> {
        items.iter().cloned().collect()
    }

    fn remote() -> Member {
        Member {
            id: format!("{NWID}-{NODE}"),
            network_id: NWID.into(),
            node_id: NODE.into(),
            name: "laptop".into(),
            description: "dev box".into(),
            hidden: true,
            offline_notify_delay: 120,
            config: MemberConfig {
                authorized: false,
                active_bridge: true,
                no_auto_assign_ips: true,
                capabilities: vec![1, 5],
                tags: vec![(1000, 1), (1001, 7)],
                ip_assignments: vec!["10.147.17.5".into(), "fd00::5".into()],
            },
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn record_maps_to_nested_config() {
        let mut record = MemberRecord::new(NWID, NODE);
        record.allow_ethernet_bridging = true;
        record.capabilities = BTreeSet::from([3, 1]);
        record.tags = BTreeMap::from([("1000".into(), 2), ("1001".into(), 9)]);
        record.ip_assignments = BTreeSet::from(["10.0.0.1".into()]);

        let member = Member::try_from(&record).unwrap();
        assert_eq!(member.id, "");
        assert_eq!(member.network_id, NWID);
        assert!(member.config.active_bridge);
        assert!(member.config.authorized);

        assert_eq!(set(&member.config.capabilities), BTreeSet::from([1, 3]));
        assert_eq!(
            set(&member.config.tags),
            BTreeSet::from([(1000, 2), (1001, 9)])
        );
        assert_eq!(member.config.ip_assignments, vec!["10.0.0.1".to_owned()]);
    }

    #[test]
    fn non_numeric_tag_key_is_an_error() {
        let mut record = MemberRecord::new(NWID, NODE);
        record.tags = BTreeMap::from([("1000".into(), 2), ("env".into(), 1)]);

        let err = Member::try_from(&record).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTagKey { ref key } if key == "env"));
    }

    #[test]
    fn negative_tag_key_is_an_error() {
        let tags: BTreeMap<String, u32> = BTreeMap::from([("-4".into(), 1)]);
        assert!(matches!(
            tag_pairs(&tags),
            Err(CoreError::InvalidTagKey { .. })
        ));
    }

    #[test]
    fn apply_remote_fills_computed_fields() {
        let mut record = MemberRecord::import(format!("{NWID}-{NODE}"));
        let identity = MemberIdentity::new(NWID, NODE);
        apply_remote(&mut record, &remote(), &identity).unwrap();

        assert_eq!(record.network_id, NWID);
        assert_eq!(record.node_id, NODE);
        assert_eq!(record.name, "laptop");
        assert_eq!(record.offline_notify_delay, 120);
        assert!(!record.authorized);
        assert!(record.allow_ethernet_bridging);
        assert_eq!(record.ipv4_assignments, BTreeSet::from(["10.147.17.5".into()]));
        assert_eq!(record.ipv6_assignments, BTreeSet::from(["fd00::5".into()]));
        assert_eq!(
            record.rfc4193_address,
            "fc9c:56c2:e301:2345:6789:0000:0000:0001"
        );
        assert_eq!(
            record.zt6plane_address,
            "fd80:56c2:e21c:0000:0199:9301:2345:6789"
        );
        assert_eq!(record.tags.get("1001"), Some(&7));
    }

    #[test]
    fn remote_round_trip_preserves_mutable_fields() {
        let original = remote();
        let mut record = MemberRecord::default();
        apply_remote(&mut record, &original, &MemberIdentity::new(NWID, NODE)).unwrap();
        let back = Member::try_from(&record).unwrap();

        assert_eq!(back.id, original.id);
        assert_eq!(back.name, original.name);
        assert_eq!(back.description, original.description);
        assert_eq!(back.hidden, original.hidden);
        assert_eq!(back.offline_notify_delay, original.offline_notify_delay);
        assert_eq!(back.config.authorized, original.config.authorized);
        assert_eq!(back.config.active_bridge, original.config.active_bridge);
        assert_eq!(back.config.no_auto_assign_ips, original.config.no_auto_assign_ips);

        assert_eq!(
            set(&back.config.ip_assignments),
            set(&original.config.ip_assignments)
        );
        assert_eq!(
            set(&back.config.capabilities),
            set(&original.config.capabilities)
        );
        assert_eq!(set(&back.config.tags), set(&original.config.tags));
    }

    #[test]
    fn empty_remote_id_falls_back_to_composite() {
        let mut member = remote();
        member.id.clear();
        let mut record = MemberRecord::default();
        apply_remote(&mut record, &member, &MemberIdentity::new(NWID, NODE)).unwrap();
        assert_eq!(record.id, format!("{NWID}-{NODE}"));
    }
}
