// ── Member reconciler ──
//
// Drives one member through {Absent, Present} against a `MemberApi`.
// Every operation issues exactly one remote call and writes the outcome
// back into the caller's record. Operations on the same (network, node)
// pair are serialized; distinct pairs proceed independently. A pair's lock
// entry lives only while an operation holds or awaits it.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use ztm_api::Member;

use crate::api::MemberApi;
use crate::convert;
use crate::error::CoreError;
use crate::identity::MemberIdentity;
use crate::model::MemberRecord;

/// Whether the member exists on the controller after a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberState {
    Absent,
    Present,
}

type LockTable = DashMap<MemberIdentity, Arc<Mutex<()>>>;

/// Reconciles declared member records against a controller.
pub struct MemberReconciler<C> {
    client: C,
    locks: LockTable,
}

/// Exclusive hold on one pair. Releasing it drops the pair's table entry
/// when nobody else is waiting.
struct PairGuard<'a> {
    locks: &'a LockTable,
    identity: MemberIdentity,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PairGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters hold their own clone of the Arc.
        self.locks
            .remove_if(&self.identity, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl<C: MemberApi> MemberReconciler<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            locks: DashMap::new(),
        }
    }

    /// The injected client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Number of pairs with an operation in flight or queued.
    pub fn tracked_pairs(&self) -> usize {
        self.locks.len()
    }

    async fn lock(&self, identity: &MemberIdentity) -> PairGuard<'_> {
        let lock = Arc::clone(
            self.locks
                .entry(identity.clone())
                .or_default()
                .value(),
        );
        let guard = lock.lock_owned().await;
        PairGuard {
            locks: &self.locks,
            identity: identity.clone(),
            guard: Some(guard),
        }
    }

    fn identity(record: &MemberRecord) -> Result<MemberIdentity, CoreError> {
        MemberIdentity::resolve(&record.network_id, &record.node_id, &record.id)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Create the member and capture the id Central assigns.
    pub async fn create(&self, record: &mut MemberRecord) -> Result<(), CoreError> {
        let identity = Self::identity(record)?;
        let mut desired = Member::try_from(&*record)?;
        desired.network_id.clone_from(&identity.network_id);
        desired.node_id.clone_from(&identity.node_id);

        let _guard = self.lock(&identity).await;
        let created = self.client.create_member(&desired).await?;

        record.id = if created.id.is_empty() {
            identity.external_id()
        } else {
            created.id
        };
        record.tags = convert::tag_map(&created.config.tags);
        info!(
            network_id = %identity.network_id,
            node_id = %identity.node_id,
            id = %record.id,
            "member created"
        );
        Ok(())
    }

    /// Refresh `record` from Central.
    ///
    /// A missing member is not an error: the id is cleared and
    /// [`MemberState::Absent`] returned so the caller can recreate it.
    pub async fn read(&self, record: &mut MemberRecord) -> Result<MemberState, CoreError> {
        let identity = Self::identity(record)?;

        let _guard = self.lock(&identity).await;
        let fetched = self
            .client
            .get_member(&identity.network_id, &identity.node_id)
            .await
            .map_err(|source| CoreError::ReadFailed { source })?;

        let Some(member) = fetched else {
            warn!(
                network_id = %identity.network_id,
                node_id = %identity.node_id,
                "member no longer exists on controller"
            );
            record.clear_id();
            return Ok(MemberState::Absent);
        };

        convert::apply_remote(record, &member, &identity)?;
        debug!(id = %record.id, "member refreshed");
        Ok(MemberState::Present)
    }

    /// Push the mutable fields of `desired` to an existing member.
    ///
    /// `current` is the last known state. Changing `network_id` or `node_id`
    /// is rejected before Central is contacted.
    pub async fn update(
        &self,
        current: &MemberRecord,
        desired: &mut MemberRecord,
    ) -> Result<(), CoreError> {
        if !current.is_created() {
            return Err(CoreError::NotCreated);
        }
        if let Some(field) = current.immutable_change(desired) {
            return Err(CoreError::ImmutableField { field });
        }

        desired.id.clone_from(&current.id);
        let identity = Self::identity(desired)?;
        let mut member = Member::try_from(&*desired)?;
        member.network_id.clone_from(&identity.network_id);
        member.node_id.clone_from(&identity.node_id);

        let _guard = self.lock(&identity).await;
        let updated = self
            .client
            .update_member(&member)
            .await
            .map_err(|source| CoreError::UpdateFailed { source })?;

        desired.tags = convert::tag_map(&updated.config.tags);
        info!(id = %desired.id, "member updated");
        Ok(())
    }

    /// Remove the member from its network.
    ///
    /// Only the identifiers are sent; the record ends up without an id.
    pub async fn delete(&self, record: &mut MemberRecord) -> Result<(), CoreError> {
        let identity = Self::identity(record)?;
        let member = Member {
            id: record.id.clone(),
            network_id: identity.network_id.clone(),
            node_id: identity.node_id.clone(),
            ..Member::default()
        };

        let _guard = self.lock(&identity).await;
        self.client.delete_member(&member).await?;

        record.clear_id();
        info!(
            network_id = %identity.network_id,
            node_id = %identity.node_id,
            "member deleted"
        );
        Ok(())
    }

    /// Side-effect-free existence probe; clears the id when absent.
    pub async fn exists(&self, record: &mut MemberRecord) -> Result<bool, CoreError> {
        let identity = Self::identity(record)?;

        let _guard = self.lock(&identity).await;
        let exists = self
            .client
            .member_exists(&identity.network_id, &identity.node_id)
            .await?;

        if !exists {
            record.clear_id();
        }
        debug!(id = %identity, exists, "member existence checked");
        Ok(exists)
    }
}
