//! Member reconciliation between a declared record and ZeroTier Central.
//!
//! - **[`MemberReconciler`]**: drives create / read / update / delete /
//!   exists against any [`MemberApi`] implementation and writes the outcome
//!   back into the caller's [`MemberRecord`].
//!
//! - **[`address`]**: pure derivation of a member's RFC4193 and 6PLANE
//!   IPv6 addresses from its network and node identifiers.
//!
//! - **[`identity`]**: resolves the `(network, node)` pair from declared
//!   fields or from a composite `<network>-<node>` import identifier.
//!
//! - **[`convert`]**: maps the flat record onto Central's nested
//!   [`ztm_api::Member`] shape and back.

pub mod address;
pub mod api;
pub mod config;
pub mod convert;
pub mod error;
pub mod identity;
pub mod model;
pub mod reconciler;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::MemberApi;
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use identity::MemberIdentity;
pub use model::{DEFAULT_DESCRIPTION, MemberRecord};
pub use reconciler::{MemberReconciler, MemberState};

pub use ztm_api::central::client::DEFAULT_BASE_URL;
pub use ztm_api::{CentralClient, Error as ApiError, Member, MemberConfig};
