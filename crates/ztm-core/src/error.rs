// ── Core error types ──
//
// Errors surfaced by the reconciler. Remote rejections keep the underlying
// `ztm_api::Error` as their source; Read and Update add lifecycle context,
// Create / Delete / Exists pass it through unchanged.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote rejections ────────────────────────────────────────────
    #[error(transparent)]
    Api(#[from] ztm_api::Error),

    #[error("unable to read member from API: {source}")]
    ReadFailed {
        #[source]
        source: ztm_api::Error,
    },

    #[error("unable to update member using ZeroTier API: {source}")]
    UpdateFailed {
        #[source]
        source: ztm_api::Error,
    },

    // ── Malformed input ──────────────────────────────────────────────
    #[error("invalid tag key '{key}': tag ids must be unsigned integers")]
    InvalidTagKey { key: String },

    #[error("invalid import identifier '{id}': expected <network-id>-<node-id>")]
    InvalidImportIdentifier { id: String },

    #[error("invalid network id '{id}': expected a 64-bit hex identifier")]
    InvalidNetworkId { id: String },

    // ── Lifecycle violations ─────────────────────────────────────────
    #[error("{field} cannot change on an existing member; it must be replaced")]
    ImmutableField { field: &'static str },

    #[error("member has not been created yet")]
    NotCreated,
}

impl CoreError {
    /// The underlying Central error, if this is a remote rejection.
    pub fn api_error(&self) -> Option<&ztm_api::Error> {
        match self {
            Self::Api(e) | Self::ReadFailed { source: e } | Self::UpdateFailed { source: e } => {
                Some(e)
            }
            _ => None,
        }
    }
}
