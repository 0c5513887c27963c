// ZeroTier Central API
//
// Hand-written client for the member endpoints under
// `/api/v1/network/{networkId}/member/{nodeId}`.

pub mod client;
pub mod models;

pub use client::CentralClient;
