// ztm-api: Async Rust client for the ZeroTier Central member API

pub mod central;
pub mod error;
pub mod transport;

pub use central::CentralClient;
pub use central::models::{Member, MemberConfig};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
