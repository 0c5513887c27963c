// ── Domain model ──

pub mod member;

pub use member::{DEFAULT_DESCRIPTION, MemberRecord};
