//! CLI configuration: thin wrapper around `ztm_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--url, --token, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use ztm_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ztm_config::{Config, Profile, config_path, load_config_or_default, store_token};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// A missing profile is not an error: the public Central endpoint and the
/// token chain are still tried.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let fallback = Profile::default();
    let profile = cfg.profiles.get(&profile_name).unwrap_or(&fallback);

    // 1. Token (flag / env > shared chain)
    let token = match global.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => ztm_config::resolve_token(profile, &profile_name)?,
    };

    // 2. URL, TLS, timeout from the profile
    let mut client = ztm_config::profile_to_client_config(profile, &cfg.defaults, token)?;

    // 3. Flag overrides
    if let Some(ref raw) = global.url {
        client.url = raw.parse().map_err(|_| CliError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(profile = %profile_name, url = %client.url, "resolved client config");
    Ok(client)
}
