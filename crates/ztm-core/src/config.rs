// ── Runtime client configuration ──
//
// Describes *how* to reach Central. Carries the token and connection
// tuning but never touches disk; the CLI builds one and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use ztm_api::{CentralClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default for the public Central endpoint.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single Central endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., `https://api.zerotier.com/api/v1/`).
    pub url: Url,
    /// Central API token.
    pub token: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: Url, token: SecretString) -> Self {
        Self {
            url,
            token,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }

    /// Build an authenticated `CentralClient` from this config.
    pub fn build_client(&self) -> Result<CentralClient, CoreError> {
        Ok(CentralClient::new(
            self.url.as_str(),
            &self.token,
            &self.transport(),
        )?)
    }
}
