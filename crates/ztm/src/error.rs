//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ztm_config::ConfigError;
use ztm_core::{ApiError, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to ZeroTier Central")]
    #[diagnostic(
        code(ztm::connection_failed),
        help(
            "Check network access to the Central API.\n\
             Override the endpoint with --url or the profile's `url`."
        )
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("TLS error: {message}")]
    #[diagnostic(
        code(ztm::tls_error),
        help("Configure ca_cert in your profile, or use --insecure (-k) for testing only.")
    )]
    TlsError { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(ztm::timeout),
        help("Increase timeout with --timeout or check Central responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(ztm::auth_failed),
        help(
            "Verify your Central API token.\n\
             Run: ztm config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(ztm::no_credentials),
        help(
            "Store one with: ztm config set-token\n\
             Or set the ZEROTIER_CENTRAL_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(ztm::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("{message}")]
    #[diagnostic(code(ztm::conflict))]
    Conflict { message: String },

    #[error("No state at {path}")]
    #[diagnostic(
        code(ztm::no_state),
        help("Run: ztm member apply <FILE> --state {path}")
    )]
    NoState { path: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ztm::api_error))]
    Api { status: Option<u16>, message: String },

    #[error("Rate limited by Central")]
    #[diagnostic(
        code(ztm::rate_limited),
        help("Retry after {retry_after_secs}s.")
    )]
    RateLimited { retry_after_secs: u64 },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ztm::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(ztm::config),
        help("Inspect the effective configuration with: ztm config show")
    )]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(ztm::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid state file: {0}")]
    #[diagnostic(code(ztm::json), help("Delete the state file and run `ztm member import`."))]
    Json(#[from] serde_json::Error),

    #[error("Invalid member declaration: {0}")]
    #[diagnostic(code(ztm::toml))]
    Toml(#[from] toml::de::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(ztm::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. }
            | Self::NoState { .. }
            | Self::Api {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

/// Classify a Central failure. `message` is the display text, which may
/// carry lifecycle context from the core crate.
fn from_api(err: ApiError, message: String) -> CliError {
    match err {
        ApiError::Authentication { .. } => CliError::AuthFailed {
            profile: "current".into(),
        },
        ApiError::Transport(e) => {
            if e.is_timeout() {
                CliError::Timeout
            } else if e.is_connect() {
                CliError::ConnectionFailed {
                    source: ApiError::Transport(e),
                }
            } else {
                CliError::Api {
                    status: e.status().map(|s| s.as_u16()),
                    message,
                }
            }
        }
        ApiError::Tls(message) => CliError::TlsError { message },
        ApiError::RateLimited { retry_after_secs } => CliError::RateLimited { retry_after_secs },
        ApiError::Api { status: 409, .. } => CliError::Conflict { message },
        other => CliError::Api {
            status: other.status(),
            message,
        },
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::Api(e)
            | CoreError::ReadFailed { source: e }
            | CoreError::UpdateFailed { source: e } => from_api(e, message),

            CoreError::InvalidTagKey { key } => CliError::Validation {
                field: "tags".into(),
                reason: format!("'{key}' is not an unsigned integer tag id"),
            },

            CoreError::InvalidImportIdentifier { id } => CliError::Validation {
                field: "id".into(),
                reason: format!("'{id}' is not of the form <network-id>-<node-id>"),
            },

            CoreError::InvalidNetworkId { id } => CliError::Validation {
                field: "network_id".into(),
                reason: format!("'{id}' is not a 64-bit hex identifier"),
            },

            CoreError::ImmutableField { .. } => CliError::Conflict { message },

            CoreError::NotCreated => CliError::NotFound {
                resource_type: "member".into(),
                identifier: "(not created)".into(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}
