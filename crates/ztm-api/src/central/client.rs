// Hand-crafted async HTTP client for the ZeroTier Central API.
//
// Base path: /api/v1/
// Auth: `Authorization: token <TOKEN>` header

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::models::Member;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Public Central endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.zerotier.com/api/v1/";

// ── Error response shape from Central ────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the ZeroTier Central member endpoints.
///
/// Uses token authentication and communicates via JSON REST endpoints
/// under `/api/v1/`.
pub struct CentralClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CentralClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API token and transport config.
    ///
    /// Injects `Authorization: token <TOKEN>` as a default header on every
    /// request. `base_url` may be the host root or already end in `/api/v1`.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized API base (always ends in `/api/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `/api/v1/` unless the path already carries it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api/v1") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v1/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn member_url(&self, network_id: &str, node_id: &str) -> Result<Url, Error> {
        Ok(self
            .base_url
            .join(&format!("network/{network_id}/member/{node_id}"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::handle_response(resp).await.map(Some)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Error::Authentication {
                message: format!("token rejected by Central (HTTP {})", status.as_u16()),
            };
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1);
            return Error::RateLimited { retry_after_secs };
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse { message: Some(m) }) => m,
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Members ──────────────────────────────────────────────────────

    /// Fetch a member. `Ok(None)` when Central has no such member.
    ///
    /// `GET /api/v1/network/{nwid}/member/{node}`
    pub async fn get_member(
        &self,
        network_id: &str,
        node_id: &str,
    ) -> Result<Option<Member>, Error> {
        let url = self.member_url(network_id, node_id)?;
        self.get_optional(url).await
    }

    /// Create (pre-authorize) a member.
    ///
    /// `POST /api/v1/network/{nwid}/member/{node}`
    pub async fn create_member(&self, member: &Member) -> Result<Member, Error> {
        let url = self.member_url(&member.network_id, &member.node_id)?;
        debug!(network_id = %member.network_id, node_id = %member.node_id, "creating member");
        self.post(url, member).await
    }

    /// Update a member's mutable fields.
    ///
    /// Central uses the same `POST` for create and update.
    pub async fn update_member(&self, member: &Member) -> Result<Member, Error> {
        let url = self.member_url(&member.network_id, &member.node_id)?;
        debug!(network_id = %member.network_id, node_id = %member.node_id, "updating member");
        self.post(url, member).await
    }

    /// Remove a member from its network.
    ///
    /// `DELETE /api/v1/network/{nwid}/member/{node}`
    pub async fn delete_member(&self, member: &Member) -> Result<(), Error> {
        let url = self.member_url(&member.network_id, &member.node_id)?;
        debug!(network_id = %member.network_id, node_id = %member.node_id, "deleting member");
        self.delete(url).await
    }

    /// Probe whether a member exists without decoding it.
    pub async fn member_exists(&self, network_id: &str, node_id: &str) -> Result<bool, Error> {
        let url = self.member_url(network_id, node_id)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }
}
