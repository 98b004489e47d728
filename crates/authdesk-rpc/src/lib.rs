// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use authdesk_app::{
    Authenticator, AuthenticatorId, DashboardOverview, DashboardSource, DetailSource, LogEntry,
    RemoteCallError, RemoteListSource, RemoteRecord, ResourceKind, RowId, StatKind, StatPoint,
};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Blocking JSON client for the admin server.
///
/// Every call returns a `RemoteCallError` on failure so callers can route it
/// to a notifier; nothing here retries.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("remote.base_url must not be empty");
        }
        let parsed = Url::parse(trimmed)
            .with_context(|| format!("remote.base_url {trimmed:?} is not a valid URL"))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            bail!("remote.base_url {trimmed:?} must be an http(s) URL");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url: parsed,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn list_authenticators(&self) -> Result<Vec<Authenticator>, RemoteCallError> {
        self.get_json(&["authenticators"])
    }

    pub fn auth_logs(&self, id: &AuthenticatorId) -> Result<Vec<LogEntry>, RemoteCallError> {
        self.get_json(&["authenticators", id.as_str(), "logs"])
    }

    pub fn overview(&self) -> Result<DashboardOverview, RemoteCallError> {
        self.get_json(&["system", "overview"])
    }

    pub fn stats(&self, kind: StatKind) -> Result<Vec<StatPoint>, RemoteCallError> {
        self.get_json(&["system", "stats", kind.as_str()])
    }

    /// Startup probe: one overview call, with remediation text on failure.
    pub fn ping(&self) -> Result<()> {
        self.overview().map(|_| ()).map_err(|error| {
            if error.is_transport() {
                anyhow!("{}", error.message)
            } else {
                anyhow!(
                    "{} answered {}: {} -- check [remote].base_url points at the REST root",
                    self.base_url(),
                    error.code,
                    error.message
                )
            }
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteCallError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteCallError::transport("base URL cannot take path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, RemoteCallError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|error| connection_error(self.base_url(), &error))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|error| RemoteCallError::transport(format!("read response body: {error}")))?;
        if !status.is_success() {
            return Err(fault_from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|error| {
            RemoteCallError::decode(format!("decode response from {}: {error}", url.path()))
        })
    }
}

impl RemoteListSource for Client {
    fn fetch(&mut self, kind: ResourceKind) -> Result<Vec<RemoteRecord>, RemoteCallError> {
        match kind {
            ResourceKind::Authenticators => Ok(self
                .list_authenticators()?
                .into_iter()
                .map(RemoteRecord::Authenticator)
                .collect()),
        }
    }
}

impl DetailSource for Client {
    type Detail = LogEntry;

    fn fetch_detail(&mut self, id: &RowId) -> Result<Vec<LogEntry>, RemoteCallError> {
        self.auth_logs(&AuthenticatorId::from(id.clone()))
    }
}

impl DashboardSource for Client {
    fn overview(&mut self) -> Result<DashboardOverview, RemoteCallError> {
        Client::overview(self)
    }

    fn stats(&mut self, kind: StatKind) -> Result<Vec<StatPoint>, RemoteCallError> {
        Client::stats(self, kind)
    }
}

#[derive(Debug, Deserialize)]
struct FaultEnvelope {
    code: Option<i64>,
    message: Option<String>,
    error: Option<String>,
}

fn connection_error(base_url: &str, error: &reqwest::Error) -> RemoteCallError {
    if error.is_timeout() {
        return RemoteCallError::transport(format!(
            "{base_url} timed out -- raise [remote].timeout or check the server load"
        ));
    }
    RemoteCallError::transport(format!(
        "cannot reach {base_url} -- is the server running? ({error})"
    ))
}

fn fault_from_response(status: StatusCode, body: &str) -> RemoteCallError {
    let code = i64::from(status.as_u16());
    if let Ok(parsed) = serde_json::from_str::<FaultEnvelope>(body)
        && let Some(message) = parsed.message.or(parsed.error)
        && !message.is_empty()
    {
        return RemoteCallError::new(parsed.code.unwrap_or(code), message);
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return RemoteCallError::new(code, trimmed);
    }

    RemoteCallError::new(
        code,
        status
            .canonical_reason()
            .map_or_else(|| format!("server returned {code}"), str::to_owned),
    )
}
