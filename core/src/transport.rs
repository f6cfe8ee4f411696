//! Executing requests, and the access layer built on top of it.
//!
//! # Design
//! `Transport` is the single seam where I/O happens. `UreqTransport` never
//! treats an HTTP status as an error, so every response that arrives goes
//! back to `BarClient::parse_*` for interpretation. Only a failure before the
//! status line arrives, or a broken 2xx body, becomes `ApiError::Connectivity`.
//!
//! `BarApi` pairs a `BarClient` with a transport and exposes the four
//! contract operations. It holds no domain state.

use tracing::{debug, warn};

use crate::client::BarClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{BarDraft, BarId, BarRecord};

/// Executes one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent with a global timeout.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = &self.agent;
        let url = req.path.as_str();
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(agent.get(url), &req.headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(url), &req.headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(agent.post(url), &req.headers).send(body),
            (HttpMethod::Post, None) => with_headers(agent.post(url), &req.headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(agent.put(url), &req.headers).send(body),
            (HttpMethod::Put, None) => with_headers(agent.put(url), &req.headers).send_empty(),
        };

        let mut response = result.map_err(|e| {
            warn!(method = req.method.as_str(), url, error = %e, "no response from server");
            ApiError::connectivity(e)
        })?;

        let status = response.status().as_u16();
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            // A failure status already arrived; report it without the body.
            Err(e) if !(200..300).contains(&status) => {
                warn!(method = req.method.as_str(), url, status, error = %e, "error body unreadable");
                String::new()
            }
            Err(e) => {
                warn!(method = req.method.as_str(), url, error = %e, "response body interrupted");
                return Err(ApiError::connectivity(e));
            }
        };

        debug!(method = req.method.as_str(), url, status, "request completed");
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// The access layer: one configured entry point for every remote call.
#[derive(Debug, Clone)]
pub struct BarApi<T> {
    client: BarClient,
    transport: T,
}

impl BarApi<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(BarClient::new(&config.base_url), UreqTransport::new(config))
    }
}

impl Default for BarApi<UreqTransport> {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl<T: Transport> BarApi<T> {
    pub fn new(client: BarClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The full collection, as received.
    pub fn list(&self) -> Result<Vec<BarRecord>, ApiError> {
        let response = self.transport.execute(self.client.build_list_bars())?;
        self.client.parse_list_bars(response)
    }

    pub fn get(&self, id: BarId) -> Result<BarRecord, ApiError> {
        let response = self.transport.execute(self.client.build_get_bar(id))?;
        self.client.parse_get_bar(response)
    }

    /// Returns the stored record including its server-assigned `id`.
    pub fn create(&self, draft: &BarDraft) -> Result<BarRecord, ApiError> {
        let response = self.transport.execute(self.client.build_create_bar(draft)?)?;
        self.client.parse_create_bar(response)
    }

    pub fn update(&self, id: BarId, record: &BarRecord) -> Result<BarRecord, ApiError> {
        let response = self.transport.execute(self.client.build_update_bar(id, record)?)?;
        self.client.parse_update_bar(response)
    }

    pub fn remove(&self, id: BarId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_bar(id))?;
        self.client.parse_delete_bar(response)
    }
}
