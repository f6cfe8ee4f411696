//! Stateless HTTP request builder and response parser for the bar API.
//!
//! # Design
//! `BarClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status counts as success; everything else is handed back as
//! `ApiError::Server` with the status and body untouched.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{BarDraft, BarId, BarRecord};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the `/bars` resource.
#[derive(Debug, Clone)]
pub struct BarClient {
    base_url: String,
}

impl BarClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_bars(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/bars".to_string(), None)
    }

    pub fn build_get_bar(&self, id: BarId) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/bars/{id}"), None)
    }

    pub fn build_create_bar(&self, draft: &BarDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, "/bars".to_string(), Some(body)))
    }

    /// Full replacement of the record identified by `id`.
    pub fn build_update_bar(&self, id: BarId, record: &BarRecord) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(record).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, format!("/bars/{id}"), Some(body)))
    }

    pub fn build_delete_bar(&self, id: BarId) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/bars/{id}"), None)
    }

    pub fn parse_list_bars(&self, response: HttpResponse) -> Result<Vec<BarRecord>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_bar(&self, response: HttpResponse) -> Result<BarRecord, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_bar(&self, response: HttpResponse) -> Result<BarRecord, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_bar(&self, response: HttpResponse) -> Result<BarRecord, ApiError> {
        parse_json(response)
    }

    /// The acknowledgment body, if any, is ignored.
    pub fn parse_delete_bar(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::with_capacity(2);
        if body.is_some() {
            headers.push(("content-type".to_string(), JSON.to_string()));
        }
        headers.push(("accept".to_string(), JSON.to_string()));
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Pass non-2xx responses through as `ApiError::Server`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BarClient {
        BarClient::new("http://127.0.0.1:8000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    const BAR_ONE: &str = r#"{"id":1,"machine_id":"M1","lot_id":"L1","product_id":"P1","recipe_id":"R1","bar_count":5,"time_duration":12.5}"#;

    #[test]
    fn build_list_bars_produces_correct_request() {
        let req = client().build_list_bars();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://127.0.0.1:8000/bars");
        assert!(req.body.is_none());
        assert_eq!(req.headers, vec![("accept".to_string(), JSON.to_string())]);
    }

    #[test]
    fn build_create_bar_sends_json_without_id() {
        let req = client().build_create_bar(&BarDraft::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://127.0.0.1:8000/bars");
        assert_eq!(
            req.headers,
            vec![
                ("content-type".to_string(), JSON.to_string()),
                ("accept".to_string(), JSON.to_string()),
            ]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["machine_id"], "MACHINE1");
        assert_eq!(body["bar_count"], 10);
    }

    #[test]
    fn build_update_bar_sends_full_record() {
        let record: BarRecord = serde_json::from_str(BAR_ONE).unwrap();
        let req = client().build_update_bar(record.id, &record).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://127.0.0.1:8000/bars/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["recipe_id"], "R1");
        assert_eq!(body["time_duration"], 12.5);
    }

    #[test]
    fn build_delete_and_get_use_id_path() {
        let c = client();
        let del = c.build_delete_bar(BarId(42));
        assert_eq!(del.method, HttpMethod::Delete);
        assert_eq!(del.path, "http://127.0.0.1:8000/bars/42");
        assert!(del.body.is_none());
        assert_eq!(c.build_get_bar(BarId(42)).path, del.path);
    }

    #[test]
    fn parse_list_bars_success() {
        let bars = client().parse_list_bars(response(200, &format!("[{BAR_ONE}]"))).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].machine_id, "M1");
    }

    #[test]
    fn parse_create_accepts_200_and_201() {
        let c = client();
        assert_eq!(c.parse_create_bar(response(200, BAR_ONE)).unwrap().id, BarId(1));
        assert_eq!(c.parse_create_bar(response(201, BAR_ONE)).unwrap().id, BarId(1));
    }

    #[test]
    fn parse_passes_server_error_through() {
        let err = client()
            .parse_update_bar(response(404, r#"{"detail":"Bar not found"}"#))
            .unwrap_err();
        match err {
            ApiError::Server { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"detail":"Bar not found"}"#);
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn parse_delete_ignores_acknowledgment_body() {
        let c = client();
        assert!(c.parse_delete_bar(response(200, r#"{"message":"deleted"}"#)).is_ok());
        assert!(c.parse_delete_bar(response(204, "")).is_ok());
        let err = c.parse_delete_bar(response(500, "boom")).unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn parse_list_bars_bad_json() {
        let err = client().parse_list_bars(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = BarClient::new("http://127.0.0.1:8000/").build_list_bars();
        assert_eq!(req.path, "http://127.0.0.1:8000/bars");
    }
}
