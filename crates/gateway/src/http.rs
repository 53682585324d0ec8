//! reqwest-backed [`DashboardApi`].

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use common::types::{ClientInput, ClientRecord, ServiceInput, ServiceRecord};

use crate::api::DashboardApi;
use crate::errors::GatewayError;

#[derive(Clone, Debug)]
pub struct HttpDashboardApi {
    base_url: String,
    client: Client,
}

impl HttpDashboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send<B: Serialize + ?Sized + Sync>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response, GatewayError> {
        let url = self.url(path);
        debug!(%method, %url, "dashboard api request");
        let mut req = self.client.request(method, &url);
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req.send().await?;
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        Err(GatewayError::Status { status, message: error_message(&text) })
    }

    async fn fetch<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, GatewayError> {
        let resp = self.send(method, path, body).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// A 404 on a list endpoint means "no rows" for servers that report empty tables that way.
    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GatewayError> {
        match self.fetch::<Vec<T>, ()>(Method::GET, path, None).await {
            Err(e) if e.is_not_found() => {
                warn!(path, "list endpoint answered 404; treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

/// Pull `message` (or `error`) out of a JSON error body, else use the raw text.
fn error_message(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(v) => v
            .get("message")
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| text.to_string()),
        Err(_) => text.to_string(),
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn list_services(&self) -> Result<Vec<ServiceRecord>, GatewayError> {
        self.list("services").await
    }

    async fn create_service(&self, input: &ServiceInput) -> Result<ServiceRecord, GatewayError> {
        self.fetch(Method::POST, "services", Some(input)).await
    }

    async fn update_service(&self, id: i32, input: &ServiceInput) -> Result<ServiceRecord, GatewayError> {
        self.fetch(Method::PUT, &format!("services/{id}"), Some(input)).await
    }

    async fn delete_service(&self, id: i32) -> Result<(), GatewayError> {
        self.send::<()>(Method::DELETE, &format!("services/{id}"), None).await?;
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, GatewayError> {
        self.list("clients").await
    }

    async fn create_client(&self, input: &ClientInput) -> Result<ClientRecord, GatewayError> {
        let payload = input.clone().cleaned();
        self.fetch(Method::POST, "clients", Some(&payload)).await
    }

    async fn update_client(&self, id: i32, input: &ClientInput) -> Result<ClientRecord, GatewayError> {
        let payload = input.clone().cleaned();
        self.fetch(Method::PUT, &format!("clients/{id}"), Some(&payload)).await
    }

    async fn delete_client(&self, id: i32) -> Result<(), GatewayError> {
        self.send::<()>(Method::DELETE, &format!("clients/{id}"), None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(error_message(r#"{"error":"Conflict","message":"email taken"}"#), "email taken");
        assert_eq!(error_message(r#"{"error":"Not Found"}"#), "Not Found");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn base_url_is_trimmed() {
        let api = HttpDashboardApi::new("http://localhost:4000/");
        assert_eq!(api.url("services/3"), "http://localhost:4000/services/3");
    }
}
