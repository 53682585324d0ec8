//! Pass-through of `/api/proxy/*path` to the configured backend.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::{observability::record_proxy, state::AppState};

fn error_body(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(json!({ "error": msg.into() }))).into_response()
}

/// Request headers minus the hop-specific ones reqwest recomputes.
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    out.remove(header::HOST);
    out.remove(header::CONTENT_LENGTH);
    out.remove(header::CONNECTION);
    out
}

pub fn target_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(q);
    }
    url
}

#[utoipa::path(
    get, path = "/api/proxy/{path}", tag = "proxy",
    params(("path" = String, Path, description = "Path forwarded to the upstream base URL")),
    responses(
        (status = 200, description = "Upstream JSON response, status preserved"),
        (status = 500, description = "Transport failure or undecodable upstream body"),
        (status = 503, description = "Proxy upstream not configured")
    )
)]
pub async fn forward(
    State(state): State<AppState>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(base) = state.proxy_upstream.as_deref() else {
        record_proxy("unconfigured");
        return error_body(StatusCode::SERVICE_UNAVAILABLE, "Proxy upstream not configured");
    };
    let url = target_url(base, &path, uri.query());
    debug!(%method, %url, "proxying request");

    let sent = state
        .http
        .request(method, &url)
        .headers(forwardable_headers(&headers))
        .body(body)
        .send()
        .await;
    let resp = match sent {
        Ok(r) => r,
        Err(e) => {
            error!(err = %e, %url, "proxy transport error");
            record_proxy("error");
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    let status = resp.status();
    let text = match resp.text().await {
        Ok(t) => t,
        Err(e) => {
            error!(err = %e, %url, "proxy body read error");
            record_proxy("error");
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    if !status.is_success() {
        warn!(%status, %url, "upstream returned error");
        record_proxy("upstream_error");
        return error_body(status, format!("Backend error: {text}"));
    }
    if text.trim().is_empty() {
        record_proxy("ok");
        return status.into_response();
    }
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(v) => {
            record_proxy("ok");
            (status, Json(v)).into_response()
        }
        Err(e) => {
            error!(err = %e, %url, "upstream body is not JSON");
            record_proxy("error");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
