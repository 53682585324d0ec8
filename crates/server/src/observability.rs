use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static RESOURCE_OPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "dashboard_resource_ops_total",
        "Resource operations by resource, op and outcome",
        &["resource", "op", "outcome"]
    )
    .expect("register resource_ops_total")
});

pub static PROXY_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "dashboard_proxy_requests_total",
        "Requests forwarded through /api/proxy by outcome",
        &["outcome"]
    )
    .expect("register proxy_requests_total")
});

fn outcome(e: &ServiceError) -> &'static str {
    match e {
        ServiceError::Validation(_) => "invalid",
        ServiceError::NotFound(_) => "not_found",
        ServiceError::Conflict(_) => "conflict",
        ServiceError::Db(_) => "error",
    }
}

/// Count a resource operation and pass its result through.
pub fn track<T>(resource: &str, op: &str, res: Result<T, ServiceError>) -> Result<T, ServiceError> {
    let label = match &res {
        Ok(_) => "ok",
        Err(e) => outcome(e),
    };
    RESOURCE_OPS_TOTAL.with_label_values(&[resource, op, label]).inc();
    res
}

pub fn record_proxy(outcome: &str) {
    PROXY_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_ops_show_up_in_exposition() {
        let _ = track::<()>("service", "create", Err(ServiceError::Conflict("dup".into())));
        record_proxy("ok");
        let (status, body) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("dashboard_resource_ops_total"));
        assert!(body.contains("outcome=\"conflict\""));
        assert!(body.contains("dashboard_proxy_requests_total"));
    }
}
