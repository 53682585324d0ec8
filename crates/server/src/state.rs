use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use configs::AppConfig;
use service::listing::EmptyListPolicy;

/// Shared handler state; cheap to clone.
/// The connection sits behind an `Arc` because sea-orm's `mock` build drops `Clone` from it.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub http: reqwest::Client,
    /// Base URL `/api/proxy/*` forwards to, without a trailing slash.
    pub proxy_upstream: Option<String>,
    pub list_policy: EmptyListPolicy,
}

impl AppState {
    pub fn new(db: DatabaseConnection, http: reqwest::Client) -> Self {
        Self { db: Arc::new(db), http, proxy_upstream: None, list_policy: EmptyListPolicy::default() }
    }

    pub fn from_config(db: DatabaseConnection, cfg: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.proxy.timeout_secs))
            .build()?;
        Ok(Self {
            db: Arc::new(db),
            http,
            proxy_upstream: cfg.proxy.upstream_base_url.clone(),
            list_policy: EmptyListPolicy::from_flag(cfg.api.empty_list_not_found),
        })
    }

    pub fn with_proxy_upstream(mut self, base: impl Into<String>) -> Self {
        self.proxy_upstream = Some(base.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_list_policy(mut self, policy: EmptyListPolicy) -> Self {
        self.list_policy = policy;
        self
    }
}
