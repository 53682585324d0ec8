//! Client-side data gateway: talks to the dashboard HTTP API and keeps an in-memory
//! copy of the service and client lists.

pub mod errors;
pub mod api;
pub mod http;
pub mod store;

pub use api::DashboardApi;
pub use errors::GatewayError;
pub use http::HttpDashboardApi;
pub use store::DataStore;
