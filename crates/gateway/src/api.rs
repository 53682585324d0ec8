use async_trait::async_trait;

use common::types::{ClientInput, ClientRecord, ServiceInput, ServiceRecord};

use crate::errors::GatewayError;

/// Remote operations the dashboard needs from the backend.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_services(&self) -> Result<Vec<ServiceRecord>, GatewayError>;
    async fn create_service(&self, input: &ServiceInput) -> Result<ServiceRecord, GatewayError>;
    async fn update_service(&self, id: i32, input: &ServiceInput) -> Result<ServiceRecord, GatewayError>;
    async fn delete_service(&self, id: i32) -> Result<(), GatewayError>;

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, GatewayError>;
    async fn create_client(&self, input: &ClientInput) -> Result<ClientRecord, GatewayError>;
    async fn update_client(&self, id: i32, input: &ClientInput) -> Result<ClientRecord, GatewayError>;
    async fn delete_client(&self, id: i32) -> Result<(), GatewayError>;
}
