//! In-memory mirror of the backend's service and client lists.
//!
//! Every mutation goes to the server first; local state only changes once the server
//! has answered successfully, so a failed call leaves the cached lists untouched.

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{info, warn};

use common::overview::Overview;
use common::types::{ClientInput, ClientRecord, ServiceInput, ServiceRecord};

use crate::api::DashboardApi;
use crate::errors::GatewayError;

pub struct DataStore<A: DashboardApi> {
    api: A,
    services: RwLock<Vec<ServiceRecord>>,
    clients: RwLock<Vec<ClientRecord>>,
}

impl<A: DashboardApi> DataStore<A> {
    pub fn new(api: A) -> Self {
        Self { api, services: RwLock::new(Vec::new()), clients: RwLock::new(Vec::new()) }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn services(&self) -> Vec<ServiceRecord> {
        self.services.read().await.clone()
    }

    pub async fn clients(&self) -> Vec<ClientRecord> {
        self.clients.read().await.clone()
    }

    /// Reload both lists. Each list is only replaced when its own fetch succeeds; the
    /// first error is returned after both fetches were attempted.
    pub async fn refresh(&self) -> Result<(), GatewayError> {
        let services = self.refresh_services().await;
        let clients = self.refresh_clients().await;
        services.and(clients)
    }

    pub async fn refresh_services(&self) -> Result<(), GatewayError> {
        match self.api.list_services().await {
            Ok(list) => {
                info!(count = list.len(), "services loaded");
                *self.services.write().await = list;
                Ok(())
            }
            Err(e) => {
                warn!(err = %e, "failed to load services");
                Err(e)
            }
        }
    }

    pub async fn refresh_clients(&self) -> Result<(), GatewayError> {
        match self.api.list_clients().await {
            Ok(list) => {
                info!(count = list.len(), "clients loaded");
                *self.clients.write().await = list;
                Ok(())
            }
            Err(e) => {
                warn!(err = %e, "failed to load clients");
                Err(e)
            }
        }
    }

    pub async fn add_service(&self, input: &ServiceInput) -> Result<ServiceRecord, GatewayError> {
        let created = self.api.create_service(input).await?;
        self.services.write().await.push(created.clone());
        Ok(created)
    }

    pub async fn update_service(&self, id: i32, input: &ServiceInput) -> Result<ServiceRecord, GatewayError> {
        let updated = self.api.update_service(id, input).await?;
        let mut list = self.services.write().await;
        replace_by_id(list.as_mut_slice(), id, |s| s.id, updated.clone());
        Ok(updated)
    }

    pub async fn delete_service(&self, id: i32) -> Result<(), GatewayError> {
        self.api.delete_service(id).await?;
        self.services.write().await.retain(|s| s.id != id);
        Ok(())
    }

    pub async fn add_client(&self, input: &ClientInput) -> Result<ClientRecord, GatewayError> {
        let created = self.api.create_client(input).await?;
        self.clients.write().await.push(created.clone());
        Ok(created)
    }

    pub async fn update_client(&self, id: i32, input: &ClientInput) -> Result<ClientRecord, GatewayError> {
        let updated = self.api.update_client(id, input).await?;
        let mut list = self.clients.write().await;
        replace_by_id(list.as_mut_slice(), id, |c| c.id, updated.clone());
        Ok(updated)
    }

    pub async fn delete_client(&self, id: i32) -> Result<(), GatewayError> {
        self.api.delete_client(id).await?;
        self.clients.write().await.retain(|c| c.id != id);
        Ok(())
    }

    /// Dashboard summary over the cached lists.
    pub async fn overview(&self, today: NaiveDate) -> Overview {
        let services = self.services.read().await;
        let clients = self.clients.read().await;
        Overview::compute(&services, &clients, today)
    }
}

fn replace_by_id<T>(items: &mut [T], id: i32, key: impl Fn(&T) -> i32, new: T) {
    if let Some(slot) = items.iter_mut().find(|item| key(item) == id) {
        *slot = new;
    }
}
