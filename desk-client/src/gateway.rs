//! Backend collaborator implementations for the console core
//!
//! Transport errors become [`AppError`] at this boundary, carrying the
//! backend's `detail` message.

use async_trait::async_trait;
use desk_core::{OrderStore, PermissionSource, RoleDirectory};
use shared::error::{AppError, AppResult};
use shared::models::{
    MessageResponse, MyPermissions, PermissionRecord, Role, RoleCreate, RoleCreated, Sale,
    SaleSummary, SaleUpdate,
};

use crate::HttpClient;

#[async_trait]
impl PermissionSource for HttpClient {
    async fn fetch_my_permissions(&self, email: &str) -> AppResult<MyPermissions> {
        self.my_permissions(email).await.map_err(AppError::from)
    }
}

#[async_trait]
impl RoleDirectory for HttpClient {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(HttpClient::list_roles(self).await?)
    }

    async fn list_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        Ok(HttpClient::list_permissions(self).await?)
    }

    async fn role_permission_ids(&self, role_id: i64) -> AppResult<Vec<i64>> {
        Ok(HttpClient::role_permission_ids(self, role_id).await?)
    }

    async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> AppResult<MessageResponse> {
        Ok(HttpClient::replace_role_permissions(self, role_id, permission_ids).await?)
    }

    async fn create_role(&self, role: &RoleCreate) -> AppResult<RoleCreated> {
        Ok(HttpClient::create_role(self, role).await?)
    }

    async fn delete_role(&self, role_id: i64) -> AppResult<MessageResponse> {
        Ok(HttpClient::delete_role(self, role_id).await?)
    }
}

#[async_trait]
impl OrderStore for HttpClient {
    async fn list_sales(&self) -> AppResult<Vec<SaleSummary>> {
        Ok(HttpClient::list_sales(self).await?)
    }

    async fn get_sale(&self, sale_id: i64) -> AppResult<Sale> {
        Ok(HttpClient::get_sale(self, sale_id).await?.sale)
    }

    async fn update_sale(&self, sale_id: i64, update: &SaleUpdate) -> AppResult<Sale> {
        Ok(HttpClient::update_sale(self, sale_id, update).await?)
    }
}
