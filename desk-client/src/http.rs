//! HTTP client for the SalesDesk REST API

use std::time::Duration;

use ::http::HeaderName;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use shared::error::ErrorBody;
use shared::models::{
    MessageResponse, MyPermissions, PermissionRecord, Role, RoleCreate, RoleCreated, Sale,
    SaleDetail, SaleSummary, SaleUpdate, SaleUpdated,
};

use crate::{ClientConfig, ClientError, ClientResult};

/// Identity header read by the backend's permission checks
pub const USER_EMAIL_HEADER: HeaderName = HeaderName::from_static("x-user-email");

/// HTTP client for making network requests to the SalesDesk backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    user_email: Option<String>,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_email: config.user_email.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the identity sent with every request
    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request with identity and auth headers; `as_user` overrides the configured identity
    fn request(&self, method: Method, path: &str, as_user: Option<&str>) -> RequestBuilder {
        tracing::debug!(%method, path, "Backend request");
        let mut request = self.client.request(method, self.url(path));

        if let Some(email) = as_user.or(self.user_email.as_deref()) {
            request = request.header(USER_EMAIL_HEADER, email);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path, None).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path, None).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, path, None).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::DELETE, path, None).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = error_message(&response.text().await?);
            tracing::debug!(%status, message = %message, "Backend error response");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(message)
                }
                _ => ClientError::Internal(message),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ========== RBAC API ==========

    /// Permission set of `email`
    pub async fn my_permissions(&self, email: &str) -> ClientResult<MyPermissions> {
        let response = self
            .request(Method::GET, "/api/rbac/my-permissions", Some(email))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.get("/api/rbac/roles").await
    }

    pub async fn list_permissions(&self) -> ClientResult<Vec<PermissionRecord>> {
        self.get("/api/rbac/permissions").await
    }

    pub async fn role_permission_ids(&self, role_id: i64) -> ClientResult<Vec<i64>> {
        self.get(&format!("/api/rbac/roles/{role_id}/permissions")).await
    }

    /// Replace a role's permission set with `permission_ids`
    pub async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> ClientResult<MessageResponse> {
        self.put(&format!("/api/rbac/roles/{role_id}/permissions"), permission_ids)
            .await
    }

    pub async fn create_role(&self, role: &RoleCreate) -> ClientResult<RoleCreated> {
        self.post("/api/rbac/roles", role).await
    }

    pub async fn delete_role(&self, role_id: i64) -> ClientResult<MessageResponse> {
        self.delete(&format!("/api/rbac/roles/{role_id}")).await
    }

    // ========== Sales API ==========

    /// Sale list rows; these carry no status columns
    pub async fn list_sales(&self) -> ClientResult<Vec<SaleSummary>> {
        self.get("/api/sales/").await
    }

    /// Sale with its line items
    pub async fn get_sale(&self, sale_id: i64) -> ClientResult<SaleDetail> {
        self.get(&format!("/api/sales/{sale_id}")).await
    }

    /// Send the whitelisted update body; returns the stored sale
    pub async fn update_sale(&self, sale_id: i64, update: &SaleUpdate) -> ClientResult<Sale> {
        let updated: SaleUpdated = self.put(&format!("/api/sales/{sale_id}"), update).await?;
        Ok(updated.sale)
    }
}

/// One entry of FastAPI's 422 `detail` list
#[derive(Deserialize)]
struct FieldError {
    msg: String,
}

/// Message from an error body
///
/// FastAPI answers `{"detail": "..."}`, or a list of field errors under
/// `detail` for 422 whose `msg`s are joined. Anything else is passed
/// through as text.
fn error_message(text: &str) -> String {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(text) {
        return body.detail;
    }
    let Ok(serde_json::Value::Object(mut body)) = serde_json::from_str::<serde_json::Value>(text)
    else {
        return text.to_string();
    };
    match body.remove("detail") {
        Some(detail @ serde_json::Value::Array(_)) => {
            match serde_json::from_value::<Vec<FieldError>>(detail.clone()) {
                Ok(errors) if !errors.is_empty() => errors
                    .into_iter()
                    .map(|e| e.msg)
                    .collect::<Vec<_>>()
                    .join("; "),
                _ => detail.to_string(),
            }
        }
        Some(detail) => detail.to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"detail":"Sale not found"}"#), "Sale not found");
        assert_eq!(
            error_message(
                r#"{"detail":[{"loc":["body","quantity"],"msg":"field required","type":"missing"},{"loc":["body","rate"],"msg":"value is not a valid float","type":"float_parsing"}]}"#
            ),
            "field required; value is not a valid float"
        );
        assert_eq!(
            error_message(r#"{"detail":[{"loc":["body","quantity"]}]}"#),
            r#"[{"loc":["body","quantity"]}]"#
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_url_join() {
        let client = HttpClient::new(&ClientConfig::new("http://api.test/")).unwrap();
        assert_eq!(client.url("/api/sales/"), "http://api.test/api/sales/");
        assert_eq!(client.url("api/rbac/roles"), "http://api.test/api/rbac/roles");
    }
}
