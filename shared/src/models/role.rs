//! Role Model

use serde::{Deserialize, Serialize};

/// Role entity (RBAC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: i64,
    /// Stable key, e.g. `sales_manager`
    pub role_key: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// System roles cannot be deleted
    #[serde(default)]
    pub is_system: bool,
    /// Only present in list responses
    #[serde(default)]
    pub permission_count: u32,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreate {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// Create role response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreated {
    pub message: String,
    pub role: Option<Role>,
}

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
