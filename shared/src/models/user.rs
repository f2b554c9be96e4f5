//! Current user model

use serde::{Deserialize, Serialize};

/// Response of `GET /api/rbac/my-permissions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyPermissions {
    pub email: String,
    /// Role key of the signed-in user (`"unknown"` if the backend has none)
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}
