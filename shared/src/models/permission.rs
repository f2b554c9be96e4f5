//! Permission catalogue model

use serde::{Deserialize, Serialize};

/// One grantable permission as listed by the admin catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub permission_id: i64,
    /// Opaque key checked by the client, e.g. `view_sales`
    pub permission_key: String,
    /// Grouping used by the role editor (e.g. `sales`, `payments`)
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub description: Option<String>,
}
