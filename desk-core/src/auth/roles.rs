//! Role administration
//!
//! Client side of the role editor. The backend owns roles and re-checks
//! every rule below; they are repeated here so the editor can reject bad
//! input without a round trip.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MessageResponse, PermissionRecord, Role, RoleCreate, RoleCreated};

use super::permissions::ADMIN_PERMISSIONS;
use super::session::{PermissionSource, SessionManager};
use crate::error::{DeskError, DeskResult};
use crate::notice::{Notice, NoticeBus};

/// Role key of the built-in administrator role
pub const ADMIN_ROLE_KEY: &str = "admin";

/// Backend role/permission admin endpoints
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    async fn list_permissions(&self) -> AppResult<Vec<PermissionRecord>>;

    async fn role_permission_ids(&self, role_id: i64) -> AppResult<Vec<i64>>;

    /// Replace the role's whole permission set
    async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> AppResult<MessageResponse>;

    async fn create_role(&self, role: &RoleCreate) -> AppResult<RoleCreated>;

    async fn delete_role(&self, role_id: i64) -> AppResult<MessageResponse>;
}

#[async_trait]
impl<T: RoleDirectory + ?Sized> RoleDirectory for Arc<T> {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        (**self).list_roles().await
    }

    async fn list_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        (**self).list_permissions().await
    }

    async fn role_permission_ids(&self, role_id: i64) -> AppResult<Vec<i64>> {
        (**self).role_permission_ids(role_id).await
    }

    async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> AppResult<MessageResponse> {
        (**self).replace_role_permissions(role_id, permission_ids).await
    }

    async fn create_role(&self, role: &RoleCreate) -> AppResult<RoleCreated> {
        (**self).create_role(role).await
    }

    async fn delete_role(&self, role_id: i64) -> AppResult<MessageResponse> {
        (**self).delete_role(role_id).await
    }
}

/// Role key derived from a display name (`Sales Manager` -> `sales_manager`)
pub fn role_key_for(display_name: &str) -> String {
    display_name.trim().to_lowercase().replace(' ', "_")
}

/// Admin role editor
///
/// Every call requires any of `manage_roles` / `manage_users`. Edits that
/// change what the signed-in user may do refresh the session afterwards.
pub struct RoleEditor<D, P> {
    directory: D,
    sessions: Arc<SessionManager<P>>,
    notices: NoticeBus,
}

impl<D: RoleDirectory, P: PermissionSource> RoleEditor<D, P> {
    pub fn new(directory: D, sessions: Arc<SessionManager<P>>, notices: NoticeBus) -> Self {
        Self {
            directory,
            sessions,
            notices,
        }
    }

    fn authorize(&self) -> DeskResult<()> {
        let session = self.sessions.session();
        if !session.is_signed_in() {
            return Err(DeskError::NotSignedIn);
        }
        if session.can(ADMIN_PERMISSIONS) {
            return Ok(());
        }
        tracing::warn!("Role editor access denied");
        self.notices.publish(Notice::denied("manage roles"));
        Err(DeskError::PermissionDenied(
            ErrorCode::AdminRequired.message().to_string(),
        ))
    }

    pub async fn list_roles(&self) -> DeskResult<Vec<Role>> {
        self.authorize()?;
        Ok(self.directory.list_roles().await?)
    }

    pub async fn list_permissions(&self) -> DeskResult<Vec<PermissionRecord>> {
        self.authorize()?;
        Ok(self.directory.list_permissions().await?)
    }

    /// Permission catalogue grouped by module, modules in name order
    pub async fn permissions_by_module(&self) -> DeskResult<BTreeMap<String, Vec<PermissionRecord>>> {
        let mut grouped: BTreeMap<String, Vec<PermissionRecord>> = BTreeMap::new();
        for record in self.list_permissions().await? {
            grouped.entry(record.module.clone()).or_default().push(record);
        }
        Ok(grouped)
    }

    pub async fn role_permission_ids(&self, role_id: i64) -> DeskResult<BTreeSet<i64>> {
        self.authorize()?;
        let ids = self.directory.role_permission_ids(role_id).await?;
        Ok(ids.into_iter().collect())
    }

    /// Replace `role`'s permission set and refresh the signed-in user's
    pub async fn replace_role_permissions(
        &self,
        role: &Role,
        permission_ids: &BTreeSet<i64>,
    ) -> DeskResult<()> {
        self.authorize()?;
        if role.role_key == ADMIN_ROLE_KEY && permission_ids.is_empty() {
            return Err(DeskError::Validation(
                ErrorCode::RoleEmptyPermissions.message().to_string(),
            ));
        }

        let ids: Vec<i64> = permission_ids.iter().copied().collect();
        let resp = self
            .directory
            .replace_role_permissions(role.role_id, &ids)
            .await
            .inspect_err(|e| {
                tracing::error!(role = %role.role_key, error = %e, "Failed to update role permissions");
                self.notices.publish(Notice::error(e.message.clone()));
            })?;

        tracing::info!(role = %role.role_key, count = ids.len(), "Role permissions replaced");
        self.notices.publish(Notice::success(resp.message));
        self.refresh_session().await;
        Ok(())
    }

    /// Create a custom role from its display name
    ///
    /// The backend derives the role key from the name; a name whose key is
    /// already taken is rejected before the create call.
    pub async fn create_role(&self, display_name: &str, description: &str) -> DeskResult<Role> {
        self.authorize()?;
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(DeskError::Validation("display_name is required.".to_string()));
        }

        let role_key = role_key_for(display_name);
        let existing = self.directory.list_roles().await?;
        if existing.iter().any(|r| r.role_key == role_key) {
            return Err(DeskError::Validation(format!(
                "Role '{role_key}' already exists."
            )));
        }

        let payload = RoleCreate {
            display_name: display_name.to_string(),
            description: description.to_string(),
        };
        let created = self.directory.create_role(&payload).await?;
        let role = created
            .role
            .ok_or_else(|| AppError::internal("Role created but not returned"))?;

        tracing::info!(role = %role.role_key, "Role created");
        self.notices.publish(Notice::success(created.message));
        Ok(role)
    }

    /// Delete a non-system role
    pub async fn delete_role(&self, role: &Role) -> DeskResult<()> {
        self.authorize()?;
        if role.is_system {
            return Err(DeskError::Validation(
                ErrorCode::RoleIsSystem.message().to_string(),
            ));
        }

        let resp = self.directory.delete_role(role.role_id).await?;
        tracing::info!(role = %role.role_key, "Role deleted");
        self.notices.publish(Notice::success(resp.message));
        self.refresh_session().await;
        Ok(())
    }

    /// The edit already succeeded; a failed refresh only leaves the set stale
    async fn refresh_session(&self) {
        if let Err(e) = self.sessions.refresh_permissions().await {
            tracing::warn!(error = %e, "Session permissions not refreshed after role change");
        }
    }
}
