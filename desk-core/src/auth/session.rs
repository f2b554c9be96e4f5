//! Session context
//!
//! The permission set of the signed-in user lives in an explicit
//! [`SessionContext`] with a defined lifecycle:
//!
//! | Event | Effect |
//! |-------|--------|
//! | login | one permission fetch, then `sign_in` |
//! | role permissions edited by an admin | `refresh_permissions` replaces the set |
//! | logout | `sign_out` clears everything |
//!
//! [`SessionHandle`] shares the context between the guard, the order desk
//! and the role editor. The lock is only held for short synchronous reads
//! and writes, never across an `.await`.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;
use shared::models::MyPermissions;

use super::permissions::{Principal, Required};
use crate::error::{DeskError, DeskResult};

/// Backend call returning the caller's permission set
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// `GET /api/rbac/my-permissions` on behalf of `email`
    async fn fetch_my_permissions(&self, email: &str) -> AppResult<MyPermissions>;
}

#[async_trait]
impl<T: PermissionSource + ?Sized> PermissionSource for Arc<T> {
    async fn fetch_my_permissions(&self, email: &str) -> AppResult<MyPermissions> {
        (**self).fetch_my_permissions(email).await
    }
}

/// Session state: signed out, or signed in with a principal
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    principal: Option<Principal>,
    signed_in_at: Option<DateTime<Utc>>,
}

impl SessionContext {
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.principal.is_some()
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }

    pub fn sign_in(&mut self, principal: Principal) {
        self.principal = Some(principal);
        self.signed_in_at = Some(Utc::now());
    }

    pub fn sign_out(&mut self) {
        self.principal = None;
        self.signed_in_at = None;
    }

    /// Replace the principal after a permission refetch
    ///
    /// Returns false (and changes nothing) when signed out or when the
    /// refetched principal belongs to another user.
    pub fn replace_principal(&mut self, principal: Principal) -> bool {
        match &mut self.principal {
            Some(current) if current.email == principal.email => {
                *current = principal;
                true
            }
            _ => false,
        }
    }

    /// Any-of permission check for the current principal
    pub fn can<'a>(&self, required: impl Into<Required<'a>>) -> bool {
        super::permissions::has_permission(self.principal.as_ref(), required)
    }
}

/// Shared handle to the session context
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SessionContext>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionContext> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionContext> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn can<'a>(&self, required: impl Into<Required<'a>>) -> bool {
        self.read().can(required)
    }

    /// Snapshot of the current principal
    pub fn principal(&self) -> Option<Principal> {
        self.read().principal().cloned()
    }

    pub fn is_signed_in(&self) -> bool {
        self.read().is_signed_in()
    }

    pub fn sign_in(&self, principal: Principal) {
        self.write().sign_in(principal);
    }

    pub fn sign_out(&self) {
        self.write().sign_out();
    }

    pub fn replace_principal(&self, principal: Principal) -> bool {
        self.write().replace_principal(principal)
    }
}

/// Drives the session lifecycle against the backend
pub struct SessionManager<P> {
    source: P,
    session: SessionHandle,
}

impl<P: PermissionSource> SessionManager<P> {
    pub fn new(source: P, session: SessionHandle) -> Self {
        Self { source, session }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Fetch the caller's permissions once and sign in
    pub async fn login(&self, email: &str) -> DeskResult<Principal> {
        let principal = Principal::from(self.source.fetch_my_permissions(email).await?);
        tracing::info!(
            email = %principal.email,
            role = %principal.role,
            permissions = principal.permissions.len(),
            "Signed in"
        );
        self.session.sign_in(principal.clone());
        Ok(principal)
    }

    /// Refetch the permission set of the signed-in user
    ///
    /// On failure the previous (possibly stale) set is kept.
    pub async fn refresh_permissions(&self) -> DeskResult<Principal> {
        let email = self
            .session
            .principal()
            .map(|p| p.email)
            .ok_or(DeskError::NotSignedIn)?;

        let principal = match self.source.fetch_my_permissions(&email).await {
            Ok(resp) => Principal::from(resp),
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Permission refresh failed, keeping cached set");
                return Err(e.into());
            }
        };

        if !self.session.replace_principal(principal.clone()) {
            // Logged out (or switched user) while the fetch was in flight
            return Err(DeskError::NotSignedIn);
        }
        tracing::info!(email = %email, permissions = principal.permissions.len(), "Permissions refreshed");
        Ok(principal)
    }

    pub fn logout(&self) {
        if let Some(principal) = self.session.principal() {
            tracing::info!(email = %principal.email, "Signed out");
        }
        self.session.sign_out();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permissions::{EDIT_SALE, VIEW_SALES};
    use shared::error::AppError;
    use std::sync::Mutex;

    /// Permission source returning a scripted sequence of responses
    struct Scripted {
        responses: Mutex<Vec<AppResult<MyPermissions>>>,
    }

    impl Scripted {
        fn new(responses: Vec<AppResult<MyPermissions>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl PermissionSource for Scripted {
        async fn fetch_my_permissions(&self, _email: &str) -> AppResult<MyPermissions> {
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn perms(email: &str, role: &str, keys: &[&str]) -> MyPermissions {
        MyPermissions {
            email: email.into(),
            role: role.into(),
            permissions: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_context_lifecycle() {
        let mut ctx = SessionContext::default();
        assert!(!ctx.can(VIEW_SALES));
        assert!(!ctx.replace_principal(Principal::new("a@x.com", "staff", [VIEW_SALES])));

        ctx.sign_in(Principal::new("a@x.com", "staff", [VIEW_SALES]));
        assert!(ctx.is_signed_in());
        assert!(ctx.signed_in_at().is_some());
        assert!(ctx.can(VIEW_SALES));

        assert!(!ctx.replace_principal(Principal::new("b@x.com", "staff", [EDIT_SALE])));
        assert!(ctx.replace_principal(Principal::new("a@x.com", "staff", [EDIT_SALE])));
        assert!(!ctx.can(VIEW_SALES));
        assert!(ctx.can(EDIT_SALE));

        ctx.sign_out();
        assert!(!ctx.can(EDIT_SALE));
        assert!(ctx.signed_in_at().is_none());
    }

    #[tokio::test]
    async fn test_login_refresh_logout() {
        let source = Scripted::new(vec![
            Ok(perms("m@x.com", "sales_manager", &[VIEW_SALES])),
            Ok(perms("m@x.com", "sales_manager", &[VIEW_SALES, EDIT_SALE])),
        ]);
        let manager = SessionManager::new(source, SessionHandle::new());

        manager.login("m@x.com").await.unwrap();
        assert!(manager.session().can(VIEW_SALES));
        assert!(!manager.session().can(EDIT_SALE));

        manager.refresh_permissions().await.unwrap();
        assert!(manager.session().can(EDIT_SALE));

        manager.logout();
        assert!(!manager.session().is_signed_in());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cached_set() {
        let source = Scripted::new(vec![
            Ok(perms("m@x.com", "staff", &[VIEW_SALES])),
            Err(AppError::network("connection reset")),
        ]);
        let manager = SessionManager::new(source, SessionHandle::new());
        manager.login("m@x.com").await.unwrap();

        let err = manager.refresh_permissions().await.unwrap_err();
        assert!(matches!(err, DeskError::Remote(_)));
        assert!(manager.session().can(VIEW_SALES));
    }

    #[tokio::test]
    async fn test_refresh_requires_sign_in() {
        let manager = SessionManager::new(Scripted::new(vec![]), SessionHandle::new());
        assert!(matches!(
            manager.refresh_permissions().await,
            Err(DeskError::NotSignedIn)
        ));
    }
}
