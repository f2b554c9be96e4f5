//! Permission Definitions
//!
//! Permission keys are opaque strings owned by the backend. The constants
//! below name the keys the console gates on; any other key fetched from the
//! backend is still honoured by the resolver.
//!
//! Resolution rules:
//! - any-of: one matching key out of the required list is enough
//! - the `developer` and `admin` roles pass every check, whatever their set
//! - no principal, or an empty set, passes nothing

use std::collections::BTreeSet;

use shared::models::MyPermissions;

// === Module permissions ===
pub const VIEW_DASHBOARD: &str = "view_dashboard";
pub const VIEW_CUSTOMERS: &str = "view_customers";
pub const CREATE_CUSTOMER: &str = "create_customer";
pub const EDIT_CUSTOMER: &str = "edit_customer";
pub const VIEW_SALES: &str = "view_sales";
pub const CREATE_SALE: &str = "create_sale";
pub const EDIT_SALE: &str = "edit_sale";
pub const DELETE_SALE: &str = "delete_sale";
pub const VIEW_PAYMENTS: &str = "view_payments";
pub const CREATE_PAYMENT: &str = "create_payment";
pub const VIEW_DEMOS: &str = "view_demos";
pub const VIEW_DISTRIBUTORS: &str = "view_distributors";
pub const CREATE_DISTRIBUTOR: &str = "create_distributor";
pub const VIEW_REPORTS: &str = "view_reports";
pub const IMPORT_DATA: &str = "import_data";

// === Administration ===
pub const MANAGE_ROLES: &str = "manage_roles";
pub const MANAGE_USERS: &str = "manage_users";

/// Keys the console knows about
pub const ALL_PERMISSIONS: &[&str] = &[
    VIEW_DASHBOARD,
    VIEW_CUSTOMERS,
    CREATE_CUSTOMER,
    EDIT_CUSTOMER,
    VIEW_SALES,
    CREATE_SALE,
    EDIT_SALE,
    DELETE_SALE,
    VIEW_PAYMENTS,
    CREATE_PAYMENT,
    VIEW_DEMOS,
    VIEW_DISTRIBUTORS,
    CREATE_DISTRIBUTOR,
    VIEW_REPORTS,
    IMPORT_DATA,
    MANAGE_ROLES,
    MANAGE_USERS,
];

/// Roles that bypass the permission set entirely
pub const OVERRIDE_ROLES: &[&str] = &["developer", "admin"];

/// Gate for order status changes
pub const ORDER_STATUS_PERMISSIONS: &[&str] = &[EDIT_SALE];

/// Gate for the role editor
pub const ADMIN_PERMISSIONS: &[&str] = &[MANAGE_ROLES, MANAGE_USERS];

/// Whether `key` is one of the well-known permission keys
pub fn is_known_permission(key: &str) -> bool {
    ALL_PERMISSIONS.contains(&key)
}

/// Human-readable label for a permission key (`view_payments` -> `view payments`)
pub fn permission_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Permission requirement of a gated action: one key, or any of several
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required<'a> {
    One(&'a str),
    AnyOf(&'a [&'a str]),
}

impl<'a> Required<'a> {
    /// Required keys as a slice
    pub fn keys(&self) -> &[&'a str] {
        match self {
            Self::One(key) => std::slice::from_ref(key),
            Self::AnyOf(keys) => keys,
        }
    }

    /// Label shown when the requirement is not met
    pub fn label(&self) -> String {
        self.keys()
            .first()
            .map(|key| permission_label(key))
            .unwrap_or_default()
    }
}

impl<'a> From<&'a str> for Required<'a> {
    fn from(key: &'a str) -> Self {
        Self::One(key)
    }
}

impl<'a> From<&'a [&'a str]> for Required<'a> {
    fn from(keys: &'a [&'a str]) -> Self {
        Self::AnyOf(keys)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Required<'a> {
    fn from(keys: &'a [&'a str; N]) -> Self {
        Self::AnyOf(keys.as_slice())
    }
}

/// Signed-in user with the permission set fetched for this session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    /// Role key, e.g. `sales_manager`
    pub role: String,
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn new<I, S>(email: impl Into<String>, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            email: email.into(),
            role: role.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// `developer` and `admin` pass every check
    pub fn is_override(&self) -> bool {
        OVERRIDE_ROLES.contains(&self.role.as_str())
    }

    /// Any-of check against the granted set
    pub fn has_permission<'a>(&self, required: impl Into<Required<'a>>) -> bool {
        if self.is_override() {
            return true;
        }
        required
            .into()
            .keys()
            .iter()
            .any(|key| self.permissions.contains(*key))
    }

    /// All-of check; no console gate uses this mode
    pub fn has_all(&self, keys: &[&str]) -> bool {
        if self.is_override() {
            return true;
        }
        !keys.is_empty() && keys.iter().all(|key| self.permissions.contains(*key))
    }
}

impl From<MyPermissions> for Principal {
    fn from(resp: MyPermissions) -> Self {
        Self::new(resp.email, resp.role, resp.permissions)
    }
}

/// Resolve a requirement for an optional principal
///
/// Never fails: a missing principal simply has no permissions.
pub fn has_permission<'a>(principal: Option<&Principal>, required: impl Into<Required<'a>>) -> bool {
    principal.is_some_and(|p| p.has_permission(required))
}
