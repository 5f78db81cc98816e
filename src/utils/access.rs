//! Role resolution and route protection.
//!
//! A [`Principal`] carries the roles fetched for the signed-in account on the
//! current request. [`evaluate`] decides whether it may open a page or call an
//! endpoint guarded by a [`Requirement`].

use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::models::role_models::Role;
use crate::utils::error::{AppError, AppResult};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// The roles held by one account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn new(mut roles: Vec<Role>) -> Self {
        roles.sort();
        roles.dedup();
        Self(roles)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.contains(Role::Admin) || self.contains(Role::SuperAdmin)
    }

    pub fn is_super_admin(&self) -> bool {
        self.contains(Role::SuperAdmin)
    }

    pub fn is_vendor(&self) -> bool {
        self.contains(Role::Vendor)
    }

    /// Role names for clients. An account without rows is a plain `user`.
    pub fn names(&self) -> Vec<Role> {
        if self.0.is_empty() {
            vec![Role::User]
        } else {
            self.0.clone()
        }
    }

    /// Dashboard a freshly signed-in account lands on.
    pub fn landing_path(&self) -> &'static str {
        if self.is_admin() {
            "/admin-dashboard"
        } else if self.is_vendor() {
            "/vendor-dashboard"
        } else {
            "/user-dashboard"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: ObjectId,
    pub email: String,
    pub roles: RoleSet,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    /// Turns a failed [`evaluate`] into the matching API error.
    pub fn require(&self, requirement: Requirement) -> AppResult<()> {
        match evaluate(Some(self), requirement) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::RedirectToLogin => {
                Err(AppError::AuthenticationError("Sign in required".to_string()))
            }
            AccessDecision::RedirectHome => Err(AppError::Forbidden(format!(
                "{} privileges required",
                requirement.label()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Public,
    Authenticated,
    Vendor,
    Admin,
    SuperAdmin,
}

impl Requirement {
    fn label(self) -> &'static str {
        match self {
            Requirement::Public => "No",
            Requirement::Authenticated => "Signed-in",
            Requirement::Vendor => "Vendor",
            Requirement::Admin => "Admin",
            Requirement::SuperAdmin => "Super admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

impl AccessDecision {
    pub fn redirect_to(self) -> Option<&'static str> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin => Some(LOGIN_PATH),
            AccessDecision::RedirectHome => Some(HOME_PATH),
        }
    }
}

pub fn evaluate(principal: Option<&Principal>, requirement: Requirement) -> AccessDecision {
    let Some(principal) = principal else {
        return if requirement == Requirement::Public {
            AccessDecision::Allow
        } else {
            AccessDecision::RedirectToLogin
        };
    };

    let roles = &principal.roles;
    let allowed = match requirement {
        Requirement::Public | Requirement::Authenticated => true,
        Requirement::Vendor => roles.is_vendor(),
        Requirement::Admin => roles.is_admin(),
        Requirement::SuperAdmin => roles.is_super_admin(),
    };

    if allowed {
        AccessDecision::Allow
    } else {
        AccessDecision::RedirectHome
    }
}

/// Requirement of a frontend page. Unknown paths render the public not-found page.
pub fn requirement_for_path(path: &str) -> Requirement {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] | ["vendors"] | ["vendor", _] | ["login"] | ["signup"] | ["vendor-signup"]
        | ["vendor-login"] | ["polls"] | ["about"] | ["contact"] => Requirement::Public,
        ["user-dashboard"] | ["user-profile"] | ["review", _] => Requirement::Authenticated,
        ["vendor-dashboard"] => Requirement::Vendor,
        ["admin"] | ["admin-dashboard"] => Requirement::Admin,
        _ => Requirement::Public,
    }
}
