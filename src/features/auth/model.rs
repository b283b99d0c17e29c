use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_KB_ADMIN, ROLE_SUPER_ADMIN};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(ROLE_SUPER_ADMIN)
    }

    pub fn is_kb_admin(&self) -> bool {
        self.has_role(ROLE_KB_ADMIN)
    }

    /// Check if user may manage KB categories (super_admin or kb_admin)
    pub fn has_kb_admin_access(&self) -> bool {
        self.is_super_admin() || self.is_kb_admin()
    }
}
