// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Super admin role - can do everything
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Knowledge-base admin role - can manage KB categories
pub const ROLE_KB_ADMIN: &str = "kb_admin";

/// Message returned to callers for any unexpected failure
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";
