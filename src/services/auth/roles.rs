//! Role identifiers and the allow-lists used by route handlers.
//!
//! Roles are plain integers on the identity (`role_id`). Allow-lists are
//! built per call site; these constants cover the combinations the API uses.

pub type RoleId = i32;

pub const SUPERADMIN: RoleId = 1;
pub const ADMIN: RoleId = 2;
pub const USER: RoleId = 3;

pub const ADMINS: &[RoleId] = &[SUPERADMIN, ADMIN];
pub const ANY_ROLE: &[RoleId] = &[SUPERADMIN, ADMIN, USER];
pub const SUPERADMIN_ONLY: &[RoleId] = &[SUPERADMIN];

/// Whether `role` is a known role id.
pub fn is_known(role: RoleId) -> bool {
    ANY_ROLE.contains(&role)
}

pub fn is_admin(role: RoleId) -> bool {
    ADMINS.contains(&role)
}

pub fn is_superadmin(role: RoleId) -> bool {
    SUPERADMIN_ONLY.contains(&role)
}
