/*
 * Responsibility
 * - route ごとの role allow-list を型として宣言する
 * - handler は AdminCtx などの alias を引数に書くだけで認可が掛かる
 */
use super::core::AuthCtx;
use crate::services::auth::{RoleId, roles};

pub trait AllowList: Send + Sync {
    const ROLES: &'static [RoleId];
}

pub enum AnyRole {}
pub enum AdminOnly {}
pub enum SuperAdminOnly {}

impl AllowList for AnyRole {
    const ROLES: &'static [RoleId] = roles::ANY_ROLE;
}

impl AllowList for AdminOnly {
    const ROLES: &'static [RoleId] = roles::ADMINS;
}

impl AllowList for SuperAdminOnly {
    const ROLES: &'static [RoleId] = roles::SUPERADMIN_ONLY;
}

pub type AnyRoleCtx = AuthCtx<AnyRole>;
pub type AdminCtx = AuthCtx<AdminOnly>;
pub type SuperAdminCtx = AuthCtx<SuperAdminOnly>;
