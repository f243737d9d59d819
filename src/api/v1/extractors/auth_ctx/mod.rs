/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Authorization ヘッダを検証し、role allow-list を満たした Identity を handler に渡す
 * - axum 依存は core に閉じ込め、allow-list の型は types に分離する
 */
mod core;
mod types;

pub use self::core::AuthCtx;
pub use types::{
    AdminCtx, AdminOnly, AllowList, AnyRole, AnyRoleCtx, SuperAdminCtx, SuperAdminOnly,
};
