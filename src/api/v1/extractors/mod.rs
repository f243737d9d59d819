/*
 * Responsibility
 * - handler が受け取る axum extractor の公開窓口
 *   - AuthCtx<R>: bearer token 検証 + role allow-list
 *   - PublicId<T>: 公開 ID → 内部 ID
 *   - ApiJson<T> / ApiQuery<T>: rejection を {"message"} に揃える
 */
pub mod auth_ctx;
pub mod body;
pub mod public_id;

pub use auth_ctx::{AdminCtx, AnyRoleCtx, AuthCtx, SuperAdminCtx};
pub use body::{ApiJson, ApiQuery};
