/*
 * Responsibility
 * - v1 の handler 群
 * - 流れ: AuthCtx (認可) → PublicId / Json 受け取り → validate() → repo → AppError 変換
 */
pub mod articles;
pub mod auth;
pub mod categories;
pub mod health;
pub mod products;
pub mod subsectors;
pub mod users;
