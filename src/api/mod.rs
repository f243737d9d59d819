/*
 * Responsibility
 * - API バージョンごとの Router を束ねる
 */
pub mod v1;
