/*
 * Responsibility
 * - Router 全体に掛ける横断的な middleware (re-export)
 * - 認証/認可は middleware ではなく AuthCtx extractor で行う
 */
pub mod cors;
pub mod http;
pub mod security_headers;
