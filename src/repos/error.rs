/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - Postgres の制約違反 (SQLSTATE) を意味のあるバリアントに変換する
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[source] sqlx::Error),
    #[error("unique constraint violated")]
    Conflict,
    #[error("foreign key constraint violated")]
    ForeignKey,
    #[error("check constraint violated")]
    CheckViolation,
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        let code = match &e {
            sqlx::Error::Database(dbe) => dbe.code().map(|c| c.into_owned()),
            _ => None,
        };

        constraint_violation(code.as_deref()).unwrap_or(RepoError::Db(e))
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        Self::from_sqlx(e)
    }
}

fn constraint_violation(sqlstate: Option<&str>) -> Option<RepoError> {
    match sqlstate? {
        UNIQUE_VIOLATION => Some(RepoError::Conflict),
        FOREIGN_KEY_VIOLATION => Some(RepoError::ForeignKey),
        CHECK_VIOLATION => Some(RepoError::CheckViolation),
        _ => None,
    }
}
