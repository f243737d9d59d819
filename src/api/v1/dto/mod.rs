/*
 * Responsibility
 * - request/response DTO
 * - validate() は形式チェックのみ (存在チェックや権限は handler / DB 側)
 * - 公開 ID は encode 済みの String で返す (内部 ID を漏らさない)
 */
pub mod articles;
pub mod auth;
pub mod categories;
pub mod pagination;
pub mod products;
pub mod subsectors;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Tri-state field for nullable columns:
/// - missing: `None` (do not update)
/// - `null`: `Some(None)` (set NULL)
/// - value: `Some(Some(v))`
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn check_required(
    value: &str,
    max_chars: usize,
    missing: &'static str,
    too_long: &'static str,
) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err(missing);
    }
    check_max(value, max_chars, too_long)
}

pub(crate) fn check_max(
    value: &str,
    max_chars: usize,
    too_long: &'static str,
) -> Result<(), &'static str> {
    if value.chars().count() > max_chars {
        return Err(too_long);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        description: Option<Option<String>>,
    }

    #[test]
    fn nullable_distinguishes_missing_null_and_value() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.description, None);

        let null: Patch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: Patch = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert_eq!(set.description, Some(Some("x".to_string())));
    }

    #[test]
    fn check_required_counts_chars_not_bytes() {
        assert!(check_required("ééé", 3, "missing", "long").is_ok());
        assert_eq!(check_required("éééé", 3, "missing", "long"), Err("long"));
        assert_eq!(check_required("   ", 3, "missing", "long"), Err("missing"));
    }
}
