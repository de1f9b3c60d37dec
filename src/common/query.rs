use crate::common::error::{AppError, AppResult};

pub const DEFAULT_LIMIT: i64 = 5;

/// A sortable column exposed through the `order` query parameter.
pub trait SortColumn: Copy + 'static {
    /// Accepted `order` values and the column each maps to.
    const ALLOWED: &'static [(&'static str, Self)];
    /// Used when `order` is absent.
    const DEFAULT: Self;

    fn column(self) -> &'static str;
}

/// Resolves `order` against the allow-list. Absent or empty values fall back
/// to the default column.
pub fn resolve_order<S: SortColumn>(raw: Option<&str>) -> AppResult<S> {
    let Some(requested) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(S::DEFAULT);
    };

    S::ALLOWED
        .iter()
        .find(|(name, _)| *name == requested)
        .map(|(_, sort)| *sort)
        .ok_or_else(|| {
            let names: Vec<&str> = S::ALLOWED.iter().map(|(name, _)| *name).collect();
            AppError::InvalidParameter(format!("Sorting is only allowed by: {}", names.join(", ")))
        })
}

/// Parses a non-negative integer query parameter such as `limit` or `offset`.
pub fn parse_count(name: &str, raw: Option<&str>, default: i64) -> AppResult<i64> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| {
                AppError::InvalidParameter(format!("{} must be a non-negative integer", name))
            }),
    }
}

pub fn parse_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::InvalidParameter("The ID must be a number".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Fruit {
        Id,
        Name,
        Weight,
    }

    impl SortColumn for Fruit {
        const ALLOWED: &'static [(&'static str, Self)] = &[("name", Fruit::Name), ("heaviness", Fruit::Weight)];
        const DEFAULT: Self = Fruit::Id;

        fn column(self) -> &'static str {
            match self {
                Fruit::Id => "id",
                Fruit::Name => "name",
                Fruit::Weight => "weight",
            }
        }
    }

    #[test]
    fn missing_or_blank_order_uses_default() {
        assert_eq!(resolve_order::<Fruit>(None).unwrap(), Fruit::Id);
        assert_eq!(resolve_order::<Fruit>(Some("  ")).unwrap(), Fruit::Id);
    }

    #[test]
    fn allowed_order_maps_to_column() {
        assert_eq!(resolve_order::<Fruit>(Some("heaviness")).unwrap().column(), "weight");
    }

    #[test]
    fn default_column_is_not_requestable() {
        let err = resolve_order::<Fruit>(Some("id")).unwrap_err();
        assert_eq!(err.to_string(), "Sorting is only allowed by: name, heaviness");
    }

    #[test]
    fn unknown_order_is_rejected() {
        for raw in ["weight", "name; DROP TABLE fruit", "NAME"] {
            assert!(matches!(resolve_order::<Fruit>(Some(raw)), Err(AppError::InvalidParameter(_))));
        }
    }

    #[test]
    fn counts_default_and_reject_garbage() {
        assert_eq!(parse_count("limit", None, DEFAULT_LIMIT).unwrap(), 5);
        assert_eq!(parse_count("limit", Some(""), DEFAULT_LIMIT).unwrap(), 5);
        assert_eq!(parse_count("offset", Some("12"), 0).unwrap(), 12);
        assert!(parse_count("limit", Some("-1"), DEFAULT_LIMIT).is_err());
        assert!(parse_count("limit", Some("ten"), DEFAULT_LIMIT).is_err());
    }

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("abc").is_err());
        assert!(parse_id("4.2").is_err());
        assert!(parse_id("").is_err());
    }
}
