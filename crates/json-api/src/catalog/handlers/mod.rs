//! Catalog Handlers

use rust_decimal::Decimal;
use vermeil_app::domain::catalog::data::ProductSort;

use crate::errors::ApiError;

pub(crate) mod categories;
pub(crate) mod featured;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod new_arrivals;
pub(crate) mod search;

/// Parse the `sort` query value. Absent means newest first.
fn parse_sort(value: Option<String>) -> Result<ProductSort, ApiError> {
    match value.as_deref() {
        None => Ok(ProductSort::default()),
        Some("price_asc") => Ok(ProductSort::PriceAsc),
        Some("price_desc") => Ok(ProductSort::PriceDesc),
        Some("newest") => Ok(ProductSort::Newest),
        Some("name_asc") => Ok(ProductSort::NameAsc),
        Some(other) => Err(ApiError::validation(format!("unknown sort \"{other}\""))),
    }
}

fn parse_price(name: &str, value: Option<String>) -> Result<Option<Decimal>, ApiError> {
    value
        .map(|raw| raw.parse::<Decimal>())
        .transpose()
        .map_err(|_invalid| ApiError::validation(format!("{name} must be a decimal number")))
}

fn parse_u32(name: &str, value: Option<String>) -> Result<Option<u32>, ApiError> {
    value
        .map(|raw| raw.parse::<u32>())
        .transpose()
        .map_err(|_invalid| ApiError::validation(format!("{name} must be a non-negative integer")))
}

fn parse_bool(name: &str, value: Option<String>) -> Result<Option<bool>, ApiError> {
    value
        .map(|raw| raw.parse::<bool>())
        .transpose()
        .map_err(|_invalid| ApiError::validation(format!("{name} must be true or false")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_accepts_the_documented_values() {
        assert!(matches!(parse_sort(None), Ok(ProductSort::Newest)));
        assert!(matches!(
            parse_sort(Some("price_asc".to_string())),
            Ok(ProductSort::PriceAsc)
        ));
        assert!(matches!(
            parse_sort(Some("price_desc".to_string())),
            Ok(ProductSort::PriceDesc)
        ));
        assert!(matches!(
            parse_sort(Some("name_asc".to_string())),
            Ok(ProductSort::NameAsc)
        ));
        assert!(parse_sort(Some("popularity".to_string())).is_err());
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert!(parse_price("min_price", Some("12.50".to_string())).is_ok());
        assert!(parse_price("min_price", Some("gold".to_string())).is_err());
        assert!(matches!(parse_price("min_price", None), Ok(None)));
    }

    #[test]
    fn test_parse_bool_accepts_true_and_false_only() {
        assert!(matches!(
            parse_bool("in_stock", Some("true".to_string())),
            Ok(Some(true))
        ));
        assert!(matches!(
            parse_bool("in_stock", Some("false".to_string())),
            Ok(Some(false))
        ));
        assert!(parse_bool("in_stock", Some("yes".to_string())).is_err());
    }
}
