//! Request validation.
//!
//! Pure checks shared across handlers. Each returns a message ready for the
//! `VALIDATION` envelope; handlers map them with [`ApiError::validation`].
//!
//! [`ApiError::validation`]: crate::errors::ApiError::validation

use rust_decimal::Decimal;
use vermeil_app::domain::catalog::data::Page;
use vermeil_app::domain::orders::models::ShippingAddress;

const MAX_PAGE_LIMIT: u32 = 100;
const MAX_ITEM_QUANTITY: u32 = 99;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_NAME_LENGTH: usize = 100;
const MAX_SEARCH_LENGTH: usize = 100;
const MAX_ADDRESS_FIELD_LENGTH: usize = 200;
const MAX_POSTAL_CODE_LENGTH: usize = 20;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

pub(crate) fn pagination(limit: Option<u32>, offset: Option<u32>) -> Result<Page, String> {
    let limit = match limit {
        None => Page::default().limit,
        Some(limit) if (1..=MAX_PAGE_LIMIT).contains(&limit) => limit,
        Some(_out_of_range) => {
            return Err(format!("limit must be between 1 and {MAX_PAGE_LIMIT}"));
        }
    };

    Ok(Page {
        limit,
        offset: offset.unwrap_or(0),
    })
}

pub(crate) fn quantity(value: u32) -> Result<(), String> {
    if (1..=MAX_ITEM_QUANTITY).contains(&value) {
        Ok(())
    } else {
        Err(format!("quantity must be between 1 and {MAX_ITEM_QUANTITY}"))
    }
}

pub(crate) fn price_range(min: Option<Decimal>, max: Option<Decimal>) -> Result<(), String> {
    if min.is_some_and(|min| min.is_sign_negative())
        || max.is_some_and(|max| max.is_sign_negative())
    {
        return Err("prices cannot be negative".to_string());
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err("min_price cannot exceed max_price".to_string());
        }
    }

    Ok(())
}

pub(crate) fn search_query(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("search query cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_SEARCH_LENGTH {
        return Err(format!(
            "search query cannot exceed {MAX_SEARCH_LENGTH} characters"
        ));
    }

    Ok(())
}

/// Shape check only. Deliverability is the mail server's problem.
pub(crate) fn email(value: &str) -> Result<(), String> {
    let well_formed = value.len() <= MAX_EMAIL_LENGTH
        && !value.contains(char::is_whitespace)
        && value
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            });

    if well_formed {
        Ok(())
    } else {
        Err("email address is not valid".to_string())
    }
}

pub(crate) fn password(value: &str) -> Result<(), String> {
    let length = value.chars().count();

    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(format!(
            "password must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
        ))
    }
}

pub(crate) fn display_name(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!("name cannot exceed {MAX_NAME_LENGTH} characters"));
    }

    Ok(())
}

pub(crate) fn shipping_address(address: &ShippingAddress) -> Result<(), String> {
    required_field("full_name", &address.full_name)?;
    required_field("line1", &address.line1)?;
    required_field("city", &address.city)?;

    if let Some(line2) = &address.line2 {
        bounded_field("line2", line2)?;
    }

    let postal_code = address.postal_code.trim();

    if postal_code.is_empty() || postal_code.chars().count() > MAX_POSTAL_CODE_LENGTH {
        return Err("postal_code is not valid".to_string());
    }

    if address.country.len() != 2 || !address.country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("country must be a two-letter ISO 3166-1 code".to_string());
    }

    if let Some(phone) = &address.phone {
        if phone.chars().count() > 32 {
            return Err("phone is not valid".to_string());
        }
    }

    Ok(())
}

fn required_field(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{name} cannot be empty"));
    }

    bounded_field(name, value)
}

fn bounded_field(name: &str, value: &str) -> Result<(), String> {
    if value.chars().count() > MAX_ADDRESS_FIELD_LENGTH {
        return Err(format!(
            "{name} cannot exceed {MAX_ADDRESS_FIELD_LENGTH} characters"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Vera Miles".to_string(),
            line1: "12 Rue de la Paix".to_string(),
            line2: None,
            city: "Paris".to_string(),
            postal_code: "75002".to_string(),
            country: "FR".to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_pagination_defaults_and_bounds() {
        assert_eq!(pagination(None, None), Ok(Page::default()));
        assert_eq!(
            pagination(Some(50), Some(100)),
            Ok(Page {
                limit: 50,
                offset: 100
            })
        );
        assert!(pagination(Some(0), None).is_err());
        assert!(pagination(Some(101), None).is_err());
        assert!(pagination(Some(100), None).is_ok());
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(quantity(1).is_ok());
        assert!(quantity(99).is_ok());
        assert!(quantity(0).is_err());
        assert!(quantity(100).is_err());
    }

    #[test]
    fn test_price_range_rejects_negatives_and_inversions() {
        assert!(price_range(None, None).is_ok());
        assert!(price_range(Some(Decimal::new(100, 2)), Some(Decimal::new(500, 2))).is_ok());
        assert!(price_range(Some(Decimal::new(-100, 2)), None).is_err());
        assert!(price_range(Some(Decimal::new(500, 2)), Some(Decimal::new(100, 2))).is_err());
    }

    #[test]
    fn test_search_query_must_have_content() {
        assert!(search_query("opal").is_ok());
        assert!(search_query("   ").is_err());
        assert!(search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(email("vera@example.com").is_ok());
        assert!(email("no-at-sign").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("vera@nodot").is_err());
        assert!(email("vera two@example.com").is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(password("12345678").is_ok());
        assert!(password("1234567").is_err());
        assert!(password(&"x".repeat(128)).is_ok());
        assert!(password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_display_name_bounds() {
        assert!(display_name("Vera").is_ok());
        assert!(display_name("  ").is_err());
        assert!(display_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_shipping_address_accepts_a_complete_address() {
        assert_eq!(shipping_address(&address()), Ok(()));
    }

    #[test]
    fn test_shipping_address_requires_core_fields() {
        let mut missing_name = address();
        missing_name.full_name = "  ".to_string();

        assert!(shipping_address(&missing_name).is_err());

        let mut missing_city = address();
        missing_city.city = String::new();

        assert!(shipping_address(&missing_city).is_err());
    }

    #[test]
    fn test_shipping_address_validates_the_country_code() {
        let mut long_country = address();
        long_country.country = "FRA".to_string();

        assert!(shipping_address(&long_country).is_err());

        let mut numeric_country = address();
        numeric_country.country = "F1".to_string();

        assert!(shipping_address(&numeric_country).is_err());
    }
}
