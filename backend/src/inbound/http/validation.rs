//! Shared validation helpers for the HTTP adapter.
//!
//! Field-level constraints live here, not in the domain: handlers parse and
//! validate request payloads into domain types before any port is called.
//! Every failure carries `{field, value?, code}` details so clients can
//! pinpoint the offending input.

use bigdecimal::BigDecimal;
use serde_json::json;

use super::error::ApiError;

fn field_error(field: &'static str, message: String, code: &'static str) -> ApiError {
    ApiError::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn field_value_error(
    field: &'static str,
    message: String,
    code: &'static str,
    value: &str,
) -> ApiError {
    ApiError::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code,
    }))
}

/// A required request field was absent.
pub(crate) fn missing_field_error(field: &'static str) -> ApiError {
    field_error(
        field,
        format!("missing required field: {field}"),
        "missing_field",
    )
}

/// A string field failed to parse into a closed enumeration.
pub(crate) fn invalid_enum_error(
    field: &'static str,
    value: &str,
    expected: &'static str,
) -> ApiError {
    field_value_error(
        field,
        format!("{field} must be one of {expected}"),
        "invalid_value",
        value,
    )
}

/// A path or query segment failed to parse as a stall identifier.
pub(crate) fn invalid_id_error(value: &str) -> ApiError {
    field_value_error(
        "id",
        "id must be a valid UUID".to_owned(),
        "invalid_id",
        value,
    )
}

/// Validate that a price is non-negative.
pub(crate) fn validate_price(price: BigDecimal) -> Result<BigDecimal, ApiError> {
    if price.sign() == bigdecimal::num_bigint::Sign::Minus {
        return Err(field_value_error(
            "price",
            "price must not be negative".to_owned(),
            "negative_price",
            &price.to_string(),
        ));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::error::ApiErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn missing_field_error_names_the_field() {
        let error = missing_field_error("code");
        assert_eq!(error.code(), ApiErrorCode::InvalidRequest);
        let details = error.details().and_then(Value::as_object).expect("details");
        assert_eq!(details.get("field").and_then(Value::as_str), Some("code"));
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("missing_field")
        );
    }

    #[rstest]
    fn invalid_enum_error_carries_the_offending_value() {
        let error = invalid_enum_error("size", "gigantic", "SMALL, MEDIUM, LARGE");
        let details = error.details().and_then(Value::as_object).expect("details");
        assert_eq!(
            details.get("value").and_then(Value::as_str),
            Some("gigantic")
        );
        assert!(error.message().contains("SMALL, MEDIUM, LARGE"));
    }

    #[rstest]
    fn negative_price_is_rejected() {
        let error = validate_price("-1.00".parse().expect("decimal")).expect_err("negative");
        let details = error.details().and_then(Value::as_object).expect("details");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("negative_price")
        );
    }

    #[rstest]
    #[case("0")]
    #[case("500.00")]
    fn non_negative_price_passes(#[case] raw: &str) {
        let price: BigDecimal = raw.parse().expect("decimal");
        assert_eq!(validate_price(price.clone()).expect("valid"), price);
    }
}
