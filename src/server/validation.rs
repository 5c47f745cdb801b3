//! Form-level checks applied before records reach a repository. The
//! repositories themselves accept any structurally valid record.

use chrono::NaiveDate;

use crate::server::response::ApiError;

const MAX_NAME_LEN: usize = 100;
const MAX_CODE_LEN: usize = 32;

fn validate_text(value: &str, what: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{what} cannot be empty"));
    }
    if value.chars().count() > max_len {
        return Err(format!("{what} cannot exceed {max_len} characters"));
    }
    Ok(())
}

pub fn validate_store(name: &str) -> Result<(), ApiError> {
    validate_text(name, "Store name", MAX_NAME_LEN).map_err(ApiError::bad_request)
}

pub fn validate_product(name: &str, price: f64) -> Result<(), ApiError> {
    validate_text(name, "Product name", MAX_NAME_LEN).map_err(ApiError::bad_request)?;
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::bad_request("Price must be a non-negative number"));
    }
    Ok(())
}

pub fn validate_promotion(
    name: &str,
    code: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), ApiError> {
    validate_text(name, "Promotion name", MAX_NAME_LEN).map_err(ApiError::bad_request)?;
    validate_text(code, "Promotion code", MAX_CODE_LEN).map_err(ApiError::bad_request)?;
    if end_date < start_date {
        return Err(ApiError::bad_request("End date must not be before start date"));
    }
    Ok(())
}
