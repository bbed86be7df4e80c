//! Axum handlers for the endpoint table.
//!
//! Successful writes answer `303 See Other` pointing at the page to show next.
//! A submission that fails field validation is answered with the form page
//! (`200`) carrying the submitted values and the errors. Every other failure
//! goes through [`ApiError`]'s response mapping.

use axum::response::{IntoResponse, Redirect, Response};

use crate::errors::ApiError;
use crate::validation::ValidationError;

pub mod employees;
pub mod projects;
pub mod tasks;

/// Separate field errors, which the handler renders as a form page, from
/// failures that become an error response.
fn redisplay<T>(result: Result<T, ApiError>) -> Result<Result<T, Vec<ValidationError>>, ApiError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(ApiError::Validation { errors }) => {
            tracing::debug!(errors = errors.len(), "Form rejected");
            Ok(Err(errors.into_vec()))
        }
        Err(err) => Err(err),
    }
}

fn see_other(location: &str) -> Response {
    Redirect::to(location).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};

    #[test]
    fn test_redisplay_keeps_field_errors() {
        let result: Result<(), ApiError> = Err(ApiError::invalid_field("email", "taken"));
        let errors = redisplay(result).unwrap().unwrap_err();
        assert_eq!(errors, vec![ValidationError::new("email", "taken")]);
    }

    #[test]
    fn test_redisplay_passes_other_errors_through() {
        let result: Result<(), ApiError> = Err(ApiError::bad_request("nope"));
        let err = redisplay(result).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_see_other() {
        let response = see_other("/Employees");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/Employees");
    }
}
