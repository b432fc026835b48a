//! Request body extractors
//!
//! Wraps `axum::Json` so malformed bodies and failed field validation both
//! come back through the [`ApiError`] boundary as JSON, never as axum's
//! plain-text rejections.

use crate::core::error::ApiError;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `validator` rules after deserialization
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(flatten_errors(&errors)))?;

        Ok(ValidJson(value))
    }
}

/// JSON body extractor without validation rules, for handlers that parse
/// payloads field by field (partial task updates)
pub struct JsonPayload<T>(pub T);

impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        Ok(JsonPayload(value))
    }
}

fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid value for '{}'", field),
            })
        })
        .collect();

    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Sample {
        #[validate(email(message = "Invalid email address"))]
        email: String,
    }

    #[test]
    fn test_flatten_errors_prefers_message() {
        let sample = Sample {
            email: "not-an-email".to_string(),
        };
        let errors = sample.validate().unwrap_err();

        assert_eq!(flatten_errors(&errors), "Invalid email address");
    }
}
