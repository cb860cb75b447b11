//! Request extractors
//!
//! `ValidatedQuery` deserializes the query string like `axum::extract::Query`
//! but rejects through [`ApiError`], so malformed query strings get the same
//! 422 JSON body as out-of-range values.

use axum::{
    extract::{FromRequestParts, Query, rejection::QueryRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Query string extractor with JSON validation errors
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        Self::Validation {
            field: duplicated_field(&message).map(ToString::to_string),
            message,
        }
    }
}

/// Name of the field serde reported as repeated, if that is the failure
fn duplicated_field(message: &str) -> Option<&str> {
    let rest = &message[message.find("duplicate field `")? + "duplicate field `".len()..];
    rest.split('`').next().filter(|name| !name.is_empty())
}
