//! Extractors that route framework rejections into the fault taxonomy.
//!
//! Handlers take these instead of the bare axum extractors so every malformed
//! request is classified through the same chain as any other fault.

use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{AppError, BindingError, PayloadValidationError, TypeMismatchError};

/// JSON body that is deserialized and then run through the validation engine
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_fault)?;
        value.validate().map_err(PayloadValidationError::from)?;
        Ok(Self(value))
    }
}

/// Query string bound into `T`, rejections become binding faults
#[derive(Debug)]
pub struct BoundQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for BoundQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                BindingError::new(vec![rejection.body_text()])
            })?;
        Ok(Self(value))
    }
}

/// Path parameters bound into `T`, rejections become type-mismatch faults
pub struct BoundPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for BoundPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                TypeMismatchError::new("path", rejection.body_text())
            })?;
        Ok(Self(value))
    }
}

fn json_rejection_to_fault(rejection: JsonRejection) -> AppError {
    match rejection {
        // Body parsed as JSON but a field had the wrong shape
        JsonRejection::JsonDataError(err) => {
            AppError::from(TypeMismatchError::new("body", err.body_text()))
        }
        other => AppError::from(BindingError::new(vec![other.body_text()])),
    }
}
