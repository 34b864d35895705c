//! Path parameter extractor with improved error handling.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Path parameter extractor with improved error handling.
///
/// Missing route parameters and deserialization failures are reported as
/// distinct error conditions with useful context.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Creates a new [`Path`] wrapper around the provided path parameters.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Consumes the wrapper and returns the inner path parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumPath::<T>::from_request_parts(parts, state).await {
            Ok(AxumPath(path)) => Ok(Path(path)),
            Err(rejection) => Err(enhance_path_error(rejection)),
        }
    }
}

/// Converts a raw Axum path rejection into an informative error.
fn enhance_path_error(rejection: PathRejection) -> Error<'static> {
    match rejection {
        PathRejection::FailedToDeserializePathParams(err) => ErrorKind::BadRequest
            .with_message("Invalid path parameter")
            .with_context(format!("Path parameter parsing failed: {}", err)),
        PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
            .with_message("Required path parameter missing")
            .with_context(format!("Path parameter extraction failed: {}", err)),
        _ => ErrorKind::InternalServerError
            .with_message("Path processing failed")
            .with_context("Unexpected error occurred during path parameter processing"),
    }
}

impl<T> aide::OperationInput for Path<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumPath::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumPath::<T>::inferred_early_responses(ctx, operation)
    }
}
