//! Decode-then-validate pipeline and its Axum extractor
//!
//! `read_and_validate` is the only entry point callers need: it decodes a
//! JSON body into a form and runs the form's own acceptance check.
//! `ValidatedForm<T>` wraps it for handlers.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{config::FormConfig, error::ApiError};

/// Trait for request forms that carry their own acceptance rules
///
/// `is_valid` must be a pure function of the form's fields: no I/O, no
/// mutation, same verdict for the same input.
pub trait Validatable {
    fn is_valid(&self) -> bool;
}

/// Why a request form was rejected
#[derive(Error, Debug)]
pub enum FormError {
    /// The body is not JSON or does not match the form's shape
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The body could not be read (too large, connection dropped)
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    /// The body decoded but the form failed its acceptance rules
    #[error("invalid form")]
    InvalidForm,
}

impl FormError {
    /// Decode-class failures: the form was never populated
    pub fn is_decode(&self) -> bool {
        matches!(self, FormError::Decode(_) | FormError::Body(_))
    }
}

/// Decode `body` into `target`, then validate it.
///
/// On a decode failure `target` is left untouched and `is_valid` is never
/// called. On `InvalidForm` the decoded form is still stored in `target`.
pub fn read_and_validate<T>(body: &[u8], target: &mut T) -> Result<(), FormError>
where
    T: DeserializeOwned + Validatable,
{
    *target = serde_json::from_slice(body)?;

    if !target.is_valid() {
        return Err(FormError::InvalidForm);
    }
    Ok(())
}

/// Like `read_and_validate`, but returns the form instead of filling one in
pub fn decode_and_validate<T>(body: &[u8]) -> Result<T, FormError>
where
    T: DeserializeOwned + Validatable,
{
    let form: T = serde_json::from_slice(body)?;

    if !form.is_valid() {
        return Err(FormError::InvalidForm);
    }
    Ok(form)
}

/// JSON extractor that only yields forms passing `Validatable::is_valid`
///
/// The body limit comes from a `FormConfig` in the request extensions, or
/// `FormConfig::default()` when none is installed.
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validatable + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let config = req
            .extensions()
            .get::<FormConfig>()
            .copied()
            .unwrap_or_default();
        let uri = req.uri().clone();

        let body = axum::body::to_bytes(req.into_body(), config.max_body_bytes)
            .await
            .map_err(|err| reject(&uri, FormError::Body(err)))?;

        decode_and_validate(&body)
            .map(ValidatedForm)
            .map_err(|err| reject(&uri, err))
    }
}

fn reject(uri: &axum::http::Uri, err: FormError) -> ApiError {
    tracing::debug!(
        uri = %uri,
        decode = err.is_decode(),
        error = %err,
        "request form rejected"
    );
    ApiError::from(err)
}

impl<T> std::ops::Deref for ValidatedForm<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::DerefMut for ValidatedForm<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::cell::Cell;

    thread_local! {
        static VALIDITY_CHECKS: Cell<usize> = const { Cell::new(0) };
    }

    #[derive(Debug, Default, Deserialize)]
    struct Gate {
        accept: bool,
    }

    impl Validatable for Gate {
        fn is_valid(&self) -> bool {
            VALIDITY_CHECKS.with(|c| c.set(c.get() + 1));
            self.accept
        }
    }

    #[test]
    fn test_decode_failure_skips_validation() {
        let before = VALIDITY_CHECKS.with(Cell::get);
        let mut gate = Gate { accept: true };

        let malformed = read_and_validate(b"{\"accept\": tru", &mut gate);
        let mismatched = read_and_validate(br#"{"accept": "yes"}"#, &mut gate);

        assert!(matches!(malformed, Err(FormError::Decode(_))));
        assert!(matches!(mismatched, Err(FormError::Decode(_))));
        assert_eq!(VALIDITY_CHECKS.with(Cell::get), before);
        // untouched on decode failure
        assert!(gate.accept);
    }

    #[test]
    fn test_invalid_form_is_sentinel() {
        let mut gate = Gate::default();
        let err = read_and_validate(br#"{"accept": false}"#, &mut gate).unwrap_err();

        assert!(matches!(err, FormError::InvalidForm));
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "invalid form");
    }

    #[test]
    fn test_success_populates_target() {
        let mut gate = Gate::default();
        read_and_validate(br#"{"accept": true}"#, &mut gate).unwrap();
        assert!(gate.accept);

        let gate: Gate = decode_and_validate(br#"{"accept": true}"#).unwrap();
        assert!(gate.accept);
    }

    #[test]
    fn test_decode_error_passes_through_unchanged() {
        let direct = serde_json::from_slice::<Gate>(b"[]").unwrap_err().to_string();
        let err = decode_and_validate::<Gate>(b"[]").unwrap_err();

        assert!(err.is_decode());
        assert_eq!(err.to_string(), direct);
    }

    #[tokio::test]
    async fn test_body_error_keeps_source() {
        let read = axum::body::to_bytes(axum::body::Body::from("x".repeat(64)), 16).await;
        let err = FormError::Body(read.unwrap_err());

        assert!(err.is_decode());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to read request body"));
    }
}
