//! Request form validation
//!
//! Every payload accepted by the API is decoded into a form type and then
//! checked against the domain rules for that form before a handler sees it.
//!
//! # Overview
//!
//! 1. **Extractors** - the `Validatable` trait, `read_and_validate` and the
//!    `ValidatedForm<T>` Axum extractor
//! 2. **Validators** - reusable predicates (slugs, URI references), with the
//!    URI-reference grammar itself in `uri`
//! 3. **Forms** - the concrete request forms and their acceptance rules
//!
//! # Usage
//!
//! ```ignore
//! use crate::validation::{ProjectForm, ValidatedForm};
//!
//! pub async fn create_project(
//!     ValidatedForm(form): ValidatedForm<ProjectForm>,
//! ) -> impl IntoResponse {
//!     // form decoded and valid
//! }
//! ```
//!
//! Rejected requests get a 400 Bad Request whose `error` field is
//! `InvalidRequest` when the body could not be decoded and `InvalidForm`
//! when it decoded but failed validation.

pub mod extractors;
pub mod forms;
pub mod uri;
pub mod validators;

pub use extractors::{decode_and_validate, read_and_validate, FormError, Validatable, ValidatedForm};
pub use forms::{
    CheckConfigForm, CheckConfigSloAvailabilityForm, CheckConfigSloLatencyForm, ProjectForm,
    ProjectStatusForm,
};
pub use uri::{check_uri_reference, UriError};
pub use validators::{is_slug, is_uri_reference};
