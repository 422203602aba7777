pub mod config;
pub mod error;
pub mod validation;

pub use config::{ConfigError, FormConfig};
pub use error::{ApiError, ApiResult};
pub use validation::{
    decode_and_validate, read_and_validate, CheckConfigForm, CheckConfigSloAvailabilityForm,
    CheckConfigSloLatencyForm, FormError, ProjectForm, ProjectStatusForm, Validatable,
    ValidatedForm,
};
