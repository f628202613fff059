use lf_core::CoreError;
use lf_settings::FieldKey;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing value for field {field}")]
    MissingField { field: FieldKey },

    #[error(transparent)]
    Core(#[from] CoreError),
}
