//! lf-api: wire boundary for the setting-comparison endpoint.
//!
//! Shapes validated side values into the request body the backend expects,
//! decodes raw two-side input documents, and maps the backend's structured
//! rejection payloads back into the field-keyed error shape produced by
//! the local validator.

pub mod error;
pub mod error_map;
pub mod inputs;
pub mod payload;
pub mod schema;

pub use error::{ApiError, ApiResult};
pub use error_map::{MSG_COMPARE_FALLBACK, MappedCompareError, TransportError, map_compare_error};
pub use inputs::CompareInputsDoc;
pub use payload::{SidePayload, build_compare_request};
pub use schema::{COMPARE_SCHEMA_VERSION, CompareRequest, SideRequest};
