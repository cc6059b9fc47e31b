//! Mapping pipeline between the three shapes of a product.
//!
//! - `request`: inbound request DTO → [`Product`](crate::Product)
//! - `response`: [`Product`](crate::Product) → outbound response DTO
//! - `record`: [`Product`](crate::Product) ↔ storage record
//!
//! All functions are pure. Value-object failures propagate unchanged; a
//! `MappingError` only ever means "the object to map was absent".

pub mod record;
pub mod request;
pub mod response;

pub use record::{after_conversion, from_record, to_record};
pub use request::{from_create_request, from_update_request};
pub use response::to_response;
