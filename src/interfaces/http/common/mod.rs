pub mod error;
pub mod validated_json;

pub use error::{ApiError, ErrorBody};
pub use validated_json::parse_validated;
