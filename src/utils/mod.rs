pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod requirement_graph;
pub mod validate;

pub use extractor::{SafePoolId, SafeProgramId, SafeRuleId, SafeSubjectId};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
