pub mod response;
pub mod string_enum;

pub use response::ApiResponse;
