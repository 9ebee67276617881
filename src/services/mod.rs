pub mod elective_pools;
pub mod elective_rules;
pub mod programs;
pub mod subjects;
pub mod user_subjects;

pub use elective_pools::ElectivePoolService;
pub use elective_rules::ElectiveRuleService;
pub use programs::ProgramService;
pub use subjects::SubjectService;
pub use user_subjects::UserSubjectService;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use tracing::error;

use crate::errors::AcadifyError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 业务错误转换为 HTTP 响应
///
/// 客户端错误原样返回消息并使用给定的业务错误码；
/// 服务端错误记录完整上下文，只向调用方返回笼统的失败信息。
pub(crate) fn error_response(err: &AcadifyError, code: ErrorCode, context: &str) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if err.is_client_error() {
        let code = match err {
            AcadifyError::Authentication(_) => ErrorCode::Unauthorized,
            AcadifyError::Authorization(_) => ErrorCode::Forbidden,
            _ => code,
        };
        return HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()));
    }

    error!("{}: {}", context, err.format_simple());
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: internal server error"),
    ))
}

/// 当前登录用户 ID；缺失时返回 401 响应
pub(crate) fn current_user_id(request: &HttpRequest) -> Result<String, HttpResponse> {
    RequireJWT::extract_user_id(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        ))
    })
}
