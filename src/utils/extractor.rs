//! 路径参数安全提取器
//!
//! 路径中的各类 ID 在进入处理程序前统一校验：去除首尾空白、不能为空、长度不超过 191。
//! 校验失败直接返回 400，处理程序拿到的总是合法 ID。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_id;

macro_rules! define_safe_string_id_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(pub String);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                ready(
                    validate_id(raw, $param)
                        .map($name)
                        .map_err(|e| bad_path_param(e.message())),
                )
            }
        }
    };
}

fn bad_path_param(message: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter: {message}"),
    ));
    InternalError::from_response(message.to_string(), response).into()
}

define_safe_string_id_extractor!(SafeProgramId, "program_id");
define_safe_string_id_extractor!(SafeSubjectId, "subject_id");
define_safe_string_id_extractor!(SafePoolId, "pool_id");
define_safe_string_id_extractor!(SafeRuleId, "rule_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_trimmed() {
        let (req, mut payload) = TestRequest::default()
            .param("program_id", " abc ")
            .to_http_parts();
        let id = SafeProgramId::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(id.0, "abc");
    }

    #[actix_web::test]
    async fn test_blank_id_is_rejected() {
        let (req, mut payload) = TestRequest::default()
            .param("subject_id", "  ")
            .to_http_parts();
        let err = SafeSubjectId::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_overlong_id_is_rejected() {
        let long = "p".repeat(192);
        let (req, mut payload) = TestRequest::default()
            .param("pool_id", long.clone())
            .to_http_parts();
        assert!(SafePoolId::from_request(&req, &mut payload).await.is_err());
    }
}
