use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ElectiveRuleService;
use crate::models::elective_rules::responses::ElectiveRuleListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_rule(
    service: &ElectiveRuleService,
    request: &HttpRequest,
    program_id: &str,
    rule_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_elective_rule(program_id, rule_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Elective rule retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ElectiveRuleNotFound,
            "Elective rule not found",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to load elective rule",
        )),
    }
}

pub async fn list_rules(
    service: &ElectiveRuleService,
    request: &HttpRequest,
    program_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_elective_rules(program_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ElectiveRuleListResponse { items },
            "Elective rules retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to list elective rules",
        )),
    }
}
