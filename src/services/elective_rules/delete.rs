use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ElectiveRuleService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_rule(
    service: &ElectiveRuleService,
    request: &HttpRequest,
    program_id: &str,
    rule_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_elective_rule(program_id, rule_id).await {
        Ok(true) => {
            info!("Elective rule {} deleted", rule_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Elective rule deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ElectiveRuleNotFound,
            "Elective rule not found",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ElectiveRuleDeleteFailed,
            "Failed to delete elective rule",
        )),
    }
}
