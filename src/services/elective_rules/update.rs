use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ElectiveRuleService;
use crate::errors::AcadifyError;
use crate::models::elective_rules::requests::UpdateElectiveRuleRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn update_rule(
    service: &ElectiveRuleService,
    request: &HttpRequest,
    program_id: &str,
    rule_id: &str,
    update: UpdateElectiveRuleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 字段合并后的整体校验在存储层的事务内完成
    match storage.update_elective_rule(program_id, rule_id, update).await {
        Ok(Some(detail)) => {
            info!("Elective rule {} updated", rule_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(detail, "Elective rule updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ElectiveRuleNotFound,
            "Elective rule not found",
        ))),
        Err(e) => {
            let code = match e {
                AcadifyError::NotFound(_) => ErrorCode::ElectivePoolNotFound,
                AcadifyError::Referential(_) | AcadifyError::Validation(_) => {
                    ErrorCode::ElectiveRuleInvalid
                }
                _ => ErrorCode::ElectiveRuleUpdateFailed,
            };
            Ok(error_response(&e, code, "Failed to update elective rule"))
        }
    }
}
