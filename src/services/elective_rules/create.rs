use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ElectiveRuleService;
use crate::errors::AcadifyError;
use crate::models::elective_rules::requests::CreateElectiveRuleRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn create_rule(
    service: &ElectiveRuleService,
    request: &HttpRequest,
    program_id: &str,
    rule: CreateElectiveRuleRequest,
) -> ActixResult<HttpResponse> {
    let fields = match rule.validate() {
        Ok(f) => f,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ElectiveRuleInvalid, e.message())));
        }
    };

    let storage = service.get_storage(request);
    match storage.create_elective_rule(program_id, fields).await {
        Ok(detail) => {
            info!(
                "Elective rule {} created for pool {} in program {}",
                detail.rule.id, detail.pool.id, program_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(detail, "Elective rule created successfully")))
        }
        Err(e) => {
            let code = match &e {
                AcadifyError::NotFound(msg) if msg.starts_with("Degree") => {
                    ErrorCode::ProgramNotFound
                }
                AcadifyError::NotFound(_) => ErrorCode::ElectivePoolNotFound,
                AcadifyError::Referential(_) | AcadifyError::Validation(_) => {
                    ErrorCode::ElectiveRuleInvalid
                }
                _ => ErrorCode::ElectiveRuleCreationFailed,
            };
            Ok(error_response(&e, code, "Failed to create elective rule"))
        }
    }
}
