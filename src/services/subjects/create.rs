use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::AcadifyError;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let subject = match subject.validate() {
        Ok(s) => s,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())));
        }
    };

    let storage = service.get_storage(request);
    match storage.create_subject(subject).await {
        Ok(detail) => {
            info!(
                "Subject {} ({}) created in program {} with {} requirements",
                detail.subject.name,
                detail.subject.id,
                detail.subject.degree_program_id,
                detail.requirements.len()
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(detail, "Subject created successfully")))
        }
        Err(e) => {
            let code = match e {
                AcadifyError::Referential(_) | AcadifyError::Validation(_) => {
                    ErrorCode::SubjectRequirementInvalid
                }
                _ => ErrorCode::SubjectCreationFailed,
            };
            Ok(error_response(&e, code, "Failed to create subject"))
        }
    }
}
