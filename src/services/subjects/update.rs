use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::AcadifyError;
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
    update: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let changes = match update.validate() {
        Ok(c) => c,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())));
        }
    };

    let storage = service.get_storage(request);
    match storage.update_subject(subject_id, changes).await {
        Ok(Some(detail)) => {
            info!("Subject {} updated", subject_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Subject updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => {
            let code = match e {
                AcadifyError::Referential(_) | AcadifyError::Validation(_) => {
                    ErrorCode::SubjectRequirementInvalid
                }
                _ => ErrorCode::SubjectUpdateFailed,
            };
            Ok(error_response(&e, code, "Failed to update subject"))
        }
    }
}
