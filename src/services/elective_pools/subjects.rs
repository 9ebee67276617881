use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ElectivePoolService;
use crate::errors::AcadifyError;
use crate::models::elective_pools::requests::AddPoolSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn add_subject(
    service: &ElectivePoolService,
    request: &HttpRequest,
    program_id: &str,
    pool_id: &str,
    body: AddPoolSubjectRequest,
) -> ActixResult<HttpResponse> {
    let subject_id = match body.subject_id() {
        Ok(id) => id,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())));
        }
    };

    let storage = service.get_storage(request);
    match storage
        .add_subject_to_pool(program_id, pool_id, &subject_id)
        .await
    {
        Ok(link) => {
            info!("Subject {} added to elective pool {}", subject_id, pool_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(link, "Subject added to elective pool")))
        }
        Err(e) => {
            let code = match &e {
                AcadifyError::NotFound(msg) if msg.starts_with("Subject") => {
                    ErrorCode::SubjectNotFound
                }
                AcadifyError::NotFound(_) => ErrorCode::ElectivePoolNotFound,
                AcadifyError::Conflict(_) => ErrorCode::ElectivePoolSubjectExists,
                _ => ErrorCode::ElectivePoolUpdateFailed,
            };
            Ok(error_response(&e, code, "Failed to add subject to elective pool"))
        }
    }
}

pub async fn remove_subject(
    service: &ElectivePoolService,
    request: &HttpRequest,
    program_id: &str,
    pool_id: &str,
    subject_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .remove_subject_from_pool(program_id, pool_id, subject_id)
        .await
    {
        Ok(true) => {
            info!("Subject {} removed from elective pool {}", subject_id, pool_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Subject removed from elective pool",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ElectivePoolSubjectNotFound,
            "Subject is not in this elective pool",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ElectivePoolUpdateFailed,
            "Failed to remove subject from elective pool",
        )),
    }
}
