use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProgramService;
use crate::errors::AcadifyError;
use crate::models::programs::responses::ProgramListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user_id, error_response};

pub async fn list_my_programs(
    service: &ProgramService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_user_programs(&user_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProgramListResponse { items },
            "Degree programs retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to list degree programs",
        )),
    }
}

pub async fn enroll(
    service: &ProgramService,
    request: &HttpRequest,
    program_id: &str,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.enroll_user(&user_id, program_id).await {
        Ok(enrollment) => {
            info!("User {} enrolled in program {}", user_id, program_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(enrollment, "Enrolled successfully")))
        }
        Err(e @ AcadifyError::NotFound(_)) => {
            Ok(error_response(&e, ErrorCode::ProgramNotFound, "Failed to enroll"))
        }
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ProgramAlreadyEnrolled,
            "Failed to enroll",
        )),
    }
}

pub async fn unenroll(
    service: &ProgramService,
    request: &HttpRequest,
    program_id: &str,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.unenroll_user(&user_id, program_id).await {
        Ok(true) => {
            info!("User {} left program {}", user_id, program_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Unenrolled successfully")))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ProgramNotEnrolled,
            "Not enrolled in this program",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to unenroll",
        )),
    }
}
