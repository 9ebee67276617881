use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProgramService;
use crate::models::programs::responses::ProgramDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_program(
    service: &ProgramService,
    request: &HttpRequest,
    program_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let program = match storage.get_program_by_id(program_id).await {
        Ok(Some(program)) => program,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProgramNotFound,
                "Degree program not found",
            )));
        }
        Err(e) => {
            return Ok(error_response(
                &e,
                ErrorCode::InternalServerError,
                "Failed to load degree program",
            ));
        }
    };

    match storage.count_program_subjects(program_id).await {
        Ok(subject_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProgramDetailResponse {
                program,
                subject_count,
            },
            "Degree program retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to count program subjects",
        )),
    }
}
