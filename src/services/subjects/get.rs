use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::responses::SubjectListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject(subject_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(detail, "Subject retrieved successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to load subject",
        )),
    }
}

pub async fn list_program_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    program_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 项目不存在时返回 404，而不是空列表
    match storage.get_program_by_id(program_id).await {
        Ok(Some(_)) => {}
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
    }

    match storage.list_program_subjects(program_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectListResponse { items },
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to list subjects",
        )),
    }
}
