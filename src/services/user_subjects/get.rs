use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserSubjectService, ensure_enrolled};
use crate::models::user_subjects::responses::ProgramProgressResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user_id, error_response};

pub async fn get_progress(
    service: &UserSubjectService,
    request: &HttpRequest,
    program_id: Option<&str>,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let program_id = match program_id {
        Some(id) => id.to_string(),
        None => match storage.list_user_programs(&user_id).await {
            Ok(programs) => match programs.into_iter().next() {
                Some(program) => program.id,
                None => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::ProgramNotSelected,
                        "User has no degree programs",
                    )));
                }
            },
            Err(e) => {
                return Ok(error_response(
                    &e,
                    ErrorCode::ProgressLoadFailed,
                    "Failed to load degree programs",
                ));
            }
        },
    };

    // 注册检查先于课程查询，与同步接口一致
    if let Err(resp) = ensure_enrolled(&storage, &user_id, &program_id).await {
        return Ok(resp);
    }

    let program = match storage.get_program_by_id(&program_id).await {
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
                ErrorCode::ProgressLoadFailed,
                "Failed to load degree program",
            ));
        }
    };

    let subjects = match storage.list_subjects_by_program(&program_id).await {
        Ok(subjects) => subjects,
        Err(e) => {
            return Ok(error_response(
                &e,
                ErrorCode::ProgressLoadFailed,
                "Failed to load subjects",
            ));
        }
    };

    let progress = match storage
        .list_user_subjects_in_program(&user_id, &program_id)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return Ok(error_response(
                &e,
                ErrorCode::ProgressLoadFailed,
                "Failed to load progress",
            ));
        }
    };

    let subject_ids: Vec<String> = subjects.iter().map(|s| s.id.clone()).collect();
    let edges = match storage.list_requirements_for_subjects(&subject_ids).await {
        Ok(edges) => edges,
        Err(e) => {
            return Ok(error_response(
                &e,
                ErrorCode::ProgressLoadFailed,
                "Failed to load requirements",
            ));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ProgramProgressResponse::assemble(program, subjects, progress, edges),
        "Progress retrieved successfully",
    )))
}
