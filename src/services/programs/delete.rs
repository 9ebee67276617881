use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProgramService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_program(
    service: &ProgramService,
    request: &HttpRequest,
    program_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_program(program_id).await {
        Ok(true) => {
            info!("Degree program {} deleted", program_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Degree program deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProgramNotFound,
            "Degree program not found",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ProgramDeleteFailed,
            "Failed to delete degree program",
        )),
    }
}
