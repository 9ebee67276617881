use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProgramService;
use crate::models::programs::requests::CreateProgramRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn create_program(
    service: &ProgramService,
    request: &HttpRequest,
    program: CreateProgramRequest,
) -> ActixResult<HttpResponse> {
    let program = match program.normalized() {
        Ok(p) => p,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())));
        }
    };

    let storage = service.get_storage(request);
    match storage.create_program(program).await {
        Ok(program) => {
            info!("Degree program {} ({}) created", program.name, program.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(program, "Degree program created successfully")))
        }
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ProgramCreationFailed,
            "Failed to create degree program",
        )),
    }
}
