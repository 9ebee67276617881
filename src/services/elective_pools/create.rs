use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ElectivePoolService;
use crate::errors::AcadifyError;
use crate::models::elective_pools::requests::CreateElectivePoolRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn create_pool(
    service: &ElectivePoolService,
    request: &HttpRequest,
    program_id: &str,
    pool: CreateElectivePoolRequest,
) -> ActixResult<HttpResponse> {
    let pool = match pool.normalized() {
        Ok(p) => p,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())));
        }
    };

    let storage = service.get_storage(request);
    match storage.create_elective_pool(program_id, pool).await {
        Ok(pool) => {
            info!("Elective pool {} created in program {}", pool.id, program_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(pool, "Elective pool created successfully")))
        }
        Err(e @ AcadifyError::NotFound(_)) => Ok(error_response(
            &e,
            ErrorCode::ProgramNotFound,
            "Failed to create elective pool",
        )),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ElectivePoolCreationFailed,
            "Failed to create elective pool",
        )),
    }
}
