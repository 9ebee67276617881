use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ElectivePoolService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_pool(
    service: &ElectivePoolService,
    request: &HttpRequest,
    program_id: &str,
    pool_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_elective_pool(program_id, pool_id).await {
        Ok(true) => {
            info!("Elective pool {} deleted from program {}", pool_id, program_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Elective pool deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ElectivePoolNotFound,
            "Elective pool not found",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ElectivePoolDeleteFailed,
            "Failed to delete elective pool",
        )),
    }
}
