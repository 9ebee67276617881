use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ElectivePoolService;
use crate::models::elective_pools::requests::UpdateElectivePoolRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn update_pool(
    service: &ElectivePoolService,
    request: &HttpRequest,
    program_id: &str,
    pool_id: &str,
    update: UpdateElectivePoolRequest,
) -> ActixResult<HttpResponse> {
    let update = match update.normalized() {
        Ok(u) => u,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())));
        }
    };

    let storage = service.get_storage(request);
    match storage.update_elective_pool(program_id, pool_id, update).await {
        Ok(Some(pool)) => {
            info!("Elective pool {} updated", pool_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(pool, "Elective pool updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ElectivePoolNotFound,
            "Elective pool not found",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::ElectivePoolUpdateFailed,
            "Failed to update elective pool",
        )),
    }
}
