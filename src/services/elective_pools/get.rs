use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ElectivePoolService;
use crate::models::elective_pools::responses::ElectivePoolListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_pool(
    service: &ElectivePoolService,
    request: &HttpRequest,
    program_id: &str,
    pool_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_elective_pool(program_id, pool_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Elective pool retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ElectivePoolNotFound,
            "Elective pool not found",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to load elective pool",
        )),
    }
}

pub async fn list_pools(
    service: &ElectivePoolService,
    request: &HttpRequest,
    program_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_elective_pools(program_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ElectivePoolListResponse { items },
            "Elective pools retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to list elective pools",
        )),
    }
}
