use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::locks::SyncLockRegistry;
use super::{UserSubjectService, ensure_enrolled};
use crate::config::AppConfig;
use crate::models::user_subjects::requests::SaveUserSubjectsRequest;
use crate::models::user_subjects::responses::SaveUserSubjectsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user_id, error_response};

pub async fn save_progress(
    service: &UserSubjectService,
    request: &HttpRequest,
    program_id: &str,
    body: SaveUserSubjectsRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_enrolled(&storage, &user_id, program_id).await {
        return Ok(resp);
    }

    let program_subjects: HashSet<String> =
        match storage.list_program_subject_ids(program_id).await {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                return Ok(error_response(
                    &e,
                    ErrorCode::ProgressSyncFailed,
                    "Failed to save progress",
                ));
            }
        };

    let max_entries = AppConfig::get().catalog.max_sync_entries;
    let updates = match body.validate(&program_subjects, max_entries) {
        Ok(updates) => updates,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ProgressEntryInvalid,
                e.message(),
            )));
        }
    };

    // 写入放到独立任务中执行，客户端断开也不会中途放弃事务
    let task = {
        let user_id = user_id.clone();
        let program_id = program_id.to_string();
        tokio::spawn(async move {
            let registry = SyncLockRegistry::get();
            let guard = registry.acquire(&user_id, &program_id).await;
            let result = storage
                .sync_user_subjects(&user_id, &program_id, updates)
                .await;
            drop(guard);
            registry.release(&user_id, &program_id);
            result
        })
    };

    match task.await {
        Ok(Ok(outcome)) => {
            info!(
                "Progress saved for user {} in program {}: {} upserted, {} pruned",
                user_id, program_id, outcome.upserted, outcome.pruned
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SaveUserSubjectsResponse { ok: true },
                "Progress saved successfully",
            )))
        }
        Ok(Err(e)) => Ok(error_response(
            &e,
            ErrorCode::ProgressSyncFailed,
            "Failed to save progress",
        )),
        Err(e) => {
            error!("Progress sync task failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Failed to save progress: internal server error",
            )))
        }
    }
}
