pub mod get;
pub mod locks;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::user_subjects::requests::SaveUserSubjectsRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

pub struct UserSubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserSubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 当前学生在某学位项目下的科目进度
    ///
    /// 未指定项目时使用最早注册的项目。
    pub async fn get_progress(
        &self,
        request: &HttpRequest,
        program_id: Option<&str>,
    ) -> ActixResult<HttpResponse> {
        get::get_progress(self, request, program_id).await
    }

    /// 用整份提交替换当前学生在某学位项目下的科目进度
    pub async fn save_progress(
        &self,
        request: &HttpRequest,
        program_id: &str,
        body: SaveUserSubjectsRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_progress(self, request, program_id, body).await
    }
}

/// 注册校验：未注册返回 403
pub(crate) async fn ensure_enrolled(
    storage: &Arc<dyn Storage>,
    user_id: &str,
    program_id: &str,
) -> Result<(), HttpResponse> {
    match storage.is_user_enrolled(user_id, program_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ProgramNotEnrolled,
            "You are not enrolled in this program",
        ))),
        Err(e) => Err(error_response(
            &e,
            ErrorCode::InternalServerError,
            "Failed to check enrollment",
        )),
    }
}
