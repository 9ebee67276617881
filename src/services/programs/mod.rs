pub mod create;
pub mod delete;
pub mod enrollment;
pub mod get;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::programs::requests::CreateProgramRequest;
use crate::storage::Storage;

pub struct ProgramService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProgramService {
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

    pub async fn create_program(
        &self,
        request: &HttpRequest,
        program: CreateProgramRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_program(self, request, program).await
    }

    // 学位项目详情（含科目数量）
    pub async fn get_program(
        &self,
        request: &HttpRequest,
        program_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_program(self, request, program_id).await
    }

    pub async fn delete_program(
        &self,
        request: &HttpRequest,
        program_id: &str,
    ) -> ActixResult<HttpResponse> {
        delete::delete_program(self, request, program_id).await
    }

    // 当前用户注册的学位项目
    pub async fn list_my_programs(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enrollment::list_my_programs(self, request).await
    }

    pub async fn enroll(
        &self,
        request: &HttpRequest,
        program_id: &str,
    ) -> ActixResult<HttpResponse> {
        enrollment::enroll(self, request, program_id).await
    }

    pub async fn unenroll(
        &self,
        request: &HttpRequest,
        program_id: &str,
    ) -> ActixResult<HttpResponse> {
        enrollment::unenroll(self, request, program_id).await
    }
}
