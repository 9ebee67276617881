pub mod create;
pub mod delete;
pub mod get;
pub mod subjects;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::elective_pools::requests::{
    AddPoolSubjectRequest, CreateElectivePoolRequest, UpdateElectivePoolRequest,
};
use crate::storage::Storage;

pub struct ElectivePoolService {
    storage: Option<Arc<dyn Storage>>,
}

impl ElectivePoolService {
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

    pub async fn create_pool(
        &self,
        request: &HttpRequest,
        program_id: &str,
        pool: CreateElectivePoolRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_pool(self, request, program_id, pool).await
    }

    pub async fn get_pool(
        &self,
        request: &HttpRequest,
        program_id: &str,
        pool_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_pool(self, request, program_id, pool_id).await
    }

    pub async fn list_pools(
        &self,
        request: &HttpRequest,
        program_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::list_pools(self, request, program_id).await
    }

    pub async fn update_pool(
        &self,
        request: &HttpRequest,
        program_id: &str,
        pool_id: &str,
        update: UpdateElectivePoolRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_pool(self, request, program_id, pool_id, update).await
    }

    pub async fn delete_pool(
        &self,
        request: &HttpRequest,
        program_id: &str,
        pool_id: &str,
    ) -> ActixResult<HttpResponse> {
        delete::delete_pool(self, request, program_id, pool_id).await
    }

    // 选修池成员管理
    pub async fn add_subject(
        &self,
        request: &HttpRequest,
        program_id: &str,
        pool_id: &str,
        body: AddPoolSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::add_subject(self, request, program_id, pool_id, body).await
    }

    pub async fn remove_subject(
        &self,
        request: &HttpRequest,
        program_id: &str,
        pool_id: &str,
        subject_id: &str,
    ) -> ActixResult<HttpResponse> {
        subjects::remove_subject(self, request, program_id, pool_id, subject_id).await
    }
}
