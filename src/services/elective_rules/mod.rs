pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::elective_rules::requests::{
    CreateElectiveRuleRequest, UpdateElectiveRuleRequest,
};
use crate::storage::Storage;

pub struct ElectiveRuleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ElectiveRuleService {
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

    pub async fn create_rule(
        &self,
        request: &HttpRequest,
        program_id: &str,
        rule: CreateElectiveRuleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_rule(self, request, program_id, rule).await
    }

    pub async fn get_rule(
        &self,
        request: &HttpRequest,
        program_id: &str,
        rule_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_rule(self, request, program_id, rule_id).await
    }

    pub async fn list_rules(
        &self,
        request: &HttpRequest,
        program_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::list_rules(self, request, program_id).await
    }

    pub async fn update_rule(
        &self,
        request: &HttpRequest,
        program_id: &str,
        rule_id: &str,
        update: UpdateElectiveRuleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_rule(self, request, program_id, rule_id, update).await
    }

    pub async fn delete_rule(
        &self,
        request: &HttpRequest,
        program_id: &str,
        rule_id: &str,
    ) -> ActixResult<HttpResponse> {
        delete::delete_rule(self, request, program_id, rule_id).await
    }
}
