use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::elective_rules::requests::{
    CreateElectiveRuleRequest, UpdateElectiveRuleRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ElectiveRuleService;
use crate::utils::{SafeProgramId, SafeRuleId};

// 懒加载的全局 ELECTIVE_RULE_SERVICE 实例
static ELECTIVE_RULE_SERVICE: Lazy<ElectiveRuleService> =
    Lazy::new(ElectiveRuleService::new_lazy);

// HTTP处理程序
pub async fn list_rules(req: HttpRequest, program_id: SafeProgramId) -> ActixResult<HttpResponse> {
    ELECTIVE_RULE_SERVICE.list_rules(&req, &program_id.0).await
}

pub async fn create_rule(
    req: HttpRequest,
    program_id: SafeProgramId,
    rule: web::Json<CreateElectiveRuleRequest>,
) -> ActixResult<HttpResponse> {
    ELECTIVE_RULE_SERVICE
        .create_rule(&req, &program_id.0, rule.into_inner())
        .await
}

pub async fn get_rule(
    req: HttpRequest,
    program_id: SafeProgramId,
    rule_id: SafeRuleId,
) -> ActixResult<HttpResponse> {
    ELECTIVE_RULE_SERVICE
        .get_rule(&req, &program_id.0, &rule_id.0)
        .await
}

pub async fn update_rule(
    req: HttpRequest,
    program_id: SafeProgramId,
    rule_id: SafeRuleId,
    update: web::Json<UpdateElectiveRuleRequest>,
) -> ActixResult<HttpResponse> {
    ELECTIVE_RULE_SERVICE
        .update_rule(&req, &program_id.0, &rule_id.0, update.into_inner())
        .await
}

pub async fn delete_rule(
    req: HttpRequest,
    program_id: SafeProgramId,
    rule_id: SafeRuleId,
) -> ActixResult<HttpResponse> {
    ELECTIVE_RULE_SERVICE
        .delete_rule(&req, &program_id.0, &rule_id.0)
        .await
}

// 配置路由（挂在 /api/v1/programs 作用域下）
pub fn configure_elective_rules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{program_id}/elective-rules")
            .route(web::get().to(list_rules))
            .route(
                web::post()
                    .to(create_rule)
                    .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
            ),
    )
    .service(
        web::resource("/{program_id}/elective-rules/{rule_id}")
            .route(web::get().to(get_rule))
            .route(
                web::put()
                    .to(update_rule)
                    .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
            )
            .route(
                web::delete()
                    .to(delete_rule)
                    .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
            ),
    );
}
