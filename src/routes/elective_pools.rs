use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::elective_pools::requests::{
    AddPoolSubjectRequest, CreateElectivePoolRequest, UpdateElectivePoolRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ElectivePoolService;
use crate::utils::{SafePoolId, SafeProgramId, SafeSubjectId};

// 懒加载的全局 ELECTIVE_POOL_SERVICE 实例
static ELECTIVE_POOL_SERVICE: Lazy<ElectivePoolService> =
    Lazy::new(ElectivePoolService::new_lazy);

// HTTP处理程序
pub async fn list_pools(req: HttpRequest, program_id: SafeProgramId) -> ActixResult<HttpResponse> {
    ELECTIVE_POOL_SERVICE.list_pools(&req, &program_id.0).await
}

pub async fn create_pool(
    req: HttpRequest,
    program_id: SafeProgramId,
    pool: web::Json<CreateElectivePoolRequest>,
) -> ActixResult<HttpResponse> {
    ELECTIVE_POOL_SERVICE
        .create_pool(&req, &program_id.0, pool.into_inner())
        .await
}

pub async fn get_pool(
    req: HttpRequest,
    program_id: SafeProgramId,
    pool_id: SafePoolId,
) -> ActixResult<HttpResponse> {
    ELECTIVE_POOL_SERVICE
        .get_pool(&req, &program_id.0, &pool_id.0)
        .await
}

pub async fn update_pool(
    req: HttpRequest,
    program_id: SafeProgramId,
    pool_id: SafePoolId,
    update: web::Json<UpdateElectivePoolRequest>,
) -> ActixResult<HttpResponse> {
    ELECTIVE_POOL_SERVICE
        .update_pool(&req, &program_id.0, &pool_id.0, update.into_inner())
        .await
}

pub async fn delete_pool(
    req: HttpRequest,
    program_id: SafeProgramId,
    pool_id: SafePoolId,
) -> ActixResult<HttpResponse> {
    ELECTIVE_POOL_SERVICE
        .delete_pool(&req, &program_id.0, &pool_id.0)
        .await
}

pub async fn add_pool_subject(
    req: HttpRequest,
    program_id: SafeProgramId,
    pool_id: SafePoolId,
    body: web::Json<AddPoolSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ELECTIVE_POOL_SERVICE
        .add_subject(&req, &program_id.0, &pool_id.0, body.into_inner())
        .await
}

pub async fn remove_pool_subject(
    req: HttpRequest,
    program_id: SafeProgramId,
    pool_id: SafePoolId,
    subject_id: SafeSubjectId,
) -> ActixResult<HttpResponse> {
    ELECTIVE_POOL_SERVICE
        .remove_subject(&req, &program_id.0, &pool_id.0, &subject_id.0)
        .await
}

// 配置路由（挂在 /api/v1/programs 作用域下）
pub fn configure_elective_pools_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{program_id}/elective-pools")
            .route(web::get().to(list_pools))
            .route(
                web::post()
                    .to(create_pool)
                    .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
            ),
    )
    .service(
        web::resource("/{program_id}/elective-pools/{pool_id}")
            .route(web::get().to(get_pool))
            .route(
                web::put()
                    .to(update_pool)
                    .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
            )
            .route(
                web::delete()
                    .to(delete_pool)
                    .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
            ),
    )
    .service(
        web::resource("/{program_id}/elective-pools/{pool_id}/subjects").route(
            web::post()
                .to(add_pool_subject)
                .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
        ),
    )
    .service(
        web::resource("/{program_id}/elective-pools/{pool_id}/subjects/{subject_id}").route(
            web::delete()
                .to(remove_pool_subject)
                .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
        ),
    );
}
