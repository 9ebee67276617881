use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest};
use crate::models::users::entities::UserRole;
use crate::services::SubjectService;
use crate::utils::{SafeProgramId, SafeSubjectId};

// 懒加载的全局 SUBJECT_SERVICE 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

// HTTP处理程序
pub async fn create_subject(
    req: HttpRequest,
    subject: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(&req, subject.into_inner())
        .await
}

pub async fn list_program_subjects(
    req: HttpRequest,
    program_id: SafeProgramId,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .list_program_subjects(&req, &program_id.0)
        .await
}

pub async fn get_subject(req: HttpRequest, subject_id: SafeSubjectId) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(&req, &subject_id.0).await
}

pub async fn update_subject(
    req: HttpRequest,
    subject_id: SafeSubjectId,
    update: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&req, &subject_id.0, update.into_inner())
        .await
}

pub async fn delete_subject(
    req: HttpRequest,
    subject_id: SafeSubjectId,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, &subject_id.0).await
}

// 配置路由
pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_subject)
                        .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
                ),
            )
            .service(
                web::resource("/{subject_id}")
                    .route(web::get().to(get_subject))
                    .route(
                        web::put()
                            .to(update_subject)
                            // requirements 给出时整体替换先修关系
                            .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_subject)
                            .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
                    ),
            ),
    );
}
