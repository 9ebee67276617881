use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::programs;
use crate::middlewares;
use crate::models::user_subjects::requests::SaveUserSubjectsRequest;
use crate::services::UserSubjectService;
use crate::utils::SafeProgramId;

// 懒加载的全局 USER_SUBJECT_SERVICE 实例
static USER_SUBJECT_SERVICE: Lazy<UserSubjectService> = Lazy::new(UserSubjectService::new_lazy);

// HTTP处理程序
pub async fn get_my_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SUBJECT_SERVICE.get_progress(&req, None).await
}

pub async fn get_my_program_subjects(
    req: HttpRequest,
    program_id: SafeProgramId,
) -> ActixResult<HttpResponse> {
    USER_SUBJECT_SERVICE
        .get_progress(&req, Some(&program_id.0))
        .await
}

pub async fn save_my_program_subjects(
    req: HttpRequest,
    program_id: SafeProgramId,
    body: web::Json<SaveUserSubjectsRequest>,
) -> ActixResult<HttpResponse> {
    USER_SUBJECT_SERVICE
        .save_progress(&req, &program_id.0, body.into_inner())
        .await
}

// 配置路由：均作用于当前登录用户
pub fn configure_me_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/subjects").route(web::get().to(get_my_subjects)))
            .service(
                web::resource("/subjects/{program_id}")
                    .route(web::get().to(get_my_program_subjects))
                    .route(web::post().to(save_my_program_subjects)),
            )
            .service(web::resource("/programs").route(web::get().to(programs::list_my_programs)))
            .service(
                web::resource("/programs/{program_id}/enroll")
                    .route(web::post().to(programs::enroll))
                    .route(web::delete().to(programs::unenroll)),
            ),
    );
}
