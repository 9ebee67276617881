use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{elective_pools, elective_rules, subjects};
use crate::middlewares;
use crate::models::programs::requests::CreateProgramRequest;
use crate::models::users::entities::UserRole;
use crate::services::ProgramService;
use crate::utils::SafeProgramId;

// 懒加载的全局 PROGRAM_SERVICE 实例
static PROGRAM_SERVICE: Lazy<ProgramService> = Lazy::new(ProgramService::new_lazy);

// HTTP处理程序
pub async fn create_program(
    req: HttpRequest,
    program: web::Json<CreateProgramRequest>,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE
        .create_program(&req, program.into_inner())
        .await
}

pub async fn get_program(req: HttpRequest, program_id: SafeProgramId) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.get_program(&req, &program_id.0).await
}

pub async fn delete_program(
    req: HttpRequest,
    program_id: SafeProgramId,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.delete_program(&req, &program_id.0).await
}

// 当前用户的学位项目注册
pub async fn list_my_programs(req: HttpRequest) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.list_my_programs(&req).await
}

pub async fn enroll(req: HttpRequest, program_id: SafeProgramId) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.enroll(&req, &program_id.0).await
}

pub async fn unenroll(req: HttpRequest, program_id: SafeProgramId) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.unenroll(&req, &program_id.0).await
}

// 配置路由
pub fn configure_programs_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/programs")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_program)
                        // 教务人员与管理员维护课程目录
                        .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
                ),
            )
            .service(
                web::resource("/{program_id}")
                    .route(web::get().to(get_program))
                    .route(
                        web::delete()
                            .to(delete_program)
                            .wrap(middlewares::RequireRole::new_any(UserRole::catalog_roles())),
                    ),
            )
            .service(
                web::resource("/{program_id}/subjects")
                    .route(web::get().to(subjects::list_program_subjects)),
            )
            // 项目下的选修池与选修规则
            .configure(elective_pools::configure_elective_pools_routes)
            .configure(elective_rules::configure_elective_rules_routes),
    );
}
