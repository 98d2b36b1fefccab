use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::ManualEnrollRequest;
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_my_enrollments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_my_enrollments(&req).await
}

pub async fn manual_enroll(
    req: HttpRequest,
    enroll_data: web::Json<ManualEnrollRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .manual_enroll(enroll_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 本人的选课列表
                    .route(web::get().to(list_my_enrollments))
                    .route(
                        web::post()
                            .to(manual_enroll)
                            // 教务按学号手动选课
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
