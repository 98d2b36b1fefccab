use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CourseQueryParams, CreateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::services::{CourseService, EnrollmentService};

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, course_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn toggle_enrollment(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .toggle_enrollment(course_id.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .service(
                web::resource("")
                    // 课程列表公开
                    .route(web::get().to(list_courses))
                    .route(
                        web::post()
                            .to(create_course)
                            // 教师/管理员创建课程，创建者即授课教师
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                // 课程详情公开，登录者附带 is_enrolled
                web::resource("/{course_id}").route(web::get().to(get_course)),
            )
            .service(
                web::resource("/{course_id}/enroll").route(
                    web::post()
                        .to(toggle_enrollment)
                        // 选课开关需登录，角色判断在服务层
                        .wrap(middlewares::RequireJWT),
                ),
            ),
    );
}
