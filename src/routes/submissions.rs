use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{GradeSubmissionRequest, SubmissionQueryParams};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn upload_submission(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.upload_submission(&req, payload).await
}

pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionQueryParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(query.into_inner(), &req)
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(submission_id.into_inner(), &req)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: web::Path<i64>,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(submission_id.into_inner(), grade_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表按调用者角色收窄范围
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(upload_submission)),
            )
            .service(web::resource("/{submission_id}").route(web::get().to(get_submission)))
            .service(
                // 评分权限全部交给服务层判断：授课人可能不是教师账户
                web::resource("/{submission_id}/grade").route(web::post().to(grade_submission)),
            ),
    );
}
