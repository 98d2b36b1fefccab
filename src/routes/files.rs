use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::FileService;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn download_file(
    req: HttpRequest,
    file_token: web::Path<String>,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE
        .handle_download(&req, file_token.into_inner())
        .await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            .route("/{file_token}", web::get().to(download_file)),
    );
}
