use actix_web::{HttpRequest, HttpResponse, error::Error};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一错误响应
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("请求体解析失败: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            message,
        )),
    )
    .into()
}

/// 查询参数解析失败时返回统一错误响应
pub fn query_error_handler(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("查询参数解析失败: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            message,
        )),
    )
    .into()
}
