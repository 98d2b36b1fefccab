pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 课程列表（公开）
    pub async fn list_courses(
        &self,
        query: crate::models::courses::requests::CourseQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_courses(self, query, request).await
    }

    // 课程详情（公开，登录者附带 is_enrolled）
    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_course(self, course_id, request).await
    }

    // 创建课程（教师/管理员）
    pub async fn create_course(
        &self,
        create_request: crate::models::courses::requests::CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_course(self, create_request, request).await
    }
}

/// 公开路由上的可选登录态：有合法 access token 就加载用户，否则按匿名处理
pub(crate) async fn optional_user(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Option<User> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))?;

    let claims = JwtUtils::verify_access_token(token).ok()?;
    let user_id = claims.sub.parse::<i64>().ok()?;
    storage.get_user_by_id(user_id).await.ok().flatten()
}
