use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::SubmissionService;
use crate::config::AppConfig;
use crate::errors::CourseSysError;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, submissions::entities::Submission};
use crate::services::access;
use crate::utils::{extract_extension, validate_magic_bytes};

/// 作业上传：multipart 里带 `course_id` 文本字段和单个 `file` 文件字段。
/// 只收 PDF，扩展名和魔术字节都要过；校验不通过时落盘的文件会被清理。
pub async fn handle_upload_submission(
    service: &SubmissionService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", CourseSysError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    // 文件相关信息
    let mut course_id_raw = String::new();
    let mut original_name = String::new();
    let mut file_size: i64 = 0;
    let mut file_uploaded = false;
    let mut file_type = String::new();
    let mut stored_name = String::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "course_id" {
            let mut raw = Vec::new();
            while let Some(chunk) = field.next().await {
                raw.extend_from_slice(&chunk?);
            }
            course_id_raw = String::from_utf8_lossy(&raw).trim().to_string();
        } else if name == "file" {
            if file_uploaded {
                cleanup_stored_file(upload_dir, &stored_name);
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                )));
            }
            file_uploaded = true;

            // 先获取原始文件名
            original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 提取扩展名并校验（默认白名单仅 .pdf）
            let extension = extract_extension(&original_name).unwrap_or_default();

            if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "Only PDF submissions are accepted",
                )));
            }

            // MIME 类型仅用于存储记录，不用于校验
            file_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_default();

            stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
            let file_path = format!("{upload_dir}/{stored_name}");
            let mut f = match File::create(&file_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", CourseSysError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件创建失败"),
                    ));
                }
            };

            let mut total_size: usize = 0;
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        let _ = fs::remove_file(&file_path);
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "文件内容与扩展名不匹配",
                        )));
                    }
                }

                total_size += data.len();
                // 校验大小
                if total_size > max_size {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    )));
                }
                f.write_all(&data)?;
            }

            // 零字节文件不会进入循环，魔术字节校验等于没跑过
            if first_chunk {
                let _ = fs::remove_file(&file_path);
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "Empty files are not accepted",
                )));
            }
            file_size = total_size as i64;
        }
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    }

    let Ok(course_id) = course_id_raw.parse::<i64>() else {
        cleanup_stored_file(upload_dir, &stored_name);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Missing or invalid course_id field",
        )));
    };

    let storage = service.get_storage(req);

    let Some(user) = RequireJWT::extract_user_claims(req) else {
        cleanup_stored_file(upload_dir, &stored_name);
        return Ok(
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                "用户未登录",
            )),
        );
    };

    // 提交行挂在学籍档案上，教师/管理员也得先有档案
    let profile = match storage.get_student_profile_by_user_id(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            cleanup_stored_file(upload_dir, &stored_name);
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::StudentProfileMissing,
                "A student profile is required to submit",
            )));
        }
        Err(e) => {
            cleanup_stored_file(upload_dir, &stored_name);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学籍档案失败: {e}"),
                )),
            );
        }
    };

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            cleanup_stored_file(upload_dir, &stored_name);
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            cleanup_stored_file(upload_dir, &stored_name);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    };

    // 学生要有该课程的激活选课记录，教师限本人授课的课程
    let enrollment = match storage.get_enrollment(profile.id, course.id).await {
        Ok(enrollment) => enrollment,
        Err(e) => {
            cleanup_stored_file(upload_dir, &stored_name);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询选课记录失败: {e}"),
                )),
            );
        }
    };

    if let access::AccessDecision::Denied(reason) =
        access::can_submit_to_course(&user, &course, enrollment.as_ref())
    {
        cleanup_stored_file(upload_dir, &stored_name);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseNotEligible,
            reason,
        )));
    }

    // 记录文件并创建提交
    let download_token = Uuid::new_v4().to_string();
    if let Err(e) = storage
        .create_file(
            &download_token,
            &original_name,
            &stored_name,
            file_size,
            &file_type,
            user.id,
        )
        .await
    {
        cleanup_stored_file(upload_dir, &stored_name);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("Failed to record uploaded file: {e}"),
            )),
        );
    }

    let submission: Submission = match storage
        .create_submission(profile.id, course.id, &download_token)
        .await
    {
        Ok(submission) => submission,
        Err(e) => {
            cleanup_stored_file(upload_dir, &stored_name);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionFailed,
                    format!("Failed to create submission: {e}"),
                )),
            );
        }
    };

    tracing::info!(
        "Submission {} created: student {} course {}",
        submission.id,
        profile.id,
        course.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(submission, "Submission created")))
}

fn cleanup_stored_file(upload_dir: &str, stored_name: &str) {
    if !stored_name.is_empty() {
        let _ = fs::remove_file(format!("{upload_dir}/{stored_name}"));
    }
}
