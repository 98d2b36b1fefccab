//! 邮件通知
//!
//! 尽力而为的 SMTP 通知：发送在独立任务里进行，失败只记日志，
//! 绝不影响触发它的业务操作。由业务代码在状态变更成功后显式调用。

use std::sync::OnceLock;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::CourseSysError;
use crate::models::users::entities::User;

pub struct Notifier;

impl Notifier {
    fn mailer() -> Option<&'static AsyncSmtpTransport<Tokio1Executor>> {
        static MAILER: OnceLock<Option<AsyncSmtpTransport<Tokio1Executor>>> = OnceLock::new();
        MAILER
            .get_or_init(|| {
                let smtp = &AppConfig::get().smtp;
                if !smtp.enabled {
                    return None;
                }
                let credentials =
                    Credentials::new(smtp.username.clone(), smtp.password.clone());
                match AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host) {
                    Ok(builder) => Some(builder.port(smtp.port).credentials(credentials).build()),
                    Err(e) => {
                        warn!(
                            "{}",
                            CourseSysError::notification(format!("SMTP 传输初始化失败: {e}"))
                        );
                        None
                    }
                }
            })
            .as_ref()
    }

    /// 注册成功后的欢迎邮件
    pub fn send_welcome(user: &User) {
        let to = user.email.clone();
        let subject = "Welcome to the course portal".to_string();
        let body = format!(
            "Hi {},\n\nYour account has been created. You can now browse courses and enroll.\n",
            user.display_or_username()
        );
        tokio::spawn(Self::deliver(to, subject, body));
    }

    /// 评分完成后的通知邮件（重新评分同样触发，一次评分一封）
    pub fn send_graded(
        to: String,
        student_name: String,
        course_title: String,
        grade: String,
        feedback: Option<String>,
    ) {
        let subject = format!("Your submission for '{course_title}' has been graded");
        let body = graded_body(&student_name, &course_title, &grade, feedback.as_deref());
        tokio::spawn(Self::deliver(to, subject, body));
    }

    async fn deliver(to: String, subject: String, body: String) {
        let Some(mailer) = Self::mailer() else {
            debug!("SMTP 未启用，跳过邮件: {} -> {}", subject, to);
            return;
        };

        let smtp = &AppConfig::get().smtp;
        let message = match Message::builder()
            .from(match smtp.from_address.parse() {
                Ok(addr) => addr,
                Err(e) => {
                    warn!(
                        "{}",
                        CourseSysError::notification(format!("发件地址无效: {e}"))
                    );
                    return;
                }
            })
            .to(match to.parse() {
                Ok(addr) => addr,
                Err(e) => {
                    warn!(
                        "{}",
                        CourseSysError::notification(format!("收件地址无效 ({to}): {e}"))
                    );
                    return;
                }
            })
            .subject(&subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
        {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    "{}",
                    CourseSysError::notification(format!("构建邮件失败: {e}"))
                );
                return;
            }
        };

        match mailer.send(message).await {
            Ok(_) => info!("邮件已发送: {} -> {}", subject, to),
            Err(e) => warn!(
                "{}",
                CourseSysError::notification(format!("邮件发送失败 ({to}): {e}"))
            ),
        }
    }
}

/// 评分通知正文；未填评语时用占位文案
fn graded_body(
    student_name: &str,
    course_title: &str,
    grade: &str,
    feedback: Option<&str>,
) -> String {
    let feedback = feedback
        .filter(|f| !f.is_empty())
        .unwrap_or("No feedback provided.");
    format!(
        "Hi {student_name},\n\nYour submission for '{course_title}' has been graded: \
         {grade}.\n\nFeedback:\n{feedback}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::graded_body;

    #[test]
    fn test_graded_body_includes_feedback() {
        let body = graded_body("alice", "Algorithms", "A", Some("Well structured."));
        assert!(body.contains("graded: A"));
        assert!(body.contains("Feedback:\nWell structured."));
    }

    #[test]
    fn test_graded_body_feedback_fallback() {
        let omitted = graded_body("alice", "Algorithms", "B", None);
        assert!(omitted.contains("Feedback:\nNo feedback provided."));

        // 空评语与未填等同
        let empty = graded_body("alice", "Algorithms", "B", Some(""));
        assert!(empty.contains("Feedback:\nNo feedback provided."));
    }
}
