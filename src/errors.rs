//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_coursesys_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseSysError {
            $($variant(String),)*
        }

        impl CourseSysError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseSysError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseSysError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseSysError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseSysError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseSysError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_coursesys_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    ProfileMissing("E011", "Student Profile Missing"),
    Notification("E012", "Notification Error"),
}

impl CourseSysError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CourseSysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseSysError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseSysError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseSysError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseSysError {
    fn from(err: std::io::Error) -> Self {
        CourseSysError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseSysError {
    fn from(err: serde_json::Error) -> Self {
        CourseSysError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseSysError {
    fn from(err: chrono::ParseError) -> Self {
        CourseSysError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseSysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseSysError::database_config("test").code(), "E001");
        assert_eq!(CourseSysError::validation("test").code(), "E005");
        assert_eq!(CourseSysError::authorization("test").code(), "E010");
        assert_eq!(CourseSysError::profile_missing("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseSysError::profile_missing("test").error_type(),
            "Student Profile Missing"
        );
        assert_eq!(
            CourseSysError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CourseSysError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = CourseSysError::not_found("Course 42 not found");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Course 42 not found"));
    }
}
