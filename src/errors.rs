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
macro_rules! define_acadify_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AcadifyError {
            $($variant(String),)*
        }

        impl AcadifyError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AcadifyError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AcadifyError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AcadifyError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AcadifyError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AcadifyError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_acadify_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    Referential("E005", "Referential Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Conflict Error"),
    Serialization("E008", "Serialization Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl AcadifyError {
    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            AcadifyError::Validation(_) | AcadifyError::Referential(_) => 400,
            AcadifyError::Authentication(_) => 401,
            AcadifyError::Authorization(_) => 403,
            AcadifyError::NotFound(_) => 404,
            AcadifyError::Conflict(_) => 409,
            _ => 500,
        }
    }

    /// 调用方可自行修正的错误，消息可以原样返回
    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }
}

impl AcadifyError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AcadifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AcadifyError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AcadifyError {
    fn from(err: sea_orm::DbErr) -> Self {
        AcadifyError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AcadifyError {
    fn from(err: serde_json::Error) -> Self {
        AcadifyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AcadifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AcadifyError::database_config("test").code(), "E001");
        assert_eq!(AcadifyError::validation("test").code(), "E004");
        assert_eq!(AcadifyError::referential("test").code(), "E005");
        assert_eq!(AcadifyError::authorization("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AcadifyError::conflict("test").error_type(),
            "Conflict Error"
        );
        assert_eq!(
            AcadifyError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AcadifyError::validation("invalid status");
        assert_eq!(err.message(), "invalid status");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(AcadifyError::validation("x").http_status(), 400);
        assert_eq!(AcadifyError::referential("x").http_status(), 400);
        assert_eq!(AcadifyError::authorization("x").http_status(), 403);
        assert_eq!(AcadifyError::not_found("x").http_status(), 404);
        assert_eq!(AcadifyError::conflict("x").http_status(), 409);
        assert_eq!(AcadifyError::database_operation("x").http_status(), 500);
        assert!(!AcadifyError::database_operation("x").is_client_error());
    }

    #[test]
    fn test_db_err_maps_to_store_error() {
        let err: AcadifyError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E003");
    }

    #[test]
    fn test_format_simple() {
        let err = AcadifyError::referential("unknown requirement subject");
        let formatted = err.format_simple();
        assert!(formatted.contains("Referential Error"));
        assert!(formatted.contains("unknown requirement subject"));
    }
}
