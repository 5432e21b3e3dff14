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
macro_rules! define_labgrade_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LabGradeError {
            $($variant(String),)*
        }

        impl LabGradeError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LabGradeError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LabGradeError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LabGradeError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LabGradeError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LabGradeError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_labgrade_errors! {
    Configuration("E001", "Configuration Error"),
    TransportPluginNotFound("E002", "Transport Plugin Not Found"),
    Validation("E003", "Validation Error"),
    NotFound("E004", "Resource Not Found"),
    Serialization("E005", "Serialization Error"),
}

impl LabGradeError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LabGradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LabGradeError {}

// 为常见的错误类型实现 From trait
impl From<serde_json::Error> for LabGradeError {
    fn from(err: serde_json::Error) -> Self {
        LabGradeError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LabGradeError {
    fn from(err: config::ConfigError) -> Self {
        LabGradeError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LabGradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LabGradeError::configuration("test").code(), "E001");
        assert_eq!(
            LabGradeError::transport_plugin_not_found("test").code(),
            "E002"
        );
        assert_eq!(LabGradeError::validation("test").code(), "E003");
        assert_eq!(LabGradeError::not_found("test").code(), "E004");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            LabGradeError::validation("test").error_type(),
            "Validation Error"
        );
        assert_eq!(
            LabGradeError::not_found("test").error_type(),
            "Resource Not Found"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = LabGradeError::validation("Invalid group name");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid group name"));
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<i64>("not a number").unwrap_err();
        let converted: LabGradeError = err.into();
        assert_eq!(converted.code(), "E005");
    }
}
