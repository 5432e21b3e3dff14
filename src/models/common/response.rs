use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 远端调用状态，code 为 0 表示成功
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rpc.ts")]
pub struct RpcStatus {
    pub code: i32,
    // 非零 code 时携带的人类可读错误信息，原样展示给用户
    pub error: String,
}

impl RpcStatus {
    pub fn ok() -> Self {
        Self {
            code: 0,
            error: String::new(),
        }
    }

    pub fn failure(code: i32, error: impl Into<String>) -> Self {
        Self {
            code,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// 空确认响应体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rpc.ts")]
pub struct Ack;

// 统一的远端响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rpc.ts")]
pub struct RpcResponse<T: TS> {
    pub status: RpcStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> RpcResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: RpcStatus::ok(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn failure(code: i32, error: impl Into<String>) -> Self {
        Self {
            status: RpcStatus::failure(code, error),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 成功时取出数据，失败时返回 None
    pub fn into_data(self) -> Option<T> {
        if self.status.is_success() {
            self.data
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = RpcResponse::success(42i64);
        assert!(response.is_success());
        assert_eq!(response.into_data(), Some(42));
    }

    #[test]
    fn test_failure_response() {
        let response: RpcResponse<i64> = RpcResponse::failure(2, "Submission not found");
        assert!(!response.is_success());
        assert_eq!(response.status.error, "Submission not found");
        assert_eq!(response.into_data(), None);
    }

    #[test]
    fn test_failure_data_ignored() {
        // 带数据但状态非零的响应不得向调用方交付数据
        let response = RpcResponse {
            status: RpcStatus::failure(13, "internal"),
            data: Some(7i64),
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(response.into_data(), None);
    }

    #[test]
    fn test_serialize_skips_empty_data() {
        let response: RpcResponse<i64> = RpcResponse::failure(2, "gone");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["status"]["code"], 2);
    }
}
