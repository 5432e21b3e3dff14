use serde::{Deserialize, Serialize};

/// 引擎配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub app: AppSettings,
    pub transport: TransportConfig,
    pub alerts: AlertConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 传输后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    // 后端名称（通过插件注册表解析）
    pub backend: String,
}

/// 告警队列配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    // 队列上限，超出时丢弃最旧的告警
    pub max_queue: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                system_name: "labgrade".to_string(),
                environment: "development".to_string(),
                log_level: "info".to_string(),
            },
            transport: TransportConfig {
                backend: "mock".to_string(),
            },
            alerts: AlertConfig { max_queue: 32 },
        }
    }
}
