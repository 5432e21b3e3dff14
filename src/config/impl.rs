use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::EngineConfig;

static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

impl EngineConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = EngineConfig::default();

        let builder = Config::builder()
            // 默认值
            .set_default("app.system_name", defaults.app.system_name)?
            .set_default("app.environment", defaults.app.environment)?
            .set_default("app.log_level", defaults.app.log_level)?
            .set_default("transport.backend", defaults.transport.backend)?
            .set_default("alerts.max_queue", defaults.alerts.max_queue as i64)?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("LABGRADE")
                    .separator("_")
                    .try_parsing(true),
            )
            // 支持从环境变量加载
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("transport.backend", std::env::var("TRANSPORT_BACKEND").ok())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 获取全局配置实例
    pub fn get() -> &'static EngineConfig {
        ENGINE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                tracing::warn!("Failed to load configuration, using defaults: {e}");
                EngineConfig::default()
            })
        })
    }

    /// 初始化配置 (在会话启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        ENGINE_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        !self.is_production()
    }
}
