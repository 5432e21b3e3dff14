//! 会话生命周期
//!
//! 会话启动时构造状态对象与各服务，登出时重置。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::errors::{LabGradeError, Result};
use crate::services::{AssignmentService, ReviewService, SubmissionService};
use crate::state::EngineState;
use crate::transport::{Transport, debug_transport_registry, get_transport_plugin};

pub struct SessionContext {
    pub state: Arc<EngineState>,
    pub transport: Arc<dyn Transport>,
    pub submissions: SubmissionService,
    pub assignments: AssignmentService,
    pub reviews: ReviewService,
}

impl SessionContext {
    /// 登出：重置会话状态，不存在其他生命周期
    pub fn logout(&self) {
        warn!("Resetting session state on logout");
        self.state.reset();
    }
}

/// 初始化日志（重复调用是无操作）
pub fn init_logging() {
    let config = EngineConfig::get();
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_development() {
        let _ = builder.with_file(true).with_line_number(true).try_init();
    } else {
        let _ = builder.json().try_init();
    }
}

/// 创建传输后端
async fn create_transport() -> Result<Arc<dyn Transport>> {
    let config = EngineConfig::get();
    let backend = &config.transport.backend;

    if let Some(constructor) = get_transport_plugin(backend) {
        match constructor().await {
            Ok(transport) => {
                debug!("Created {} transport backend", backend);
                return Ok(Arc::from(transport));
            }
            Err(e) => {
                warn!("Failed to create {} transport: {}", backend, e);
            }
        }
    } else {
        warn!("Transport backend '{}' not found in registry", backend);
    }

    // 配置的后端不可用时回退到内置 mock
    if backend != "mock"
        && let Some(fallback) = get_transport_plugin("mock")
        && let Ok(transport) = fallback().await
    {
        warn!("Falling back to mock transport backend");
        return Ok(Arc::from(transport));
    }

    Err(LabGradeError::transport_plugin_not_found(backend.clone()))
}

/// 会话启动
///
/// 加载配置、初始化日志、通过注册表解析传输后端，
/// 构造空的会话状态与各服务。
pub async fn start_session() -> Result<SessionContext> {
    let config = EngineConfig::get();
    init_logging();
    debug!(
        "Starting {} session in {} mode",
        config.app.system_name, config.app.environment
    );
    debug_transport_registry();

    let transport = create_transport().await?;
    Ok(SessionContext {
        state: Arc::new(EngineState::new()),
        submissions: SubmissionService::new(transport.clone()),
        assignments: AssignmentService::new(transport.clone()),
        reviews: ReviewService::new(transport.clone()),
        transport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::test_support::submission;

    #[tokio::test]
    async fn test_start_session_resolves_mock_backend() {
        let context = start_session().await.expect("session should start");
        let assignments = context.transport.get_assignments(1).await;
        assert!(assignments.is_success());
    }

    #[tokio::test]
    async fn test_logout_resets_state() {
        let context = start_session().await.expect("session should start");
        context.state.set_active_course(3);
        context
            .state
            .set_selected_submission(Some(submission(1, 1)));
        context.logout();
        assert_eq!(context.state.active_course(), 0);
        assert!(context.state.selected_submission().is_none());
    }
}
