use std::sync::Arc;

use crate::state::EngineState;
use crate::transport::Transport;

pub struct AssignmentService {
    transport: Arc<dyn Transport>,
}

impl AssignmentService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 拉取课程作业，评审门限与批量发布都读取这里的模板
    pub async fn fetch_assignments(&self, state: &EngineState, course_id: i64) -> bool {
        let response = self.transport.get_assignments(course_id).await;
        if !response.is_success() {
            state.alert_status(&response.status);
            return false;
        }
        let Some(assignments) = response.into_data() else {
            return false;
        };
        state.set_assignments(course_id, assignments);
        true
    }
}
