use super::{SubmissionService, fetch};
use crate::models::common::alert::AlertColor;
use crate::models::submissions::owner::Owner;
use crate::state::EngineState;

/// 重新构建提交，完成后单条刷新并提示
pub(super) async fn rebuild_submission(
    service: &SubmissionService,
    state: &EngineState,
    owner: Owner,
    submission_id: i64,
) -> bool {
    let Some(assignment) = state.selected_assignment() else {
        return false;
    };
    let course_id = state.active_course();

    let response = service
        .transport()
        .rebuild_submission(assignment.id, submission_id)
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }

    fetch::get_submission(service, state, course_id, owner, submission_id).await;
    state.alert("提交已重新构建", AlertColor::Success);
    true
}
