use tracing::debug;

use super::{SubmissionService, fetch};
use crate::models::common::alert::AlertColor;
use crate::models::submissions::requests::{ReleaseRequest, UpdateSubmissionsRequest};
use crate::state::EngineState;
use crate::utils::validate::validate_minimum_score;

/// 发布/撤销发布选中提交
///
/// 发布要求该提交存在就绪评审，撤销不受限。
/// 乐观更新，远端失败时回滚到请求前的值。
pub(super) async fn release(
    service: &SubmissionService,
    state: &EngineState,
    released: bool,
) -> bool {
    let Some(submission) = state.selected_submission() else {
        return false;
    };
    let Some(owner) = state.submission_owner() else {
        return false;
    };
    if released && !state.can_release() {
        debug!("Refusing to release submission {} without a ready review", submission.id);
        return false;
    }

    let mut updated = submission.clone();
    updated.released = released;
    state.refresh_selected_submission(updated.clone());

    let response = service
        .transport()
        .release(ReleaseRequest {
            course_id: state.active_course(),
            submission_id: submission.id,
            owner,
            released,
        })
        .await;
    if !response.is_success() {
        // 回滚
        state.refresh_selected_submission(submission);
        state.alert_status(&response.status);
        return false;
    }

    state.submissions_for_course.update(&owner, updated);
    true
}

/// 按最低分批量发布/通过选中作业的提交，随后刷新课程
pub(super) async fn release_all(
    service: &SubmissionService,
    state: &EngineState,
    release: bool,
    approve: bool,
) -> bool {
    let minimum_score = state.minimum_score();
    if let Err(message) = validate_minimum_score(minimum_score) {
        state.alert(message, AlertColor::Warning);
        return false;
    }
    let assignment_id = state.review_assignment_id();
    if assignment_id <= 0 {
        return false;
    }
    let course_id = state.active_course();

    let response = service
        .transport()
        .update_submissions(UpdateSubmissionsRequest {
            course_id,
            assignment_id,
            minimum_score: minimum_score as u32,
            release,
            approve,
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }

    fetch::refresh_course_submissions(service, state, course_id).await
}
