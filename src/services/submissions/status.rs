use tracing::debug;

use super::SubmissionService;
use crate::models::submissions::entities::{GradeStatus, Submission};
use crate::models::submissions::owner::Owner;
use crate::models::submissions::requests::{UpdateGradeRequest, UpdateSubmissionRequest};
use crate::state::EngineState;

/// 设置整个归属方的评定状态
///
/// 个人归属改该成员一项，小组归属改全体成员。
/// 目标状态已达成时是无操作；远端失败时本地不应用。
pub(super) async fn update_status(
    service: &SubmissionService,
    state: &EngineState,
    owner: Owner,
    submission: Submission,
    status: GradeStatus,
) -> bool {
    match owner {
        Owner::Enrollment(_) => {
            if submission.status_by_user(submission.user_id) == status {
                return false;
            }
        }
        Owner::Group(_) => {
            if submission.has_all_status(status) {
                return false;
            }
        }
    }

    let updated = match owner {
        Owner::Enrollment(_) => submission.with_status_by_user(submission.user_id, status),
        Owner::Group(_) => submission.with_status_all(status),
    };

    let response = service
        .transport()
        .update_submission(UpdateSubmissionRequest {
            course_id: state.active_course(),
            submission_id: submission.id,
            grades: updated.grades.clone(),
            released: submission.released,
            score: submission.score,
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }

    state.submissions_for_course.update(&owner, updated.clone());
    if state
        .selected_submission()
        .map(|s| s.id == updated.id)
        .unwrap_or(false)
    {
        state.refresh_selected_submission(updated);
    }
    true
}

/// 设置选中提交中单个成员的评定状态
pub(super) async fn update_grade(
    service: &SubmissionService,
    state: &EngineState,
    user_id: i64,
    status: GradeStatus,
) -> bool {
    let Some(selected) = state.selected_submission() else {
        return false;
    };
    if selected.status_by_user(user_id) == status {
        return false;
    }

    let updated = selected.with_status_by_user(user_id, status);
    let response = service
        .transport()
        .update_grade(UpdateGradeRequest {
            course_id: state.active_course(),
            submission_id: selected.id,
            user_id,
            status,
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }

    // 归属方由提交自身的 ID 导出，小组 ID 优先
    let owner = if updated.group_id > 0 {
        Owner::Group(updated.group_id)
    } else {
        Owner::Enrollment(updated.user_id)
    };
    debug!("Applied grade update for user {user_id} under {owner:?}");
    state.submissions_for_course.update(&owner, updated.clone());
    state.refresh_selected_submission(updated);
    true
}
