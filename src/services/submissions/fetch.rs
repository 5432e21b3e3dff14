use futures_util::join;
use tracing::debug;

use super::SubmissionService;
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::owner::{Owner, OwnerTable, is_valid_submission_for_assignment};
use crate::models::submissions::requests::{FetchMode, SubmissionRequest, SubmissionType};
use crate::state::EngineState;
use crate::state::submission_index::OwnerSubmissionMap;

// 丢掉违反归属校验的提交（非小组作业下的小组提交）
fn filter_invalid(mut map: OwnerSubmissionMap, assignments: &[Assignment]) -> OwnerSubmissionMap {
    for submissions in map.values_mut() {
        submissions.retain(|submission| {
            match assignments.iter().find(|a| a.id == submission.assignment_id) {
                Some(assignment) => is_valid_submission_for_assignment(submission, assignment),
                None => true,
            }
        });
    }
    map.retain(|_, submissions| !submissions.is_empty());
    map
}

/// 刷新课程提交
///
/// 签发凭据后并发拉取个人与小组两张快照；响应返回时
/// 当前课程已切换则整体丢弃，不得应用到新上下文。
pub(super) async fn refresh_course_submissions(
    service: &SubmissionService,
    state: &EngineState,
    course_id: i64,
) -> bool {
    let token = state.submissions_for_course.snapshot_token();

    let (user_response, group_response) = join!(
        service
            .transport()
            .get_submissions_by_course(SubmissionRequest {
                course_id,
                fetch_mode: FetchMode::Type(SubmissionType::All),
            }),
        service
            .transport()
            .get_submissions_by_course(SubmissionRequest {
                course_id,
                fetch_mode: FetchMode::Type(SubmissionType::Group),
            }),
    );

    if !user_response.is_success() {
        state.alert_status(&user_response.status);
        return false;
    }
    if !group_response.is_success() {
        state.alert_status(&group_response.status);
        return false;
    }
    if state.active_course() != course_id {
        debug!("Discarding submissions fetched for inactive course {course_id}");
        return false;
    }

    let (Some(user_map), Some(group_map)) =
        (user_response.into_data(), group_response.into_data())
    else {
        return false;
    };
    let assignments = state.assignments_for_course(course_id);
    let user_map = filter_invalid(user_map, &assignments);
    let group_map = filter_invalid(group_map, &assignments);

    // 用快照里的评审列表播种评审表
    for submissions in user_map.values().chain(group_map.values()) {
        for submission in submissions {
            state.set_reviews(submission.id, submission.reviews.clone());
        }
    }

    state
        .submissions_for_course
        .set_submissions(OwnerTable::User, user_map, token);
    state
        .submissions_for_course
        .set_submissions(OwnerTable::Group, group_map, token);
    true
}

pub(super) async fn fetch_user_submissions(
    service: &SubmissionService,
    state: &EngineState,
    course_id: i64,
    user_id: i64,
) -> bool {
    let response = service
        .transport()
        .get_submissions(SubmissionRequest {
            course_id,
            fetch_mode: FetchMode::UserId(user_id),
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }
    let Some(submissions) = response.into_data() else {
        return false;
    };
    state
        .submissions
        .set_submissions(course_id, OwnerTable::User, submissions);
    true
}

pub(super) async fn fetch_group_submissions(
    service: &SubmissionService,
    state: &EngineState,
    course_id: i64,
    group_id: i64,
) -> bool {
    // 未加入小组时无事可做
    if group_id == 0 {
        return false;
    }
    let response = service
        .transport()
        .get_submissions(SubmissionRequest {
            course_id,
            fetch_mode: FetchMode::GroupId(group_id),
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }
    let Some(submissions) = response.into_data() else {
        return false;
    };
    state
        .submissions
        .set_submissions(course_id, OwnerTable::Group, submissions);
    true
}

/// 单条刷新
///
/// 刷新索引条目；选中提交恰好是它时一并就地刷新。
/// 在途期间切换课程的过期完成被丢弃。
pub(super) async fn get_submission(
    service: &SubmissionService,
    state: &EngineState,
    course_id: i64,
    owner: Owner,
    submission_id: i64,
) -> bool {
    let response = service
        .transport()
        .get_submissions(SubmissionRequest {
            course_id,
            fetch_mode: FetchMode::SubmissionId(submission_id),
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }
    let Some(submission) = response.into_data().and_then(|list| list.into_iter().next())
    else {
        return false;
    };
    if state.active_course() != course_id {
        debug!("Discarding submission {submission_id} fetched for inactive course {course_id}");
        return false;
    }

    state
        .submissions_for_course
        .update(&owner, submission.clone());
    state.set_reviews(submission.id, submission.reviews.clone());
    if state
        .selected_submission()
        .map(|s| s.id == submission_id)
        .unwrap_or(false)
    {
        state.refresh_selected_submission(submission);
    }
    true
}
