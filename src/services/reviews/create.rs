use tracing::debug;

use super::ReviewService;
use crate::models::reviews::entities::Review;
use crate::models::reviews::requests::ReviewRequest;
use crate::state::EngineState;

/// 为选中提交创建评审
///
/// 前置校验：提交的既有评审数未达 assignment.reviewers，
/// 且该评审人尚未创建过评审。通过后由服务端分配 ID 并
/// 克隆当前模板，新评审被追加并选中。
pub(super) async fn create_review(
    service: &ReviewService,
    state: &EngineState,
    reviewer_id: i64,
) -> Option<Review> {
    if state.active_course() <= 0 {
        return None;
    }
    let submission = state.selected_submission()?;
    let assignment = state.selected_assignment()?;

    let existing = state.reviews_for(submission.id);
    if existing.len() >= assignment.reviewers as usize {
        debug!(
            "Review quota ({}) reached for submission {}",
            assignment.reviewers, submission.id
        );
        return None;
    }
    if existing.iter().any(|r| r.is_author(reviewer_id)) {
        debug!(
            "Reviewer {reviewer_id} already has a review for submission {}",
            submission.id
        );
        return None;
    }

    let response = service
        .transport()
        .create_review(ReviewRequest {
            course_id: state.active_course(),
            review: Review::new(submission.id, reviewer_id),
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return None;
    }
    let review = response.into_data()?;

    let index = state.push_review(review.clone());
    state.set_selected_review_index(index as i64);
    Some(review)
}
