use super::ReviewService;
use crate::models::reviews::requests::ReviewRequest;
use crate::models::submissions::requests::{CommentTarget, UpdateCommentRequest};
use crate::state::EngineState;

/// 持久化当前评审，服务端返回的版本写回状态
pub(super) async fn push_current_review(service: &ReviewService, state: &EngineState) -> bool {
    if !state.can_update_review() {
        return false;
    }
    let Some(review) = state.current_review() else {
        return false;
    };
    let response = service
        .transport()
        .update_review(ReviewRequest {
            course_id: state.active_course(),
            review,
        })
        .await;
    if !response.is_success() {
        state.alert_status(&response.status);
        return false;
    }
    let Some(updated) = response.into_data() else {
        return false;
    };
    state.replace_review(updated);
    true
}

/// 更新评语，远端失败时回滚到请求前的值
pub(super) async fn update_feedback(
    service: &ReviewService,
    state: &EngineState,
    feedback: String,
) -> bool {
    let Some(original) = state.current_review() else {
        return false;
    };
    let mut edited = original.clone();
    edited.feedback = feedback;
    state.replace_review(edited);

    if !push_current_review(service, state).await {
        state.replace_review(original);
        return false;
    }
    true
}

/// 更新基准/评分项批注，远端失败时回滚
pub(super) async fn update_comment(
    service: &ReviewService,
    state: &EngineState,
    target: CommentTarget,
    comment: String,
) -> bool {
    let Some(original) = state.current_review() else {
        return false;
    };
    let mut edited = original.clone();
    let found = match target {
        CommentTarget::Benchmark(id) => {
            match edited.grading_benchmarks.iter_mut().find(|bm| bm.id == id) {
                Some(benchmark) => {
                    benchmark.comment = comment.clone();
                    true
                }
                None => false,
            }
        }
        CommentTarget::Criterion(id) => {
            match edited
                .grading_benchmarks
                .iter_mut()
                .flat_map(|bm| bm.criteria.iter_mut())
                .find(|c| c.id == id)
            {
                Some(criterion) => {
                    criterion.comment = comment.clone();
                    true
                }
                None => false,
            }
        }
    };
    if !found {
        return false;
    }
    state.replace_review(edited);

    let response = service
        .transport()
        .update_comment(UpdateCommentRequest {
            course_id: state.active_course(),
            review_id: original.id,
            target,
            comment,
        })
        .await;
    if !response.is_success() {
        state.replace_review(original);
        state.alert_status(&response.status);
        return false;
    }
    true
}
