use super::{ReviewService, update};
use crate::models::assignments::entities::CriterionGrade;
use crate::state::EngineState;

/// 设置当前评审中某评分项的评定
///
/// 评定变化立即重算得分；就绪状态从不在这里变化，
/// 它是独立的显式动作。远端失败时回滚。
pub(super) async fn set_grade(
    service: &ReviewService,
    state: &EngineState,
    criterion_id: i64,
    grade: CriterionGrade,
) -> bool {
    let Some(original) = state.current_review() else {
        return false;
    };
    let mut edited = original.clone();
    let Some(criterion) = edited
        .grading_benchmarks
        .iter_mut()
        .flat_map(|bm| bm.criteria.iter_mut())
        .find(|c| c.id == criterion_id)
    else {
        return false;
    };
    criterion.grade = grade;
    edited.score = edited.compute_score();
    state.replace_review(edited);

    if !update::push_current_review(service, state).await {
        state.replace_review(original);
        return false;
    }
    true
}
