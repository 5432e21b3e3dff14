use tracing::debug;

use super::{ReviewService, update};
use crate::state::EngineState;

/// 标记/取消就绪
///
/// 标记就绪要求已评定数达到现行模板的评分项总数
/// （graded 取自评审克隆树，criteria_total 取自现行模板）；
/// 取消就绪无条件允许，教师可随时重开评审。
pub(super) async fn update_ready(
    service: &ReviewService,
    state: &EngineState,
    ready: bool,
) -> bool {
    if ready && state.graded() < state.criteria_total() {
        debug!(
            "Refusing to mark review ready: {}/{} criteria graded",
            state.graded(),
            state.criteria_total()
        );
        return false;
    }
    let Some(original) = state.current_review() else {
        return false;
    };
    let mut edited = original.clone();
    edited.ready = ready;
    state.replace_review(edited);

    if !update::push_current_review(service, state).await {
        state.replace_review(original);
        return false;
    }
    true
}
