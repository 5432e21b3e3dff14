pub mod create;
pub mod grade;
pub mod ready;
pub mod update;

use std::sync::Arc;

use crate::models::assignments::entities::CriterionGrade;
use crate::models::reviews::entities::Review;
use crate::models::submissions::requests::CommentTarget;
use crate::state::EngineState;
use crate::transport::Transport;

pub struct ReviewService {
    transport: Arc<dyn Transport>,
}

impl ReviewService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// 为选中提交创建评审（受评审人配额与一人一评审约束）
    pub async fn create_review(&self, state: &EngineState, reviewer_id: i64) -> Option<Review> {
        create::create_review(self, state, reviewer_id).await
    }

    /// 持久化当前评审
    pub async fn update_review(&self, state: &EngineState) -> bool {
        update::push_current_review(self, state).await
    }

    /// 设置当前评审中某评分项的评定（触发得分重算）
    pub async fn set_grade(
        &self,
        state: &EngineState,
        criterion_id: i64,
        grade: CriterionGrade,
    ) -> bool {
        grade::set_grade(self, state, criterion_id, grade).await
    }

    /// 标记/取消就绪
    pub async fn update_ready(&self, state: &EngineState, ready: bool) -> bool {
        ready::update_ready(self, state, ready).await
    }

    /// 更新评语（失败回滚）
    pub async fn update_feedback(&self, state: &EngineState, feedback: String) -> bool {
        update::update_feedback(self, state, feedback).await
    }

    /// 更新基准/评分项批注（失败回滚）
    pub async fn update_comment(
        &self,
        state: &EngineState,
        target: CommentTarget,
        comment: String,
    ) -> bool {
        update::update_comment(self, state, target, comment).await
    }

    /// 选择评审；负下标回落到该评审人自己的评审
    pub fn set_selected_review(&self, state: &EngineState, index: i64, reviewer_id: i64) {
        if index >= 0 {
            state.set_selected_review_index(index);
            return;
        }
        let Some(submission) = state.selected_submission() else {
            state.set_selected_review_index(-1);
            return;
        };
        let fallback = state
            .reviews_for(submission.id)
            .iter()
            .position(|r| r.is_author(reviewer_id))
            .map(|i| i as i64)
            .unwrap_or(-1);
        state.set_selected_review_index(fallback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::{Assignment, GradingBenchmark, GradingCriterion};
    use crate::models::submissions::entities::test_support::{assignment, submission};
    use crate::transport::MockTransport;

    fn manual_assignment(id: i64, reviewers: u32, points: u32) -> Assignment {
        let mut a = assignment(id);
        a.reviewers = reviewers;
        a.grading_benchmarks = vec![GradingBenchmark {
            id: 1,
            assignment_id: id,
            heading: "Benchmark".to_string(),
            comment: String::new(),
            criteria: vec![
                GradingCriterion {
                    id: 1,
                    benchmark_id: 1,
                    description: "first".to_string(),
                    points,
                    grade: CriterionGrade::None,
                    comment: String::new(),
                },
                GradingCriterion {
                    id: 2,
                    benchmark_id: 1,
                    description: "second".to_string(),
                    points,
                    grade: CriterionGrade::None,
                    comment: String::new(),
                },
            ],
        }];
        a
    }

    fn context(reviewers: u32, points: u32) -> (ReviewService, EngineState) {
        let mock = MockTransport::new();
        let assignment = manual_assignment(1, reviewers, points);
        mock.seed_assignment(assignment.clone());
        let mut s = submission(10, 1);
        s.user_id = 3;
        mock.seed_submission(s.clone());

        let transport: Arc<dyn Transport> = Arc::new(mock);
        let service = ReviewService::new(transport);
        let state = EngineState::new();
        state.set_active_course(1);
        state.set_assignments(1, vec![assignment]);
        state.set_selected_submission(Some(s));
        (service, state)
    }

    #[tokio::test]
    async fn test_create_review_selects_new_review() {
        let (service, state) = context(2, 10);
        let review = service.create_review(&state, 42).await.unwrap();
        assert!(review.id > 0);
        assert_eq!(state.selected_review_index(), 0);
        assert_eq!(state.current_review().map(|r| r.id), Some(review.id));
        assert_eq!(state.graded(), 0);
        assert_eq!(state.criteria_total(), 2);
    }

    #[tokio::test]
    async fn test_create_review_quota() {
        let (service, state) = context(2, 10);
        assert!(service.create_review(&state, 1).await.is_some());
        assert!(service.create_review(&state, 2).await.is_some());
        // 配额已满，第三位评审人被拒
        assert!(service.create_review(&state, 3).await.is_none());
    }

    #[tokio::test]
    async fn test_create_review_one_per_reviewer() {
        let (service, state) = context(3, 10);
        assert!(service.create_review(&state, 1).await.is_some());
        assert!(service.create_review(&state, 1).await.is_none());
    }

    #[tokio::test]
    async fn test_create_review_rejected_when_auto_graded_only() {
        let (service, state) = context(0, 10);
        assert!(service.create_review(&state, 1).await.is_none());
    }

    #[tokio::test]
    async fn test_set_grade_recomputes_score() {
        let (service, state) = context(1, 10);
        service.create_review(&state, 42).await.unwrap();

        assert!(service.set_grade(&state, 1, CriterionGrade::Passed).await);
        let review = state.current_review().unwrap();
        assert_eq!(review.score, 10);
        // 评定不会自动置就绪
        assert!(!review.ready);

        assert!(service.set_grade(&state, 2, CriterionGrade::Passed).await);
        assert_eq!(state.current_review().unwrap().score, 20);
    }

    #[tokio::test]
    async fn test_set_grade_uniform_scoring() {
        let (service, state) = context(1, 0);
        service.create_review(&state, 42).await.unwrap();

        assert!(service.set_grade(&state, 1, CriterionGrade::Passed).await);
        assert_eq!(state.current_review().unwrap().score, 50);
        assert!(service.set_grade(&state, 2, CriterionGrade::Passed).await);
        assert_eq!(state.current_review().unwrap().score, 100);
    }

    #[tokio::test]
    async fn test_update_ready_gated_on_completeness() {
        let (service, state) = context(1, 10);
        service.create_review(&state, 42).await.unwrap();

        // 尚有未评定项：标记就绪被拒，状态不变
        assert!(!service.update_ready(&state, true).await);
        assert!(!state.current_review().unwrap().ready);

        assert!(service.set_grade(&state, 1, CriterionGrade::Passed).await);
        assert!(!service.update_ready(&state, true).await);

        assert!(service.set_grade(&state, 2, CriterionGrade::Failed).await);
        assert!(service.update_ready(&state, true).await);
        assert!(state.current_review().unwrap().ready);

        // 取消就绪无条件允许
        assert!(service.update_ready(&state, false).await);
        assert!(!state.current_review().unwrap().ready);
    }

    #[tokio::test]
    async fn test_update_feedback_and_comment() {
        let (service, state) = context(1, 10);
        service.create_review(&state, 42).await.unwrap();

        assert!(
            service
                .update_feedback(&state, "Solid work".to_string())
                .await
        );
        assert_eq!(state.current_review().unwrap().feedback, "Solid work");

        assert!(
            service
                .update_comment(&state, CommentTarget::Criterion(1), "Nice".to_string())
                .await
        );
        let review = state.current_review().unwrap();
        assert_eq!(review.grading_benchmarks[0].criteria[0].comment, "Nice");
    }

    #[tokio::test]
    async fn test_update_comment_unknown_target_is_noop() {
        let (service, state) = context(1, 10);
        service.create_review(&state, 42).await.unwrap();
        assert!(
            !service
                .update_comment(&state, CommentTarget::Criterion(99), "?".to_string())
                .await
        );
    }

    #[tokio::test]
    async fn test_set_selected_review_fallback_to_author() {
        let (service, state) = context(2, 10);
        service.create_review(&state, 1).await.unwrap();
        service.create_review(&state, 2).await.unwrap();
        assert_eq!(state.selected_review_index(), 1);

        service.set_selected_review(&state, -1, 1);
        assert_eq!(state.selected_review_index(), 0);

        service.set_selected_review(&state, -1, 99);
        assert_eq!(state.selected_review_index(), -1);

        service.set_selected_review(&state, 1, 99);
        assert_eq!(state.selected_review_index(), 1);
    }

    #[tokio::test]
    async fn test_criteria_total_reads_live_template() {
        let (service, state) = context(1, 10);
        service.create_review(&state, 42).await.unwrap();
        assert!(service.set_grade(&state, 1, CriterionGrade::Passed).await);
        assert!(service.set_grade(&state, 2, CriterionGrade::Passed).await);

        // 模板在评审创建后扩充：就绪以现行模板的项数为准
        let mut extended = manual_assignment(1, 1, 10);
        extended.grading_benchmarks[0]
            .criteria
            .push(GradingCriterion {
                id: 3,
                benchmark_id: 1,
                description: "third".to_string(),
                points: 10,
                grade: CriterionGrade::None,
                comment: String::new(),
            });
        state.set_assignments(1, vec![extended]);

        assert_eq!(state.criteria_total(), 3);
        assert_eq!(state.graded(), 2);
        assert!(!service.update_ready(&state, true).await);
    }
}
