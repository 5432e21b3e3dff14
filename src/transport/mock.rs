//! 内存 mock 后端
//!
//! 完整实现传输接口：单调分配 ID、创建评审时克隆模板、
//! 更新评审时在"服务端"重算得分并刷新编辑时间、
//! 校验评审人配额。用于测试与离线开发。

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::models::assignments::entities::{Assignment, CriterionGrade, GradingBenchmark};
use crate::models::common::response::{Ack, RpcResponse};
use crate::models::reviews::entities::Review;
use crate::models::reviews::requests::ReviewRequest;
use crate::models::submissions::entities::{Grade, GradeStatus, Submission};
use crate::models::submissions::requests::{
    CommentTarget, FetchMode, ReleaseRequest, SubmissionRequest, SubmissionType,
    UpdateCommentRequest, UpdateGradeRequest, UpdateSubmissionRequest, UpdateSubmissionsRequest,
};
use crate::state::submission_index::OwnerSubmissionMap;
use crate::transport::register::{BoxedTransportFuture, register_transport_plugin};
use crate::transport::Transport;

// mock 后端统一的失败状态码
const CODE_UNKNOWN: i32 = 2;

#[derive(Default)]
pub struct MockTransport {
    // 课程 ID -> 作业（含评分基准模板）
    assignments: DashMap<i64, Vec<Assignment>>,
    // 提交 ID -> 提交
    submissions: DashMap<i64, Submission>,
    id_counter: AtomicI64,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            assignments: DashMap::new(),
            submissions: DashMap::new(),
            id_counter: AtomicI64::new(1000),
        }
    }

    pub fn seed_assignment(&self, assignment: Assignment) {
        self.assignments
            .entry(assignment.course_id)
            .or_default()
            .push(assignment);
    }

    pub fn seed_submission(&self, submission: Submission) {
        self.submissions.insert(submission.id, submission);
    }

    fn generate_id(&self) -> i64 {
        self.id_counter.fetch_add(1, Ordering::SeqCst)
    }

    fn find_assignment(&self, assignment_id: i64) -> Option<Assignment> {
        self.assignments.iter().find_map(|entry| {
            entry
                .value()
                .iter()
                .find(|a| a.id == assignment_id)
                .cloned()
        })
    }

    // 课程内的提交，按 ID 排序保证确定性
    fn submissions_for_course(&self, course_id: i64) -> Vec<Submission> {
        let mut result: Vec<Submission> = self
            .submissions
            .iter()
            .filter(|entry| {
                self.find_assignment(entry.value().assignment_id)
                    .map(|a| a.course_id == course_id)
                    .unwrap_or(false)
            })
            .map(|entry| entry.value().clone())
            .collect();
        result.sort_by_key(|s| s.id);
        result
    }

    /// 从模板克隆评审树，评分项的评定一律从未评定开始
    fn clone_template(&self, assignment: &Assignment) -> Vec<GradingBenchmark> {
        let mut benchmarks = assignment.grading_benchmarks.clone();
        for benchmark in &mut benchmarks {
            for criterion in &mut benchmark.criteria {
                criterion.grade = CriterionGrade::None;
            }
        }
        benchmarks
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_submissions(&self, request: SubmissionRequest) -> RpcResponse<Vec<Submission>> {
        let all = self.submissions_for_course(request.course_id);
        let filtered: Vec<Submission> = match request.fetch_mode {
            FetchMode::UserId(user_id) => {
                all.into_iter().filter(|s| s.user_id == user_id).collect()
            }
            FetchMode::GroupId(group_id) => {
                all.into_iter().filter(|s| s.group_id == group_id).collect()
            }
            FetchMode::SubmissionId(submission_id) => {
                let matched: Vec<Submission> =
                    all.into_iter().filter(|s| s.id == submission_id).collect();
                if matched.is_empty() {
                    return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
                }
                matched
            }
            FetchMode::Type(_) => all,
        };
        RpcResponse::success(filtered)
    }

    async fn get_submissions_by_course(
        &self,
        request: SubmissionRequest,
    ) -> RpcResponse<OwnerSubmissionMap> {
        let FetchMode::Type(kind) = request.fetch_mode else {
            return RpcResponse::failure(CODE_UNKNOWN, "Invalid fetch mode");
        };
        let mut map = OwnerSubmissionMap::new();
        for submission in self.submissions_for_course(request.course_id) {
            let key = match kind {
                SubmissionType::Group => {
                    if submission.group_id == 0 {
                        continue;
                    }
                    submission.group_id
                }
                SubmissionType::Individual => {
                    if submission.group_id > 0 || submission.user_id == 0 {
                        continue;
                    }
                    submission.user_id
                }
                SubmissionType::All => {
                    if submission.user_id == 0 {
                        continue;
                    }
                    submission.user_id
                }
            };
            map.entry(key).or_default().push(submission);
        }
        RpcResponse::success(map)
    }

    async fn update_submission(&self, request: UpdateSubmissionRequest) -> RpcResponse<Ack> {
        let Some(mut submission) = self.submissions.get_mut(&request.submission_id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
        };
        submission.grades = request.grades;
        submission.released = request.released;
        submission.score = request.score;
        RpcResponse::success(Ack)
    }

    async fn update_submissions(&self, request: UpdateSubmissionsRequest) -> RpcResponse<Ack> {
        for mut entry in self.submissions.iter_mut() {
            let submission = entry.value_mut();
            if submission.assignment_id != request.assignment_id {
                continue;
            }
            if (submission.score as i64) < request.minimum_score as i64 {
                continue;
            }
            if request.release {
                submission.released = true;
            }
            if request.approve {
                submission.grades = submission
                    .grades
                    .iter()
                    .map(|g| Grade {
                        user_id: g.user_id,
                        status: GradeStatus::Approved,
                    })
                    .collect();
            }
        }
        RpcResponse::success(Ack)
    }

    async fn update_grade(&self, request: UpdateGradeRequest) -> RpcResponse<Ack> {
        let Some(mut submission) = self.submissions.get_mut(&request.submission_id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
        };
        let Some(grade) = submission
            .grades
            .iter_mut()
            .find(|g| g.user_id == request.user_id)
        else {
            return RpcResponse::failure(CODE_UNKNOWN, "Grade not found");
        };
        grade.status = request.status;
        RpcResponse::success(Ack)
    }

    async fn rebuild_submission(
        &self,
        assignment_id: i64,
        submission_id: i64,
    ) -> RpcResponse<Submission> {
        let Some(mut submission) = self.submissions.get_mut(&submission_id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
        };
        if submission.assignment_id != assignment_id {
            return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
        }
        if let Some(build_info) = submission.build_info.as_mut() {
            build_info.build_date = Some(chrono::Utc::now());
        }
        RpcResponse::success(submission.clone())
    }

    async fn release(&self, request: ReleaseRequest) -> RpcResponse<Ack> {
        let Some(mut submission) = self.submissions.get_mut(&request.submission_id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
        };
        submission.released = request.released;
        RpcResponse::success(Ack)
    }

    async fn get_assignments(&self, course_id: i64) -> RpcResponse<Vec<Assignment>> {
        RpcResponse::success(
            self.assignments
                .get(&course_id)
                .map(|e| e.value().clone())
                .unwrap_or_default(),
        )
    }

    async fn create_review(&self, request: ReviewRequest) -> RpcResponse<Review> {
        let draft = request.review;
        let Some(mut submission) = self.submissions.get_mut(&draft.submission_id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
        };
        let Some(assignment) = self.find_assignment(submission.assignment_id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Assignment not found");
        };
        if submission.reviews.len() >= assignment.reviewers as usize {
            return RpcResponse::failure(CODE_UNKNOWN, "Review quota reached for submission");
        }
        if submission
            .reviews
            .iter()
            .any(|r| r.reviewer_id == draft.reviewer_id)
        {
            return RpcResponse::failure(CODE_UNKNOWN, "Reviewer already has a review");
        }

        let review = Review {
            id: self.generate_id(),
            submission_id: draft.submission_id,
            reviewer_id: draft.reviewer_id,
            grading_benchmarks: self.clone_template(&assignment),
            score: 0,
            ready: false,
            feedback: String::new(),
            edited: Some(chrono::Utc::now()),
        };
        submission.reviews.push(review.clone());
        debug!(
            "Created review {} for submission {}",
            review.id, review.submission_id
        );
        RpcResponse::success(review)
    }

    async fn update_review(&self, request: ReviewRequest) -> RpcResponse<Review> {
        let mut review = request.review;
        let Some(mut submission) = self.submissions.get_mut(&review.submission_id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Submission not found");
        };
        let Some(index) = submission.reviews.iter().position(|r| r.id == review.id) else {
            return RpcResponse::failure(CODE_UNKNOWN, "Review not found");
        };
        review.score = review.compute_score();
        review.edited = Some(chrono::Utc::now());
        submission.reviews[index] = review.clone();
        RpcResponse::success(review)
    }

    async fn update_comment(&self, request: UpdateCommentRequest) -> RpcResponse<Ack> {
        for mut entry in self.submissions.iter_mut() {
            let Some(review) = entry
                .value_mut()
                .reviews
                .iter_mut()
                .find(|r| r.id == request.review_id)
            else {
                continue;
            };
            match request.target {
                CommentTarget::Benchmark(id) => {
                    if let Some(benchmark) = review
                        .grading_benchmarks
                        .iter_mut()
                        .find(|bm| bm.id == id)
                    {
                        benchmark.comment = request.comment.clone();
                        return RpcResponse::success(Ack);
                    }
                }
                CommentTarget::Criterion(id) => {
                    if let Some(criterion) = review
                        .grading_benchmarks
                        .iter_mut()
                        .flat_map(|bm| bm.criteria.iter_mut())
                        .find(|c| c.id == id)
                    {
                        criterion.comment = request.comment.clone();
                        return RpcResponse::success(Ack);
                    }
                }
            }
            return RpcResponse::failure(CODE_UNKNOWN, "Comment target not found");
        }
        RpcResponse::failure(CODE_UNKNOWN, "Review not found")
    }
}

#[ctor::ctor]
fn register_mock_transport() {
    register_transport_plugin(
        "mock",
        Arc::new(|| -> BoxedTransportFuture {
            Box::pin(async { Ok(Box::new(MockTransport::new()) as Box<dyn Transport>) })
        }),
    );
}
