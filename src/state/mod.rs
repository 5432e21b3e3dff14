//! 会话状态
//!
//! 显式的状态对象：会话开始时构造，登出时重置，不存在其他生命周期。
//! 所有派生值（当前评审、评分项总数、已评定数）在读取时显式重算。

pub mod submission_index;
pub mod user_submissions;

use std::sync::Mutex;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use tracing::debug;

use crate::config::EngineConfig;
use crate::errors::{LabGradeError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::common::alert::{Alert, AlertColor};
use crate::models::common::response::RpcStatus;
use crate::models::courses::entities::Group;
use crate::models::reviews::entities::Review;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::owner::Owner;
use crate::utils::validate::validate_group_name;
use submission_index::SubmissionIndex;
use user_submissions::UserSubmissions;

pub struct EngineState {
    // 当前课程，0 表示未选
    active_course: AtomicI64,
    // 当前选中的提交（独立副本）及其归属方
    selected_submission: RwLock<Option<Submission>>,
    submission_owner: RwLock<Option<Owner>>,
    // 课程索引与学生视角表
    pub submissions_for_course: SubmissionIndex,
    pub submissions: UserSubmissions,
    // 课程 ID -> 作业（含当前评分基准模板）
    assignments: DashMap<i64, Vec<Assignment>>,
    // 提交 ID -> 评审列表
    reviews: DashMap<i64, Vec<Review>>,
    // 当前评审在列表中的下标，-1 表示未选
    selected_review: AtomicI64,
    // 批量发布的目标作业，-1 表示未选
    review_assignment_id: AtomicI64,
    // 批量发布的最低分
    minimum_score: AtomicI64,
    alerts: Mutex<Vec<Alert>>,
    // 小组表单草稿
    active_group: RwLock<Option<Group>>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            active_course: AtomicI64::new(0),
            selected_submission: RwLock::new(None),
            submission_owner: RwLock::new(None),
            submissions_for_course: SubmissionIndex::new(),
            submissions: UserSubmissions::new(),
            assignments: DashMap::new(),
            reviews: DashMap::new(),
            selected_review: AtomicI64::new(-1),
            review_assignment_id: AtomicI64::new(-1),
            minimum_score: AtomicI64::new(0),
            alerts: Mutex::new(Vec::new()),
            active_group: RwLock::new(None),
        }
    }

    // 课程与选择 //

    pub fn active_course(&self) -> i64 {
        self.active_course.load(Ordering::SeqCst)
    }

    pub fn set_active_course(&self, course_id: i64) {
        self.active_course.store(course_id, Ordering::SeqCst);
    }

    pub fn selected_submission(&self) -> Option<Submission> {
        self.selected_submission
            .read()
            .expect("selected submission lock poisoned")
            .clone()
    }

    /// 选中提交时保存一份独立副本，取消选中传 None
    pub fn set_selected_submission(&self, submission: Option<Submission>) {
        *self
            .selected_submission
            .write()
            .expect("selected submission lock poisoned") = submission;
        self.selected_review.store(-1, Ordering::SeqCst);
    }

    /// 就地刷新选中提交（保留当前评审选择）
    pub fn refresh_selected_submission(&self, submission: Submission) {
        *self
            .selected_submission
            .write()
            .expect("selected submission lock poisoned") = Some(submission);
    }

    pub fn submission_owner(&self) -> Option<Owner> {
        *self
            .submission_owner
            .read()
            .expect("submission owner lock poisoned")
    }

    pub fn set_submission_owner(&self, owner: Owner) {
        *self
            .submission_owner
            .write()
            .expect("submission owner lock poisoned") = Some(owner);
    }

    /// 以选课记录为出发点解析归属方
    ///
    /// 选中的提交带有小组 ID 时归属小组，否则归属该选课记录。
    pub fn resolve_submission_owner(&self, enrollment_id: i64) -> Owner {
        let group_id = self
            .selected_submission()
            .map(|s| s.group_id)
            .unwrap_or(0);
        if group_id > 0 {
            Owner::Group(group_id)
        } else {
            Owner::Enrollment(enrollment_id)
        }
    }

    // 作业模板 //

    pub fn set_assignments(&self, course_id: i64, assignments: Vec<Assignment>) {
        self.assignments.insert(course_id, assignments);
    }

    pub fn assignments_for_course(&self, course_id: i64) -> Vec<Assignment> {
        self.assignments
            .get(&course_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    pub fn find_assignment(&self, course_id: i64, assignment_id: i64) -> Option<Assignment> {
        self.assignments
            .get(&course_id)
            .and_then(|e| e.value().iter().find(|a| a.id == assignment_id).cloned())
    }

    /// 当前选中提交对应的作业（取自当前模板）
    pub fn selected_assignment(&self) -> Option<Assignment> {
        let submission = self.selected_submission()?;
        self.find_assignment(self.active_course(), submission.assignment_id)
    }

    // 评审 //

    pub fn set_reviews(&self, submission_id: i64, reviews: Vec<Review>) {
        self.reviews.insert(submission_id, reviews);
    }

    pub fn reviews_for(&self, submission_id: i64) -> Vec<Review> {
        self.reviews
            .get(&submission_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    /// 追加新建评审并返回其下标
    pub fn push_review(&self, review: Review) -> usize {
        let mut entry = self.reviews.entry(review.submission_id).or_default();
        entry.value_mut().push(review);
        entry.value().len() - 1
    }

    /// 按评审 ID 替换，无匹配时不做任何事
    pub fn replace_review(&self, review: Review) {
        let Some(mut entry) = self.reviews.get_mut(&review.submission_id) else {
            debug!("Ignoring review update for unknown submission {}", review.submission_id);
            return;
        };
        if let Some(index) = entry.value().iter().position(|r| r.id == review.id) {
            entry.value_mut()[index] = review;
        }
    }

    pub fn selected_review_index(&self) -> i64 {
        self.selected_review.load(Ordering::SeqCst)
    }

    pub fn set_selected_review_index(&self, index: i64) {
        self.selected_review.store(index, Ordering::SeqCst);
    }

    /// 当前评审（读取时重算，不做隐式派生）
    pub fn current_review(&self) -> Option<Review> {
        if self.active_course() <= 0 {
            return None;
        }
        let submission = self.selected_submission()?;
        let index = self.selected_review_index();
        if index < 0 {
            return None;
        }
        self.reviews_for(submission.id).get(index as usize).cloned()
    }

    pub fn can_update_review(&self) -> bool {
        self.active_course() > 0
            && self.selected_submission().is_some()
            && self.current_review().map(|r| r.id > 0).unwrap_or(false)
    }

    /// 当前作业模板中可达的评分项总数
    pub fn criteria_total(&self) -> usize {
        self.selected_assignment()
            .map(|a| a.criteria_total())
            .unwrap_or(0)
    }

    /// 当前评审克隆树中已评定的评分项数
    pub fn graded(&self) -> usize {
        self.current_review()
            .map(|r| r.graded_count())
            .unwrap_or(0)
    }

    /// 选中提交是否存在就绪评审（发布的前提）
    pub fn can_release(&self) -> bool {
        self.selected_submission()
            .map(|s| self.reviews_for(s.id).iter().any(|r| r.ready))
            .unwrap_or(false)
    }

    // 批量发布参数 //

    pub fn review_assignment_id(&self) -> i64 {
        self.review_assignment_id.load(Ordering::SeqCst)
    }

    /// 选中/取消批量发布的目标作业（再次设置同一作业即取消）
    pub fn toggle_review_assignment(&self, assignment_id: i64) {
        let current = self.review_assignment_id();
        let next = if current > 0 { -1 } else { assignment_id };
        self.review_assignment_id.store(next, Ordering::SeqCst);
    }

    pub fn minimum_score(&self) -> i64 {
        self.minimum_score.load(Ordering::SeqCst)
    }

    pub fn set_minimum_score(&self, minimum_score: i64) {
        self.minimum_score.store(minimum_score, Ordering::SeqCst);
    }

    // 告警队列 //

    pub fn alert(&self, text: impl Into<String>, color: AlertColor) {
        let mut alerts = self.alerts.lock().expect("alert queue lock poisoned");
        alerts.push(Alert::new(text, color));
        let max_queue = EngineConfig::get().alerts.max_queue;
        let overflow = alerts.len().saturating_sub(max_queue);
        if overflow > 0 {
            alerts.drain(..overflow);
        }
    }

    /// 远端失败：错误文本原样入队
    pub fn alert_status(&self, status: &RpcStatus) {
        if status.is_success() {
            return;
        }
        self.alert(status.error.clone(), AlertColor::Danger);
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .expect("alert queue lock poisoned")
            .clone()
    }

    pub fn pop_alert(&self, id: u64) {
        self.alerts
            .lock()
            .expect("alert queue lock poisoned")
            .retain(|a| a.id != id);
    }

    // 小组表单草稿 //

    pub fn active_group(&self) -> Option<Group> {
        self.active_group
            .read()
            .expect("active group lock poisoned")
            .clone()
    }

    pub fn set_active_group(&self, group: Option<Group>) {
        *self
            .active_group
            .write()
            .expect("active group lock poisoned") = group;
    }

    pub fn update_group_name(&self, name: &str) -> Result<()> {
        validate_group_name(name).map_err(LabGradeError::validation)?;
        let mut guard = self
            .active_group
            .write()
            .expect("active group lock poisoned");
        let Some(group) = guard.as_mut() else {
            return Err(LabGradeError::not_found("No active group"));
        };
        group.name = name.to_string();
        Ok(())
    }

    /// 切换草稿中某成员的在组状态
    pub fn update_group_users(&self, user_id: i64) {
        let mut guard = self
            .active_group
            .write()
            .expect("active group lock poisoned");
        let Some(group) = guard.as_mut() else {
            return;
        };
        if let Some(index) = group.users.iter().position(|u| *u == user_id) {
            group.users.remove(index);
        } else {
            group.users.push(user_id);
        }
    }

    // 生命周期 //

    /// 登出时重置会话状态
    pub fn reset(&self) {
        self.active_course.store(0, Ordering::SeqCst);
        self.set_selected_submission(None);
        *self
            .submission_owner
            .write()
            .expect("submission owner lock poisoned") = None;
        self.submissions_for_course.clear();
        self.submissions.clear();
        self.assignments.clear();
        self.reviews.clear();
        self.selected_review.store(-1, Ordering::SeqCst);
        self.review_assignment_id.store(-1, Ordering::SeqCst);
        self.minimum_score.store(0, Ordering::SeqCst);
        self.alerts.lock().expect("alert queue lock poisoned").clear();
        self.set_active_group(None);
    }
}
