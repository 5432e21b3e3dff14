pub mod fetch;
pub mod rebuild;
pub mod release;
pub mod status;

use std::sync::Arc;

use crate::models::submissions::entities::{GradeStatus, Submission};
use crate::models::submissions::owner::Owner;
use crate::state::EngineState;
use crate::transport::Transport;

pub struct SubmissionService {
    transport: Arc<dyn Transport>,
}

impl SubmissionService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// 刷新课程的全部提交（批量快照，新鲜度受控）
    pub async fn refresh_course_submissions(&self, state: &EngineState, course_id: i64) -> bool {
        fetch::refresh_course_submissions(self, state, course_id).await
    }

    /// 拉取本人在某课程的提交
    pub async fn fetch_user_submissions(
        &self,
        state: &EngineState,
        course_id: i64,
        user_id: i64,
    ) -> bool {
        fetch::fetch_user_submissions(self, state, course_id, user_id).await
    }

    /// 拉取所在小组在某课程的提交
    pub async fn fetch_group_submissions(
        &self,
        state: &EngineState,
        course_id: i64,
        group_id: i64,
    ) -> bool {
        fetch::fetch_group_submissions(self, state, course_id, group_id).await
    }

    /// 单条刷新某归属方名下的提交
    pub async fn get_submission(
        &self,
        state: &EngineState,
        course_id: i64,
        owner: Owner,
        submission_id: i64,
    ) -> bool {
        fetch::get_submission(self, state, course_id, owner, submission_id).await
    }

    /// 设置整个归属方的评定状态（个人看成员自身，小组看全体）
    pub async fn update_status(
        &self,
        state: &EngineState,
        owner: Owner,
        submission: Submission,
        status: GradeStatus,
    ) -> bool {
        status::update_status(self, state, owner, submission, status).await
    }

    /// 设置选中提交中单个成员的评定状态
    pub async fn update_grade(
        &self,
        state: &EngineState,
        user_id: i64,
        status: GradeStatus,
    ) -> bool {
        status::update_grade(self, state, user_id, status).await
    }

    /// 重新构建提交并刷新
    pub async fn rebuild_submission(
        &self,
        state: &EngineState,
        owner: Owner,
        submission_id: i64,
    ) -> bool {
        rebuild::rebuild_submission(self, state, owner, submission_id).await
    }

    /// 发布/撤销发布选中提交
    pub async fn release(&self, state: &EngineState, released: bool) -> bool {
        release::release(self, state, released).await
    }

    /// 按最低分批量发布/通过选中作业的提交
    pub async fn release_all(&self, state: &EngineState, release: bool, approve: bool) -> bool {
        release::release_all(self, state, release, approve).await
    }
}
