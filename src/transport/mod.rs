//! 远端协作方接口
//!
//! 引擎与服务端之间的边界：每次调用返回带状态码的响应，
//! code 为 0 表示成功，非零时错误文本原样交给告警队列。
//! 后端通过插件注册表解析，内置内存 mock 后端。

pub mod mock;
pub mod register;

use async_trait::async_trait;

use crate::models::assignments::entities::Assignment;
use crate::models::common::response::{Ack, RpcResponse};
use crate::models::reviews::entities::Review;
use crate::models::reviews::requests::ReviewRequest;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::{
    ReleaseRequest, SubmissionRequest, UpdateCommentRequest, UpdateGradeRequest,
    UpdateSubmissionRequest, UpdateSubmissionsRequest,
};
use crate::state::submission_index::OwnerSubmissionMap;

pub use mock::MockTransport;
pub use register::{debug_transport_registry, get_transport_plugin, register_transport_plugin};

#[async_trait]
pub trait Transport: Send + Sync {
    /// 提交
    // 按用户/小组/提交 ID 拉取提交
    async fn get_submissions(&self, request: SubmissionRequest) -> RpcResponse<Vec<Submission>>;
    // 按课程批量拉取，按归属方分键
    async fn get_submissions_by_course(
        &self,
        request: SubmissionRequest,
    ) -> RpcResponse<OwnerSubmissionMap>;
    // 写回评定列表与发布标记
    async fn update_submission(&self, request: UpdateSubmissionRequest) -> RpcResponse<Ack>;
    // 按作业与最低分批量发布/通过
    async fn update_submissions(&self, request: UpdateSubmissionsRequest) -> RpcResponse<Ack>;
    // 更新单个成员的评定
    async fn update_grade(&self, request: UpdateGradeRequest) -> RpcResponse<Ack>;
    // 重新构建提交
    async fn rebuild_submission(
        &self,
        assignment_id: i64,
        submission_id: i64,
    ) -> RpcResponse<Submission>;
    // 发布/撤销发布
    async fn release(&self, request: ReleaseRequest) -> RpcResponse<Ack>;

    /// 作业
    // 拉取课程作业（含当前评分基准模板）
    async fn get_assignments(&self, course_id: i64) -> RpcResponse<Vec<Assignment>>;

    /// 评审
    // 创建评审（服务端分配 ID 并克隆模板）
    async fn create_review(&self, request: ReviewRequest) -> RpcResponse<Review>;
    // 更新评审（服务端重算得分并刷新编辑时间）
    async fn update_review(&self, request: ReviewRequest) -> RpcResponse<Review>;
    // 更新基准/评分项批注
    async fn update_comment(&self, request: UpdateCommentRequest) -> RpcResponse<Ack>;
}
