use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::submissions::entities::{Grade, GradeStatus};
use crate::models::submissions::owner::Owner;

// 按课程批量拉取时的提交类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub enum SubmissionType {
    All,
    Individual,
    Group,
}

/// 拉取提交的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "case", content = "value", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub enum FetchMode {
    UserId(i64),
    GroupId(i64),
    SubmissionId(i64),
    Type(SubmissionType),
}

/// 拉取提交请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub struct SubmissionRequest {
    pub course_id: i64,
    pub fetch_mode: FetchMode,
}

/// 更新提交请求（整体写回评定列表与发布标记）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub struct UpdateSubmissionRequest {
    pub course_id: i64,
    pub submission_id: i64,
    pub grades: Vec<Grade>,
    pub released: bool,
    pub score: u32,
}

/// 批量发布/通过请求，按作业与最低分筛选
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub struct UpdateSubmissionsRequest {
    pub course_id: i64,
    pub assignment_id: i64,
    pub minimum_score: u32,
    pub release: bool,
    pub approve: bool,
}

/// 单个成员评定更新请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub struct UpdateGradeRequest {
    pub course_id: i64,
    pub submission_id: i64,
    pub user_id: i64,
    pub status: GradeStatus,
}

// 批注目标：评分基准或评分项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub enum CommentTarget {
    Benchmark(i64),
    Criterion(i64),
}

/// 批注更新请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub struct UpdateCommentRequest {
    pub course_id: i64,
    pub review_id: i64,
    pub target: CommentTarget,
    pub comment: String,
}

/// 发布/撤销发布请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/request.ts")]
pub struct ReleaseRequest {
    pub course_id: i64,
    pub submission_id: i64,
    pub owner: Owner,
    pub released: bool,
}
