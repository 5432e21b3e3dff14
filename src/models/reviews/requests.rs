use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::reviews::entities::Review;

/// 创建/更新评审请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewRequest {
    pub course_id: i64,
    pub review: Review,
}
