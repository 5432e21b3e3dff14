use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
}

/// 选课记录，个人提交以选课记录为归属键
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Enrollment {
    // 唯一 ID
    pub id: i64,
    // 关联的课程 ID
    pub course_id: i64,
    // 关联的用户 ID
    pub user_id: i64,
    // 所在小组 ID，0 表示未加入小组
    pub group_id: i64,
}

/// 小组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Group {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    // 成员用户 ID 列表
    pub users: Vec<i64>,
}

impl Group {
    pub fn has_users(&self) -> bool {
        !self.users.is_empty()
    }
}
