use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;

/// 提交的逻辑归属：个人选课记录或小组
///
/// 显式和类型，穷尽匹配，不做运行时结构嗅探。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum Owner {
    Enrollment(i64),
    Group(i64),
}

impl Owner {
    /// 解析提交的归属方
    ///
    /// 小组作业且提交带有小组 ID 时归属小组，否则归属个人。
    pub fn resolve(submission: &Submission, assignment: &Assignment) -> Owner {
        if assignment.is_group_lab && submission.group_id > 0 {
            Owner::Group(submission.group_id)
        } else {
            Owner::Enrollment(submission.user_id)
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Owner::Enrollment(id) | Owner::Group(id) => *id,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Owner::Group(_))
    }
}

/// 索引中的归属表类别，全量快照按表整体替换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum OwnerTable {
    User,
    Group,
}

/// 非小组作业不得携带小组提交
///
/// 违反时调用方应将该提交过滤掉，而不是报错。
pub fn is_valid_submission_for_assignment(submission: &Submission, assignment: &Assignment) -> bool {
    assignment.is_group_lab || submission.group_id == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::test_support::{assignment, submission};

    #[test]
    fn test_resolve_group_lab() {
        let mut a = assignment(1);
        a.is_group_lab = true;
        let mut s = submission(10, 1);
        s.group_id = 7;
        assert_eq!(Owner::resolve(&s, &a), Owner::Group(7));
    }

    #[test]
    fn test_resolve_group_lab_without_group() {
        // 小组作业允许个人提交（尚未建组的成员）
        let mut a = assignment(1);
        a.is_group_lab = true;
        let mut s = submission(10, 1);
        s.user_id = 3;
        assert_eq!(Owner::resolve(&s, &a), Owner::Enrollment(3));
    }

    #[test]
    fn test_resolve_individual_lab() {
        let a = assignment(1);
        let mut s = submission(10, 1);
        s.user_id = 5;
        assert_eq!(Owner::resolve(&s, &a), Owner::Enrollment(5));
    }

    #[test]
    fn test_validity() {
        let mut a = assignment(1);
        let mut s = submission(10, 1);
        assert!(is_valid_submission_for_assignment(&s, &a));

        s.group_id = 4;
        assert!(!is_valid_submission_for_assignment(&s, &a));

        a.is_group_lab = true;
        assert!(is_valid_submission_for_assignment(&s, &a));
    }
}
