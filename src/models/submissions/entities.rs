use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::reviews::entities::Review;
use crate::models::submissions::owner::Owner;

// 成员评定状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum GradeStatus {
    #[default]
    None, // 未评定
    Approved, // 通过
    Rejected, // 不通过
    Revision, // 需修改
}

impl GradeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GradeStatus::None => "None",
            GradeStatus::Approved => "Approved",
            GradeStatus::Rejected => "Rejected",
            GradeStatus::Revision => "Revision",
        }
    }
}

impl std::fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 单个成员在一次提交中的评定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Grade {
    pub user_id: i64,
    pub status: GradeStatus,
}

/// 自动评分中的单项测试得分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Score {
    pub test_name: String,
    pub score: u32,
    pub max_score: u32,
    pub weight: u32,
}

/// 构建信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct BuildInfo {
    pub build_date: Option<chrono::DateTime<chrono::Utc>>,
    pub build_log: String,
    pub exec_time_ms: i64,
}

/// 提交
///
/// 服务端在代码推送时创建，客户端只通过状态/评定更新与重建请求
/// 修改它，从不删除。grades 按 user_id 唯一；小组提交的 grades
/// 与当前小组成员一一对应，变换不得丢失或重复条目。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    // 提交者用户 ID，0 表示无
    pub user_id: i64,
    // 提交者小组 ID，0 表示无
    pub group_id: i64,
    pub score: u32,
    pub released: bool,
    pub build_info: Option<BuildInfo>,
    pub scores: Vec<Score>,
    pub grades: Vec<Grade>,
    pub reviews: Vec<Review>,
}

impl Submission {
    pub fn is_group_submission(&self) -> bool {
        self.group_id > 0
    }

    pub fn has_reviews(&self) -> bool {
        !self.reviews.is_empty()
    }

    /// 查询某成员的评定状态，无匹配条目时为 None
    pub fn status_by_user(&self, user_id: i64) -> GradeStatus {
        self.grades
            .iter()
            .find(|grade| grade.user_id == user_id)
            .map(|grade| grade.status)
            .unwrap_or_default()
    }

    /// 替换单个成员的评定状态，返回新值
    ///
    /// 其余字段与条目原样保留，旧值仍可用于比较或回滚。
    pub fn with_status_by_user(&self, user_id: i64, status: GradeStatus) -> Submission {
        let grades = self
            .grades
            .iter()
            .map(|grade| {
                if grade.user_id == user_id {
                    Grade {
                        user_id: grade.user_id,
                        status,
                    }
                } else {
                    grade.clone()
                }
            })
            .collect();
        Submission {
            grades,
            ..self.clone()
        }
    }

    /// 替换全部成员的评定状态，返回新值
    pub fn with_status_all(&self, status: GradeStatus) -> Submission {
        let grades = self
            .grades
            .iter()
            .map(|grade| Grade {
                user_id: grade.user_id,
                status,
            })
            .collect();
        Submission {
            grades,
            ..self.clone()
        }
    }

    /// 所有成员是否均为指定状态（空列表按真处理）
    pub fn has_all_status(&self, status: GradeStatus) -> bool {
        self.grades.iter().all(|grade| grade.status == status)
    }

    pub fn is_all_approved(&self) -> bool {
        self.has_all_status(GradeStatus::Approved)
    }

    pub fn is_all_revision(&self) -> bool {
        self.has_all_status(GradeStatus::Revision)
    }

    pub fn is_all_rejected(&self) -> bool {
        self.has_all_status(GradeStatus::Rejected)
    }

    pub fn user_has_status(&self, user_id: i64, status: GradeStatus) -> bool {
        self.grades
            .iter()
            .any(|grade| grade.user_id == user_id && grade.status == status)
    }

    /// 结果表格单元格的样式类
    ///
    /// 小组归属看共识，个人归属看该成员自身状态；
    /// 任何情况下都返回一个确定的类，默认中性可点击。
    pub fn cell_color(&self, owner: &Owner) -> &'static str {
        match owner {
            Owner::Group(_) => {
                if self.is_all_approved() {
                    return "result-approved";
                }
                if self.is_all_revision() {
                    return "result-revision";
                }
                if self.is_all_rejected() {
                    return "result-rejected";
                }
                if self
                    .grades
                    .iter()
                    .any(|grade| grade.status != GradeStatus::None)
                {
                    return "result-mixed";
                }
            }
            Owner::Enrollment(user_id) => {
                if self.user_has_status(*user_id, GradeStatus::Approved) {
                    return "result-approved";
                }
                if self.user_has_status(*user_id, GradeStatus::Revision) {
                    return "result-revision";
                }
                if self.user_has_status(*user_id, GradeStatus::Rejected) {
                    return "result-rejected";
                }
            }
        }
        "clickable"
    }

    /// 自动测试通过情况，形如 "3/5"，无测试时为空串
    pub fn passed_tests_label(&self) -> String {
        if self.scores.is_empty() {
            return String::new();
        }
        let passed = self
            .scores
            .iter()
            .filter(|s| s.score == s.max_score)
            .count();
        format!("{passed}/{}", self.scores.len())
    }
}

/// 一组提交的总分
pub fn submissions_score_sum(submissions: &[Submission]) -> u64 {
    submissions.iter().map(|s| s.score as u64).sum()
}

/// 一组提交中全员通过的数量
pub fn num_approved(submissions: &[Submission]) -> usize {
    submissions.iter().filter(|s| s.is_all_approved()).count()
}

/// 提交状态的展示文案，未评定时考虑自动通过与分数线
pub fn assignment_status_text(
    assignment: &Assignment,
    submission: &Submission,
    status: GradeStatus,
) -> String {
    if status == GradeStatus::None {
        if !assignment.auto_approve && submission.score >= assignment.score_limit {
            return "Awaiting approval".to_string();
        }
        if submission.score < assignment.score_limit {
            return format!("Need {}% score for approval", assignment.score_limit);
        }
    }
    status.label().to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn assignment(id: i64) -> Assignment {
        Assignment {
            id,
            course_id: 1,
            name: format!("lab{id}"),
            order: id as u32,
            is_group_lab: false,
            reviewers: 1,
            auto_approve: false,
            score_limit: 80,
            grading_benchmarks: vec![],
        }
    }

    pub fn submission(id: i64, assignment_id: i64) -> Submission {
        Submission {
            id,
            assignment_id,
            user_id: 0,
            group_id: 0,
            score: 0,
            released: false,
            build_info: None,
            scores: vec![],
            grades: vec![],
            reviews: vec![],
        }
    }

    pub fn grade(user_id: i64, status: GradeStatus) -> Grade {
        Grade { user_id, status }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{assignment, grade, submission};
    use super::*;

    #[test]
    fn test_status_by_user_absent_is_none() {
        let mut s = submission(1, 1);
        s.grades = vec![grade(1, GradeStatus::Approved)];
        assert_eq!(s.status_by_user(99), GradeStatus::None);
    }

    #[test]
    fn test_with_status_by_user_non_interference() {
        let mut s = submission(1, 1);
        s.grades = vec![grade(1, GradeStatus::None), grade(2, GradeStatus::Rejected)];

        let updated = s.with_status_by_user(1, GradeStatus::Approved);
        assert_eq!(updated.status_by_user(1), GradeStatus::Approved);
        assert_eq!(updated.status_by_user(2), GradeStatus::Rejected);
        assert_eq!(updated.grades.len(), 2);
        // 旧值保持不变
        assert_eq!(s.status_by_user(1), GradeStatus::None);
    }

    #[test]
    fn test_with_status_all_preserves_cardinality() {
        let mut s = submission(1, 1);
        s.grades = vec![
            grade(1, GradeStatus::None),
            grade(2, GradeStatus::Approved),
            grade(3, GradeStatus::Rejected),
        ];
        let updated = s.with_status_all(GradeStatus::Revision);
        assert_eq!(updated.grades.len(), 3);
        assert!(updated.has_all_status(GradeStatus::Revision));
        assert!(updated.is_all_revision());
    }

    #[test]
    fn test_consensus_vacuously_true_on_empty() {
        let s = submission(1, 1);
        assert!(s.is_all_approved());
        assert!(s.has_all_status(GradeStatus::Rejected));
    }

    #[test]
    fn test_group_consensus_scenario() {
        // 两名成员依次通过，共识谓词随之翻转
        let mut s = submission(1, 1);
        s.group_id = 5;
        s.grades = vec![grade(1, GradeStatus::None), grade(2, GradeStatus::None)];

        let first = s.with_status_by_user(1, GradeStatus::Approved);
        assert!(!first.is_all_approved());
        assert!(first.user_has_status(1, GradeStatus::Approved));

        let second = first.with_status_by_user(2, GradeStatus::Approved);
        assert!(second.is_all_approved());
    }

    #[test]
    fn test_cell_color_group() {
        let mut s = submission(1, 1);
        s.group_id = 5;
        s.grades = vec![
            grade(1, GradeStatus::Approved),
            grade(2, GradeStatus::Approved),
        ];
        let owner = Owner::Group(5);
        assert_eq!(s.cell_color(&owner), "result-approved");

        let mixed = s.with_status_by_user(2, GradeStatus::Rejected);
        assert_eq!(mixed.cell_color(&owner), "result-mixed");

        let untouched = s.with_status_all(GradeStatus::None);
        assert_eq!(untouched.cell_color(&owner), "clickable");
    }

    #[test]
    fn test_cell_color_enrollment() {
        let mut s = submission(1, 1);
        s.user_id = 3;
        s.grades = vec![grade(3, GradeStatus::Revision)];
        assert_eq!(s.cell_color(&Owner::Enrollment(3)), "result-revision");
        assert_eq!(s.cell_color(&Owner::Enrollment(4)), "clickable");
    }

    #[test]
    fn test_passed_tests_label() {
        let mut s = submission(1, 1);
        assert_eq!(s.passed_tests_label(), "");
        s.scores = vec![
            Score {
                test_name: "TestAdd".to_string(),
                score: 10,
                max_score: 10,
                weight: 1,
            },
            Score {
                test_name: "TestSub".to_string(),
                score: 4,
                max_score: 10,
                weight: 1,
            },
        ];
        assert_eq!(s.passed_tests_label(), "1/2");
    }

    #[test]
    fn test_assignment_status_text() {
        let mut a = assignment(1);
        a.score_limit = 80;
        let mut s = submission(1, 1);

        s.score = 90;
        assert_eq!(
            assignment_status_text(&a, &s, GradeStatus::None),
            "Awaiting approval"
        );

        s.score = 50;
        assert_eq!(
            assignment_status_text(&a, &s, GradeStatus::None),
            "Need 80% score for approval"
        );

        assert_eq!(
            assignment_status_text(&a, &s, GradeStatus::Approved),
            "Approved"
        );
    }

    #[test]
    fn test_score_aggregates() {
        let mut a = submission(1, 1);
        a.score = 40;
        a.grades = vec![grade(1, GradeStatus::Approved)];
        let mut b = submission(2, 2);
        b.score = 60;
        b.grades = vec![grade(1, GradeStatus::Rejected)];
        let all = vec![a, b];
        assert_eq!(submissions_score_sum(&all), 100);
        assert_eq!(num_approved(&all), 1);
    }
}
