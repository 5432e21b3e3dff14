use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分项的评定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum CriterionGrade {
    #[default]
    None, // 未评定
    Passed, // 通过
    Failed, // 未通过
}

/// 评分项，挂在评分基准下
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradingCriterion {
    pub id: i64,
    pub benchmark_id: i64,
    pub description: String,
    // 该项的分值，0 表示按均分计分
    pub points: u32,
    pub grade: CriterionGrade,
    pub comment: String,
}

/// 评分基准，人工评审量规树的一级节点
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradingBenchmark {
    pub id: i64,
    pub assignment_id: i64,
    pub heading: String,
    pub comment: String,
    pub criteria: Vec<GradingCriterion>,
}

impl GradingBenchmark {
    pub fn has_criteria(&self) -> bool {
        !self.criteria.is_empty()
    }
}

/// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 关联的课程 ID
    pub course_id: i64,
    // 作业名称
    pub name: String,
    // 课程内的顺序号
    pub order: u32,
    // 是否为小组作业
    pub is_group_lab: bool,
    // 人工评审人数上限，0 表示仅自动评分
    pub reviewers: u32,
    // 达到分数线后是否自动通过
    pub auto_approve: bool,
    // 自动评分的分数线
    pub score_limit: u32,
    // 当前的评分基准模板（创建评审时克隆）
    pub grading_benchmarks: Vec<GradingBenchmark>,
}

impl Assignment {
    /// 当前模板中可达的评分项总数
    ///
    /// 评审的就绪判定以此为准，而非评审自身克隆树的大小：
    /// 模板在评审创建后被编辑时两者可能不一致。
    pub fn criteria_total(&self) -> usize {
        self.grading_benchmarks
            .iter()
            .map(|bm| bm.criteria.len())
            .sum()
    }

    pub fn is_manually_graded(&self) -> bool {
        self.reviewers > 0
    }

    pub fn has_benchmarks(&self) -> bool {
        !self.grading_benchmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: i64, benchmark_id: i64) -> GradingCriterion {
        GradingCriterion {
            id,
            benchmark_id,
            description: format!("criterion {id}"),
            points: 0,
            grade: CriterionGrade::None,
            comment: String::new(),
        }
    }

    #[test]
    fn test_criteria_total_spans_benchmarks() {
        let assignment = Assignment {
            id: 1,
            course_id: 1,
            name: "lab1".to_string(),
            order: 1,
            is_group_lab: false,
            reviewers: 1,
            auto_approve: false,
            score_limit: 80,
            grading_benchmarks: vec![
                GradingBenchmark {
                    id: 1,
                    assignment_id: 1,
                    heading: "HTML".to_string(),
                    comment: String::new(),
                    criteria: vec![criterion(1, 1), criterion(2, 1)],
                },
                GradingBenchmark {
                    id: 2,
                    assignment_id: 1,
                    heading: "CSS".to_string(),
                    comment: String::new(),
                    criteria: vec![criterion(3, 2)],
                },
            ],
        };
        assert_eq!(assignment.criteria_total(), 3);
        assert!(assignment.has_benchmarks());
    }

    #[test]
    fn test_is_manually_graded() {
        let mut assignment = Assignment {
            id: 1,
            course_id: 1,
            name: "lab1".to_string(),
            order: 1,
            is_group_lab: false,
            reviewers: 0,
            auto_approve: true,
            score_limit: 80,
            grading_benchmarks: vec![],
        };
        assert!(!assignment.is_manually_graded());
        assignment.reviewers = 2;
        assert!(assignment.is_manually_graded());
    }
}
