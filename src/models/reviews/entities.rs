use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::{CriterionGrade, GradingBenchmark};

/// 一位评审人对一次提交的人工评审
///
/// grading_benchmarks 是创建评审时从作业模板克隆出的独立副本，
/// 对它的修改不影响模板，也不影响其他评审。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct Review {
    pub id: i64,
    pub submission_id: i64,
    pub reviewer_id: i64,
    pub grading_benchmarks: Vec<GradingBenchmark>,
    // 0-100
    pub score: u32,
    pub ready: bool,
    pub feedback: String,
    pub edited: Option<chrono::DateTime<chrono::Utc>>,
}

impl Review {
    pub fn new(submission_id: i64, reviewer_id: i64) -> Self {
        Self {
            id: 0,
            submission_id,
            reviewer_id,
            grading_benchmarks: vec![],
            score: 0,
            ready: false,
            feedback: String::new(),
            edited: None,
        }
    }

    pub fn is_author(&self, user_id: i64) -> bool {
        self.reviewer_id == user_id
    }

    /// 本评审克隆树中已评定的评分项数
    pub fn graded_count(&self) -> usize {
        self.grading_benchmarks
            .iter()
            .flat_map(|bm| bm.criteria.iter())
            .filter(|c| c.grade != CriterionGrade::None)
            .count()
    }

    /// 就绪前置条件：已评定数达到模板的评分项总数
    ///
    /// total 来自当前作业模板，graded 来自本评审的克隆树，
    /// 两个来源不可混用。
    pub fn is_fully_graded(&self, total: usize) -> bool {
        self.graded_count() >= total
    }

    /// 计算评审得分
    ///
    /// 有通过项带分值时按分值求和，否则按通过项数均分。
    /// 两个分支都是历史量规模板的既定行为，保持原样。
    pub fn compute_score(&self) -> u32 {
        let mut score: u32 = 0;
        let mut passed: usize = 0;
        let mut total: usize = 0;
        for benchmark in &self.grading_benchmarks {
            for criterion in &benchmark.criteria {
                total += 1;
                if criterion.grade == CriterionGrade::Passed {
                    score += criterion.points;
                    passed += 1;
                }
            }
        }
        if score == 0 && total > 0 {
            score = (100 * passed / total) as u32;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::GradingCriterion;

    fn review_with_criteria(points: u32, grades: &[CriterionGrade]) -> Review {
        let criteria = grades
            .iter()
            .enumerate()
            .map(|(i, grade)| GradingCriterion {
                id: i as i64 + 1,
                benchmark_id: 1,
                description: format!("criterion {}", i + 1),
                points,
                grade: *grade,
                comment: String::new(),
            })
            .collect();
        Review {
            grading_benchmarks: vec![GradingBenchmark {
                id: 1,
                assignment_id: 1,
                heading: "Benchmark".to_string(),
                comment: String::new(),
                criteria,
            }],
            ..Review::new(1, 1)
        }
    }

    #[test]
    fn test_compute_score_weighted_branch() {
        let review =
            review_with_criteria(10, &[CriterionGrade::Passed, CriterionGrade::Passed]);
        assert_eq!(review.compute_score(), 20);
    }

    #[test]
    fn test_compute_score_uniform_branch() {
        let review = review_with_criteria(0, &[CriterionGrade::Passed, CriterionGrade::Passed]);
        assert_eq!(review.compute_score(), 100);
    }

    #[test]
    fn test_compute_score_uniform_partial() {
        let review = review_with_criteria(
            0,
            &[
                CriterionGrade::Passed,
                CriterionGrade::Failed,
                CriterionGrade::None,
            ],
        );
        assert_eq!(review.compute_score(), 33);
    }

    #[test]
    fn test_compute_score_empty_tree() {
        let review = Review::new(1, 1);
        assert_eq!(review.compute_score(), 0);
    }

    #[test]
    fn test_compute_score_failed_only_uniform_zero() {
        let review = review_with_criteria(10, &[CriterionGrade::Failed, CriterionGrade::Failed]);
        assert_eq!(review.compute_score(), 0);
    }

    #[test]
    fn test_graded_count_ignores_none() {
        let review = review_with_criteria(
            5,
            &[
                CriterionGrade::Passed,
                CriterionGrade::Failed,
                CriterionGrade::None,
            ],
        );
        assert_eq!(review.graded_count(), 2);
        assert!(!review.is_fully_graded(3));
        assert!(review.is_fully_graded(2));
    }

    #[test]
    fn test_is_author() {
        let review = Review::new(1, 42);
        assert!(review.is_author(42));
        assert!(!review.is_author(7));
    }
}
