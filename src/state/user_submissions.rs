//! 学生视角的提交表
//!
//! 按课程组织本人与所在小组的提交，作业维度上合并两类来源。

use dashmap::DashMap;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::owner::OwnerTable;

#[derive(Default)]
pub struct UserSubmissions {
    // 课程 ID -> 本人提交
    submissions: DashMap<i64, Vec<Submission>>,
    // 课程 ID -> 小组提交
    group_submissions: DashMap<i64, Vec<Submission>>,
}

impl UserSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_course(&self, course_id: i64) -> Vec<Submission> {
        self.submissions
            .get(&course_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    pub fn for_group(&self, course_id: i64) -> Vec<Submission> {
        self.group_submissions
            .get(&course_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    /// 某作业名下的全部提交（小组在前，个人在后）
    pub fn for_assignment(&self, assignment: &Assignment) -> Vec<Submission> {
        let mut submissions = Vec::new();
        for sub in self.for_group(assignment.course_id) {
            if sub.assignment_id == assignment.id {
                submissions.push(sub);
            }
        }
        for sub in self.for_course(assignment.course_id) {
            if sub.assignment_id == assignment.id {
                submissions.push(sub);
            }
        }
        submissions
    }

    pub fn by_id(&self, submission_id: i64) -> Option<Submission> {
        for entry in self.submissions.iter() {
            if let Some(submission) = entry.value().iter().find(|s| s.id == submission_id) {
                return Some(submission.clone());
            }
        }
        for entry in self.group_submissions.iter() {
            if let Some(submission) = entry.value().iter().find(|s| s.id == submission_id) {
                return Some(submission.clone());
            }
        }
        None
    }

    /// 按提交 ID 就地替换，所在课程列表不变
    pub fn update(&self, submission: Submission) {
        for mut entry in self.submissions.iter_mut() {
            if let Some(index) = entry.value().iter().position(|s| s.id == submission.id) {
                entry.value_mut()[index] = submission;
                return;
            }
        }
        for mut entry in self.group_submissions.iter_mut() {
            if let Some(index) = entry.value().iter().position(|s| s.id == submission.id) {
                entry.value_mut()[index] = submission;
                return;
            }
        }
    }

    pub fn set_submissions(&self, course_id: i64, table: OwnerTable, submissions: Vec<Submission>) {
        match table {
            OwnerTable::User => self.submissions.insert(course_id, submissions),
            OwnerTable::Group => self.group_submissions.insert(course_id, submissions),
        };
    }

    pub fn clear(&self) {
        self.submissions.clear();
        self.group_submissions.clear();
    }
}
