//! 提交索引
//!
//! 每门课程的权威内存表：每个 (归属方, 作业) 至多一条提交。
//! 支持按归属方查询、按提交 ID 查询、反查归属方，以及替换式更新。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;

use crate::models::submissions::entities::Submission;
use crate::models::submissions::owner::{Owner, OwnerTable};

/// 按归属方分表的批量快照
pub type OwnerSubmissionMap = HashMap<i64, Vec<Submission>>;

#[derive(Default)]
pub struct SubmissionIndex {
    // 个人表：选课记录 ID -> 提交序列
    user_submissions: DashMap<i64, Vec<Submission>>,
    // 小组表：小组 ID -> 提交序列
    group_submissions: DashMap<i64, Vec<Submission>>,
    // 单调时钟：单条更新为归属键打点，批量快照携带签发时的读数，
    // 过期快照不得覆盖之后应用的单条更新
    clock: AtomicU64,
    touched: DashMap<(OwnerTable, i64), u64>,
}

impl SubmissionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 归属方名下的提交序列，缺席时为空序列
    pub fn for_owner(&self, owner: &Owner) -> Vec<Submission> {
        let entry = match owner {
            Owner::Enrollment(id) => self.user_submissions.get(id),
            Owner::Group(id) => self.group_submissions.get(id),
        };
        entry.map(|e| e.value().clone()).unwrap_or_default()
    }

    /// 按提交 ID 在两张表中线性查找
    pub fn by_id(&self, id: i64) -> Option<Submission> {
        for entry in self.user_submissions.iter() {
            if let Some(submission) = entry.value().iter().find(|s| s.id == id) {
                return Some(submission.clone());
            }
        }
        for entry in self.group_submissions.iter() {
            if let Some(submission) = entry.value().iter().find(|s| s.id == id) {
                return Some(submission.clone());
            }
        }
        None
    }

    /// 反查提交的归属方
    ///
    /// 先查个人表：命中条目自带 group_id 时归属小组（小组作业
    /// 镜像在成员行下），否则归属该选课记录；再查小组表。
    pub fn owner_by_id(&self, id: i64) -> Option<Owner> {
        for entry in self.user_submissions.iter() {
            if let Some(submission) = entry.value().iter().find(|s| s.id == id) {
                if submission.group_id > 0 {
                    return Some(Owner::Group(submission.group_id));
                }
                return Some(Owner::Enrollment(*entry.key()));
            }
        }
        for entry in self.group_submissions.iter() {
            if entry.value().iter().any(|s| s.id == id) {
                return Some(Owner::Group(*entry.key()));
            }
        }
        None
    }

    /// 替换归属方名下同作业的条目
    ///
    /// 无匹配条目时不做任何事：更新只刷新既有归属关系，
    /// 从不建立新的归属关系。
    pub fn update(&self, owner: &Owner, submission: Submission) {
        let (table, key) = match owner {
            Owner::Enrollment(id) => (OwnerTable::User, *id),
            Owner::Group(id) => (OwnerTable::Group, *id),
        };
        let map = match table {
            OwnerTable::User => &self.user_submissions,
            OwnerTable::Group => &self.group_submissions,
        };
        let Some(mut entry) = map.get_mut(&key) else {
            debug!("Ignoring update for unknown owner {owner:?}");
            return;
        };
        let Some(index) = entry
            .value()
            .iter()
            .position(|s| s.assignment_id == submission.assignment_id)
        else {
            debug!(
                "Ignoring update for assignment {} not held by {owner:?}",
                submission.assignment_id
            );
            return;
        };
        entry.value_mut()[index] = submission;
        drop(entry);
        let stamp = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
        self.touched.insert((table, key), stamp);
    }

    /// 批量快照应用前调用，取当前时钟读数作为新鲜度凭据
    pub fn snapshot_token(&self) -> u64 {
        self.clock.load(Ordering::SeqCst)
    }

    /// 用服务端快照整体替换一张表
    ///
    /// 凭据之后有过单条更新的归属键保留本地条目（就近合并），
    /// 其余键以快照为准，快照中缺席的键被移除。
    pub fn set_submissions(&self, table: OwnerTable, snapshot: OwnerSubmissionMap, token: u64) {
        let map = match table {
            OwnerTable::User => &self.user_submissions,
            OwnerTable::Group => &self.group_submissions,
        };
        let fresh = |key: i64| {
            self.touched
                .get(&(table, key))
                .map(|stamp| *stamp > token)
                .unwrap_or(false)
        };

        let existing: Vec<i64> = map.iter().map(|entry| *entry.key()).collect();
        for key in existing {
            if !snapshot.contains_key(&key) && !fresh(key) {
                map.remove(&key);
            }
        }
        for (key, submissions) in snapshot {
            if fresh(key) {
                debug!("Keeping locally newer submissions for owner key {key}");
                continue;
            }
            map.insert(key, submissions);
        }
    }

    pub fn clear(&self) {
        self.user_submissions.clear();
        self.group_submissions.clear();
        self.touched.clear();
    }
}
