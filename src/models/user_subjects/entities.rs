use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 学生在某科目上的状态
    SubjectStatus, "../frontend/src/types/generated/user-subject.ts" {
        Available => "available",
        InProgress => "in_progress",
        FinalPending => "final_pending",
        Passed => "passed",
        PassedWithDistinction => "passed_with_distinction",
    }
}

impl Default for SubjectStatus {
    fn default() -> Self {
        SubjectStatus::Available
    }
}

// 学生科目进度记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/user-subject.ts")]
pub struct UserSubject {
    pub user_id: String,
    pub subject_id: String,
    pub status: SubjectStatus,
    pub final_grade: Option<f64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 通过校验、待写入的一条进度
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub subject_id: String,
    pub status: SubjectStatus,
    pub final_grade: Option<f64>,
}

/// 一次同步的写入结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub upserted: usize,
    pub pruned: u64,
}
