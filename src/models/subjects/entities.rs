use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 科目开设周期
    SubjectTerm, "../frontend/src/types/generated/subject.ts" {
        Annual => "annual",
        Semester => "semester",
        Quarterly => "quarterly",
        Bimonthly => "bimonthly",
    }
}

impl Default for SubjectTerm {
    fn default() -> Self {
        SubjectTerm::Annual
    }
}

define_string_enum! {
    /// 先修科目需要达到的最低状态
    RequirementStatus, "../frontend/src/types/generated/subject.ts" {
        Passed => "passed",
        FinalPending => "final_pending",
    }
}

impl Default for RequirementStatus {
    fn default() -> Self {
        RequirementStatus::Passed
    }
}

// 科目实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: String,
    #[serde(rename = "degreeProgramID", alias = "degreeProgramId")]
    pub degree_program_id: String,
    pub name: String,
    pub year: Option<i32>,
    pub term: SubjectTerm,
    pub credits: f64,
    pub hours: f64,
    pub is_elective: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 先修关系（有向边：subject_id 依赖 requirement_id）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectRequirement {
    pub subject_id: String,
    pub requirement_id: String,
    pub min_status: RequirementStatus,
}
