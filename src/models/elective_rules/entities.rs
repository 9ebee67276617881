use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 选修规则的计量方式
    RequirementType, "../frontend/src/types/generated/elective-rule.ts" {
        Hours => "hours",
        Credits => "credits",
        SubjectCount => "subject_count",
    }
}

// 选修规则：在年份区间内，从某个选修池至少修满 minimum_value
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-rule.ts")]
pub struct ElectiveRule {
    pub id: String,
    pub degree_program_id: String,
    pub pool_id: String,
    pub applies_from_year: i32,
    pub applies_to_year: Option<i32>,
    pub requirement_type: RequirementType,
    pub minimum_value: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
