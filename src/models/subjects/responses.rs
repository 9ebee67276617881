use serde::Serialize;
use ts_rs::TS;

use crate::models::subjects::entities::{RequirementStatus, Subject};

/// 已解析的先修条件（带名称）
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct RequirementSummary {
    pub id: String,
    pub name: String,
    pub min_status: RequirementStatus,
}

/// 科目详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub subject: Subject,
    pub requirements: Vec<RequirementSummary>,
}

/// 科目列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<SubjectDetailResponse>,
}
