use serde::Serialize;
use ts_rs::TS;

use crate::models::programs::entities::DegreeProgram;

/// 学位项目详情（附带科目数量）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct ProgramDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub program: DegreeProgram,
    pub subject_count: i64,
}

/// 学位项目列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct ProgramListResponse {
    pub items: Vec<DegreeProgram>,
}
