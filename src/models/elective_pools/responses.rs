use serde::Serialize;
use ts_rs::TS;

use crate::models::elective_pools::entities::ElectivePool;

/// 选修池中的科目摘要
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct PoolSubjectSummary {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub credits: f64,
    pub hours: f64,
}

/// 选修池详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct ElectivePoolDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pool: ElectivePool,
    pub subjects: Vec<PoolSubjectSummary>,
}

/// 选修池列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct ElectivePoolListResponse {
    pub items: Vec<ElectivePoolDetailResponse>,
}
