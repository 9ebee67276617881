use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选修池
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct ElectivePool {
    pub id: String,
    pub degree_program_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 选修池与科目的关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct ElectivePoolSubject {
    pub elective_pool_id: String,
    pub subject_id: String,
}
