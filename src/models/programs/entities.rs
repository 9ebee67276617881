use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学位项目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct DegreeProgram {
    pub id: String,
    pub name: String,
    pub university: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 用户在学位项目中的注册记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct ProgramEnrollment {
    pub user_id: String,
    pub degree_program_id: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
