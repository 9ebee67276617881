//! 数据模型定义
//!
//! 按业务域划分为 entities / requests / responses 三类，
//! 所有对外暴露的结构都会通过 ts-rs 导出为前端类型。

pub mod common;
pub mod elective_pools;
pub mod elective_rules;
pub mod programs;
pub mod subjects;
pub mod user_subjects;
pub mod users;

pub use common::response::ApiResponse;

use serde::Serialize;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    PayloadTooLarge = 1013,

    // 学位项目 2xxx
    ProgramNotFound = 2000,
    ProgramCreationFailed = 2001,
    ProgramDeleteFailed = 2002,
    ProgramAlreadyEnrolled = 2003,
    ProgramNotEnrolled = 2004,
    ProgramNotSelected = 2005,

    // 科目 3xxx
    SubjectNotFound = 3000,
    SubjectCreationFailed = 3001,
    SubjectUpdateFailed = 3002,
    SubjectDeleteFailed = 3003,
    SubjectRequirementInvalid = 3004,

    // 选修池 4xxx
    ElectivePoolNotFound = 4000,
    ElectivePoolCreationFailed = 4001,
    ElectivePoolUpdateFailed = 4002,
    ElectivePoolDeleteFailed = 4003,
    ElectivePoolSubjectExists = 4004,
    ElectivePoolSubjectNotFound = 4005,

    // 选修规则 5xxx
    ElectiveRuleNotFound = 5000,
    ElectiveRuleCreationFailed = 5001,
    ElectiveRuleUpdateFailed = 5002,
    ElectiveRuleDeleteFailed = 5003,
    ElectiveRuleInvalid = 5004,

    // 学习进度 6xxx
    ProgressLoadFailed = 6000,
    ProgressSyncFailed = 6001,
    ProgressEntryInvalid = 6002,
}
