//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod degree_programs;
pub mod elective_pool_subjects;
pub mod elective_pools;
pub mod elective_rules;
pub mod subject_requirements;
pub mod subjects;
pub mod user_degree_programs;
pub mod user_subjects;
pub mod users;

use chrono::{DateTime, Utc};

/// 秒级时间戳转为 UTC 时间
pub(crate) fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
