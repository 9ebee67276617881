//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod elective_pools;
mod elective_rules;
mod programs;
mod subjects;
mod user_subjects;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{AcadifyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    pub(crate) reject_requirement_cycles: bool,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let storage = Self::connect(&config.database.url, &config.database).await?;
        Ok(storage.with_cycle_rejection(config.catalog.reject_requirement_cycles))
    }

    /// 按给定 URL 建立连接并运行迁移
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self {
            db,
            reject_requirement_cycles: false,
        })
    }

    /// 设置是否拒绝成环的先修关系
    pub fn with_cycle_rejection(mut self, reject: bool) -> Self {
        self.reject_requirement_cycles = reject;
        self
    }

    fn is_memory_url(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = Self::is_memory_url(url);

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AcadifyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        // 内存库每个连接都是独立的数据库，只能使用单连接
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("wal_autocheckpoint", "1000");
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| AcadifyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AcadifyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AcadifyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[cfg(test)]
impl SeaOrmStorage {
    /// 独立的内存数据库，每个测试一份
    pub(crate) async fn new_in_memory() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        Self::connect(&config.url, &config)
            .await
            .expect("in-memory storage")
    }
}

// Storage trait 实现
use crate::models::{
    elective_pools::{
        entities::{ElectivePool, ElectivePoolSubject},
        requests::{CreateElectivePoolRequest, UpdateElectivePoolRequest},
        responses::ElectivePoolDetailResponse,
    },
    elective_rules::{
        requests::{RuleFields, UpdateElectiveRuleRequest},
        responses::ElectiveRuleDetailResponse,
    },
    programs::{
        entities::{DegreeProgram, ProgramEnrollment},
        requests::CreateProgramRequest,
    },
    subjects::{
        entities::{Subject, SubjectRequirement},
        requests::{NewSubject, SubjectChanges},
        responses::SubjectDetailResponse,
    },
    user_subjects::entities::{ProgressUpdate, SyncOutcome, UserSubject},
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学位项目模块
    async fn create_program(&self, program: CreateProgramRequest) -> Result<DegreeProgram> {
        self.create_program_impl(program).await
    }

    async fn get_program_by_id(&self, program_id: &str) -> Result<Option<DegreeProgram>> {
        self.get_program_by_id_impl(program_id).await
    }

    async fn count_program_subjects(&self, program_id: &str) -> Result<i64> {
        self.count_program_subjects_impl(program_id).await
    }

    async fn delete_program(&self, program_id: &str) -> Result<bool> {
        self.delete_program_impl(program_id).await
    }

    async fn enroll_user(&self, user_id: &str, program_id: &str) -> Result<ProgramEnrollment> {
        self.enroll_user_impl(user_id, program_id).await
    }

    async fn unenroll_user(&self, user_id: &str, program_id: &str) -> Result<bool> {
        self.unenroll_user_impl(user_id, program_id).await
    }

    async fn is_user_enrolled(&self, user_id: &str, program_id: &str) -> Result<bool> {
        self.is_user_enrolled_impl(user_id, program_id).await
    }

    async fn list_user_programs(&self, user_id: &str) -> Result<Vec<DegreeProgram>> {
        self.list_user_programs_impl(user_id).await
    }

    // 科目模块
    async fn create_subject(&self, subject: NewSubject) -> Result<SubjectDetailResponse> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject(&self, subject_id: &str) -> Result<Option<SubjectDetailResponse>> {
        self.get_subject_impl(subject_id).await
    }

    async fn list_program_subjects(&self, program_id: &str) -> Result<Vec<SubjectDetailResponse>> {
        self.list_program_subjects_impl(program_id).await
    }

    async fn update_subject(
        &self,
        subject_id: &str,
        changes: SubjectChanges,
    ) -> Result<Option<SubjectDetailResponse>> {
        self.update_subject_impl(subject_id, changes).await
    }

    async fn delete_subject(&self, subject_id: &str) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }

    async fn list_subjects_by_program(&self, program_id: &str) -> Result<Vec<Subject>> {
        self.list_subjects_by_program_impl(program_id).await
    }

    async fn list_requirements_for_subjects(
        &self,
        subject_ids: &[String],
    ) -> Result<Vec<SubjectRequirement>> {
        self.list_requirements_for_subjects_impl(subject_ids).await
    }

    // 选修池模块
    async fn create_elective_pool(
        &self,
        program_id: &str,
        pool: CreateElectivePoolRequest,
    ) -> Result<ElectivePool> {
        self.create_elective_pool_impl(program_id, pool).await
    }

    async fn get_elective_pool(
        &self,
        program_id: &str,
        pool_id: &str,
    ) -> Result<Option<ElectivePoolDetailResponse>> {
        self.get_elective_pool_impl(program_id, pool_id).await
    }

    async fn list_elective_pools(
        &self,
        program_id: &str,
    ) -> Result<Vec<ElectivePoolDetailResponse>> {
        self.list_elective_pools_impl(program_id).await
    }

    async fn update_elective_pool(
        &self,
        program_id: &str,
        pool_id: &str,
        update: UpdateElectivePoolRequest,
    ) -> Result<Option<ElectivePool>> {
        self.update_elective_pool_impl(program_id, pool_id, update)
            .await
    }

    async fn delete_elective_pool(&self, program_id: &str, pool_id: &str) -> Result<bool> {
        self.delete_elective_pool_impl(program_id, pool_id).await
    }

    async fn add_subject_to_pool(
        &self,
        program_id: &str,
        pool_id: &str,
        subject_id: &str,
    ) -> Result<ElectivePoolSubject> {
        self.add_subject_to_pool_impl(program_id, pool_id, subject_id)
            .await
    }

    async fn remove_subject_from_pool(
        &self,
        program_id: &str,
        pool_id: &str,
        subject_id: &str,
    ) -> Result<bool> {
        self.remove_subject_from_pool_impl(program_id, pool_id, subject_id)
            .await
    }

    // 选修规则模块
    async fn create_elective_rule(
        &self,
        program_id: &str,
        rule: RuleFields,
    ) -> Result<ElectiveRuleDetailResponse> {
        self.create_elective_rule_impl(program_id, rule).await
    }

    async fn get_elective_rule(
        &self,
        program_id: &str,
        rule_id: &str,
    ) -> Result<Option<ElectiveRuleDetailResponse>> {
        self.get_elective_rule_impl(program_id, rule_id).await
    }

    async fn list_elective_rules(
        &self,
        program_id: &str,
    ) -> Result<Vec<ElectiveRuleDetailResponse>> {
        self.list_elective_rules_impl(program_id).await
    }

    async fn update_elective_rule(
        &self,
        program_id: &str,
        rule_id: &str,
        update: UpdateElectiveRuleRequest,
    ) -> Result<Option<ElectiveRuleDetailResponse>> {
        self.update_elective_rule_impl(program_id, rule_id, update)
            .await
    }

    async fn delete_elective_rule(&self, program_id: &str, rule_id: &str) -> Result<bool> {
        self.delete_elective_rule_impl(program_id, rule_id).await
    }

    // 学习进度模块
    async fn list_program_subject_ids(&self, program_id: &str) -> Result<Vec<String>> {
        self.list_program_subject_ids_impl(program_id).await
    }

    async fn list_user_subjects_in_program(
        &self,
        user_id: &str,
        program_id: &str,
    ) -> Result<Vec<UserSubject>> {
        self.list_user_subjects_in_program_impl(user_id, program_id)
            .await
    }

    async fn sync_user_subjects(
        &self,
        user_id: &str,
        program_id: &str,
        updates: Vec<ProgressUpdate>,
    ) -> Result<SyncOutcome> {
        self.sync_user_subjects_impl(user_id, program_id, updates)
            .await
    }
}
