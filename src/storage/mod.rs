use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 学位项目方法
    // 创建学位项目
    async fn create_program(&self, program: CreateProgramRequest) -> Result<DegreeProgram>;
    // 通过ID获取学位项目
    async fn get_program_by_id(&self, program_id: &str) -> Result<Option<DegreeProgram>>;
    // 学位项目下的科目数量
    async fn count_program_subjects(&self, program_id: &str) -> Result<i64>;
    // 删除学位项目（级联）
    async fn delete_program(&self, program_id: &str) -> Result<bool>;

    /// 注册关系方法
    // 注册学位项目
    async fn enroll_user(&self, user_id: &str, program_id: &str) -> Result<ProgramEnrollment>;
    // 退出学位项目
    async fn unenroll_user(&self, user_id: &str, program_id: &str) -> Result<bool>;
    // 是否已注册
    async fn is_user_enrolled(&self, user_id: &str, program_id: &str) -> Result<bool>;
    // 按注册顺序列出用户的学位项目
    async fn list_user_programs(&self, user_id: &str) -> Result<Vec<DegreeProgram>>;

    /// 科目目录方法
    // 创建科目及其先修关系
    async fn create_subject(&self, subject: NewSubject) -> Result<SubjectDetailResponse>;
    // 获取科目详情
    async fn get_subject(&self, subject_id: &str) -> Result<Option<SubjectDetailResponse>>;
    // 列出学位项目的科目详情
    async fn list_program_subjects(&self, program_id: &str) -> Result<Vec<SubjectDetailResponse>>;
    // 更新科目（先修关系整体替换）
    async fn update_subject(
        &self,
        subject_id: &str,
        changes: SubjectChanges,
    ) -> Result<Option<SubjectDetailResponse>>;
    // 删除科目
    async fn delete_subject(&self, subject_id: &str) -> Result<bool>;
    // 学位项目下的科目行
    async fn list_subjects_by_program(&self, program_id: &str) -> Result<Vec<Subject>>;
    // 一组科目的先修关系
    async fn list_requirements_for_subjects(
        &self,
        subject_ids: &[String],
    ) -> Result<Vec<SubjectRequirement>>;

    /// 选修池方法
    async fn create_elective_pool(
        &self,
        program_id: &str,
        pool: CreateElectivePoolRequest,
    ) -> Result<ElectivePool>;
    async fn get_elective_pool(
        &self,
        program_id: &str,
        pool_id: &str,
    ) -> Result<Option<ElectivePoolDetailResponse>>;
    async fn list_elective_pools(&self, program_id: &str)
    -> Result<Vec<ElectivePoolDetailResponse>>;
    async fn update_elective_pool(
        &self,
        program_id: &str,
        pool_id: &str,
        update: UpdateElectivePoolRequest,
    ) -> Result<Option<ElectivePool>>;
    async fn delete_elective_pool(&self, program_id: &str, pool_id: &str) -> Result<bool>;
    // 向选修池添加科目
    async fn add_subject_to_pool(
        &self,
        program_id: &str,
        pool_id: &str,
        subject_id: &str,
    ) -> Result<ElectivePoolSubject>;
    // 从选修池移除科目
    async fn remove_subject_from_pool(
        &self,
        program_id: &str,
        pool_id: &str,
        subject_id: &str,
    ) -> Result<bool>;

    /// 选修规则方法
    async fn create_elective_rule(
        &self,
        program_id: &str,
        rule: RuleFields,
    ) -> Result<ElectiveRuleDetailResponse>;
    async fn get_elective_rule(
        &self,
        program_id: &str,
        rule_id: &str,
    ) -> Result<Option<ElectiveRuleDetailResponse>>;
    async fn list_elective_rules(&self, program_id: &str)
    -> Result<Vec<ElectiveRuleDetailResponse>>;
    async fn update_elective_rule(
        &self,
        program_id: &str,
        rule_id: &str,
        update: UpdateElectiveRuleRequest,
    ) -> Result<Option<ElectiveRuleDetailResponse>>;
    async fn delete_elective_rule(&self, program_id: &str, rule_id: &str) -> Result<bool>;

    /// 学习进度方法
    // 学位项目的全部科目ID
    async fn list_program_subject_ids(&self, program_id: &str) -> Result<Vec<String>>;
    // 用户在该学位项目内的进度行
    async fn list_user_subjects_in_program(
        &self,
        user_id: &str,
        program_id: &str,
    ) -> Result<Vec<UserSubject>>;
    // 同步进度：单事务内裁剪并写入
    async fn sync_user_subjects(
        &self,
        user_id: &str,
        program_id: &str,
        updates: Vec<ProgressUpdate>,
    ) -> Result<SyncOutcome>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
