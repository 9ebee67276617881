//! 学位项目与注册关系存储操作

use super::SeaOrmStorage;
use crate::entity::degree_programs::{ActiveModel, Entity as DegreePrograms};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::user_degree_programs::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn,
    Entity as UserDegreePrograms,
};
use crate::errors::{AcadifyError, Result};
use crate::models::programs::{
    entities::{DegreeProgram, ProgramEnrollment},
    requests::CreateProgramRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学位项目
    pub async fn create_program_impl(&self, req: CreateProgramRequest) -> Result<DegreeProgram> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(req.name),
            university: Set(req.university),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("创建学位项目失败: {e}")))?;

        Ok(result.into_degree_program())
    }

    /// 通过 ID 获取学位项目
    pub async fn get_program_by_id_impl(&self, program_id: &str) -> Result<Option<DegreeProgram>> {
        let result = DegreePrograms::find_by_id(program_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询学位项目失败: {e}")))?;

        Ok(result.map(|m| m.into_degree_program()))
    }

    /// 学位项目下的科目数量
    pub async fn count_program_subjects_impl(&self, program_id: &str) -> Result<i64> {
        let count = Subjects::find()
            .filter(SubjectColumn::DegreeProgramId.eq(program_id))
            .count(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询科目数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 删除学位项目（外键级联删除科目、选修池、规则、注册与进度）
    pub async fn delete_program_impl(&self, program_id: &str) -> Result<bool> {
        let result = DegreePrograms::delete_by_id(program_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("删除学位项目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 注册学位项目
    pub async fn enroll_user_impl(
        &self,
        user_id: &str,
        program_id: &str,
    ) -> Result<ProgramEnrollment> {
        if self.get_program_by_id_impl(program_id).await?.is_none() {
            return Err(AcadifyError::not_found("Degree program not found"));
        }
        if self.is_user_enrolled_impl(user_id, program_id).await? {
            return Err(AcadifyError::conflict("Already enrolled in this program"));
        }

        let model = EnrollmentActiveModel {
            user_id: Set(user_id.to_string()),
            degree_program_id: Set(program_id.to_string()),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("注册学位项目失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 退出学位项目
    pub async fn unenroll_user_impl(&self, user_id: &str, program_id: &str) -> Result<bool> {
        let result = UserDegreePrograms::delete_many()
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::UserId.eq(user_id))
                    .add(EnrollmentColumn::DegreeProgramId.eq(program_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("退出学位项目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 是否已注册
    pub async fn is_user_enrolled_impl(&self, user_id: &str, program_id: &str) -> Result<bool> {
        let count = UserDegreePrograms::find()
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::UserId.eq(user_id))
                    .add(EnrollmentColumn::DegreeProgramId.eq(program_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询注册关系失败: {e}")))?;

        Ok(count > 0)
    }

    /// 按注册先后列出用户的学位项目
    pub async fn list_user_programs_impl(&self, user_id: &str) -> Result<Vec<DegreeProgram>> {
        let enrollments = UserDegreePrograms::find()
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .order_by_asc(EnrollmentColumn::EnrolledAt)
            .order_by_asc(EnrollmentColumn::DegreeProgramId)
            .find_also_related(DegreePrograms)
            .all(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询用户学位项目失败: {e}")))?;

        Ok(enrollments
            .into_iter()
            .filter_map(|(_, program)| program.map(|p| p.into_degree_program()))
            .collect())
    }
}

// 供其他存储模块的测试复用
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    };

    pub(crate) async fn program(storage: &SeaOrmStorage, name: &str) -> DegreeProgram {
        storage
            .create_program_impl(CreateProgramRequest {
                name: name.to_string(),
                university: "UTN".to_string(),
            })
            .await
            .unwrap()
    }

    pub(crate) async fn student(storage: &SeaOrmStorage, email: &str) -> User {
        storage
            .create_user_impl(CreateUserRequest {
                email: email.to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap()
    }
}
