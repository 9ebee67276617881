use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AcadifyError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let email = req.email.trim().to_string();

        let existing = Users::find()
            .filter(Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询用户失败: {e}")))?;
        if existing.is_some() {
            return Err(AcadifyError::conflict(format!("email already registered: {email}")));
        }

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(email),
            role: Set(req.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: &str) -> Result<Option<User>> {
        let result = Users::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询用户总数失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert_eq!(storage.count_users_impl().await.unwrap(), 0);

        let user = storage
            .create_user_impl(CreateUserRequest {
                email: " student@uni.edu ".into(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        assert_eq!(user.email, "student@uni.edu");

        let loaded = storage
            .get_user_by_id_impl(&user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, user.id);
        assert_eq!(loaded.role, UserRole::User);
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let req = CreateUserRequest {
            email: "a@b.c".into(),
            role: UserRole::Staff,
        };
        storage.create_user_impl(req.clone()).await.unwrap();
        let err = storage.create_user_impl(req).await.unwrap_err();
        assert_eq!(err.http_status(), 409);
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert!(
            storage
                .get_user_by_id_impl("ghost")
                .await
                .unwrap()
                .is_none()
        );
    }
}
