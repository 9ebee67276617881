//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_degree_programs::Entity")]
    UserDegreePrograms,
    #[sea_orm(has_many = "super::user_subjects::Entity")]
    UserSubjects,
}

impl Related<super::user_degree_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserDegreePrograms.def()
    }
}

impl Related<super::user_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSubjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole};

        User {
            id: self.id,
            email: self.email,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::User),
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
