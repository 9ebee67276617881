//! 学位项目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "degree_programs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub university: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subjects::Entity")]
    Subjects,
    #[sea_orm(has_many = "super::elective_pools::Entity")]
    ElectivePools,
    #[sea_orm(has_many = "super::elective_rules::Entity")]
    ElectiveRules,
    #[sea_orm(has_many = "super::user_degree_programs::Entity")]
    UserDegreePrograms,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl Related<super::elective_pools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ElectivePools.def()
    }
}

impl Related<super::elective_rules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ElectiveRules.def()
    }
}

impl Related<super::user_degree_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserDegreePrograms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_degree_program(self) -> crate::models::programs::entities::DegreeProgram {
        use crate::models::programs::entities::DegreeProgram;

        DegreeProgram {
            id: self.id,
            name: self.name,
            university: self.university,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
