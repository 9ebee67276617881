//! 选修池实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "elective_pools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub degree_program_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::degree_programs::Entity",
        from = "Column::DegreeProgramId",
        to = "super::degree_programs::Column::Id"
    )]
    DegreeProgram,
    #[sea_orm(has_many = "super::elective_pool_subjects::Entity")]
    ElectivePoolSubjects,
    #[sea_orm(has_many = "super::elective_rules::Entity")]
    ElectiveRules,
}

impl Related<super::degree_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DegreeProgram.def()
    }
}

impl Related<super::elective_pool_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ElectivePoolSubjects.def()
    }
}

impl Related<super::elective_rules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ElectiveRules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_elective_pool(self) -> crate::models::elective_pools::entities::ElectivePool {
        use crate::models::elective_pools::entities::ElectivePool;

        ElectivePool {
            id: self.id,
            degree_program_id: self.degree_program_id,
            name: self.name,
            description: self.description,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
