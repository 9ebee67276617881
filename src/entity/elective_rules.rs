//! 选修规则实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "elective_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub degree_program_id: String,
    pub pool_id: String,
    pub applies_from_year: i32,
    pub applies_to_year: Option<i32>,
    pub requirement_type: String,
    pub minimum_value: f64,
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
    #[sea_orm(
        belongs_to = "super::elective_pools::Entity",
        from = "Column::PoolId",
        to = "super::elective_pools::Column::Id"
    )]
    ElectivePool,
}

impl Related<super::degree_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DegreeProgram.def()
    }
}

impl Related<super::elective_pools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ElectivePool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_elective_rule(self) -> crate::models::elective_rules::entities::ElectiveRule {
        use crate::models::elective_rules::entities::{ElectiveRule, RequirementType};

        ElectiveRule {
            id: self.id,
            degree_program_id: self.degree_program_id,
            pool_id: self.pool_id,
            applies_from_year: self.applies_from_year,
            applies_to_year: self.applies_to_year,
            requirement_type: self
                .requirement_type
                .parse::<RequirementType>()
                .unwrap_or(RequirementType::Credits),
            minimum_value: self.minimum_value,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
