//! 科目先修关系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subject_requirements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub requirement_id: String,
    pub min_status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::RequirementId",
        to = "super::subjects::Column::Id"
    )]
    Requirement,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subject_requirement(
        self,
    ) -> crate::models::subjects::entities::SubjectRequirement {
        use crate::models::subjects::entities::{RequirementStatus, SubjectRequirement};

        SubjectRequirement {
            subject_id: self.subject_id,
            requirement_id: self.requirement_id,
            min_status: self
                .min_status
                .parse::<RequirementStatus>()
                .unwrap_or_default(),
        }
    }
}
