//! 选修池科目关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "elective_pool_subjects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub elective_pool_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::elective_pools::Entity",
        from = "Column::ElectivePoolId",
        to = "super::elective_pools::Column::Id"
    )]
    ElectivePool,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::elective_pools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ElectivePool.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_pool_subject(
        self,
    ) -> crate::models::elective_pools::entities::ElectivePoolSubject {
        use crate::models::elective_pools::entities::ElectivePoolSubject;

        ElectivePoolSubject {
            elective_pool_id: self.elective_pool_id,
            subject_id: self.subject_id,
        }
    }
}
