//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub degree_program_id: String,
    pub name: String,
    pub year: Option<i32>,
    pub term: String,
    pub credits: f64,
    pub hours: f64,
    pub is_elective: bool,
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
    #[sea_orm(has_many = "super::user_subjects::Entity")]
    UserSubjects,
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

impl Related<super::user_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSubjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_subject(self) -> crate::models::subjects::entities::Subject {
        use crate::models::subjects::entities::{Subject, SubjectTerm};

        Subject {
            id: self.id,
            degree_program_id: self.degree_program_id,
            name: self.name,
            year: self.year,
            term: self.term.parse::<SubjectTerm>().unwrap_or_default(),
            credits: self.credits,
            hours: self.hours,
            is_elective: self.is_elective,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
