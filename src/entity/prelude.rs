//! 预导入模块，方便使用

pub use super::degree_programs::{
    ActiveModel as DegreeProgramActiveModel, Entity as DegreePrograms, Model as DegreeProgramModel,
};
pub use super::elective_pool_subjects::{
    ActiveModel as ElectivePoolSubjectActiveModel, Entity as ElectivePoolSubjects,
    Model as ElectivePoolSubjectModel,
};
pub use super::elective_pools::{
    ActiveModel as ElectivePoolActiveModel, Entity as ElectivePools, Model as ElectivePoolModel,
};
pub use super::elective_rules::{
    ActiveModel as ElectiveRuleActiveModel, Entity as ElectiveRules, Model as ElectiveRuleModel,
};
pub use super::subject_requirements::{
    ActiveModel as SubjectRequirementActiveModel, Entity as SubjectRequirements,
    Model as SubjectRequirementModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::user_degree_programs::{
    ActiveModel as UserDegreeProgramActiveModel, Entity as UserDegreePrograms,
    Model as UserDegreeProgramModel,
};
pub use super::user_subjects::{
    ActiveModel as UserSubjectActiveModel, Entity as UserSubjects, Model as UserSubjectModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
