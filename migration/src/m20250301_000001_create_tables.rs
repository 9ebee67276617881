use sea_orm_migration::prelude::*;

/// 标识符最大长度（与 MySQL utf8mb4 索引限制保持一致）
const ID_LEN: u32 = 191;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string_len(ID_LEN)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(ID_LEN)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学位项目表
        manager
            .create_table(
                Table::create()
                    .table(DegreePrograms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DegreePrograms::Id)
                            .string_len(ID_LEN)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DegreePrograms::Name)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DegreePrograms::University)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DegreePrograms::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DegreePrograms::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建用户选课项目关联表
        manager
            .create_table(
                Table::create()
                    .table(UserDegreePrograms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserDegreePrograms::UserId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserDegreePrograms::DegreeProgramId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserDegreePrograms::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserDegreePrograms::UserId)
                            .col(UserDegreePrograms::DegreeProgramId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserDegreePrograms::Table, UserDegreePrograms::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                UserDegreePrograms::Table,
                                UserDegreePrograms::DegreeProgramId,
                            )
                            .to(DegreePrograms::Table, DegreePrograms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .string_len(ID_LEN)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::DegreeProgramId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string_len(ID_LEN).not_null())
                    .col(ColumnDef::new(Subjects::Year).integer().null())
                    .col(ColumnDef::new(Subjects::Term).string().not_null())
                    .col(
                        ColumnDef::new(Subjects::Credits)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Subjects::Hours)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Subjects::IsElective)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subjects::Table, Subjects::DegreeProgramId)
                            .to(DegreePrograms::Table, DegreePrograms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目先修关系表
        manager
            .create_table(
                Table::create()
                    .table(SubjectRequirements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectRequirements::SubjectId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectRequirements::RequirementId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectRequirements::MinStatus)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SubjectRequirements::SubjectId)
                            .col(SubjectRequirements::RequirementId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectRequirements::Table, SubjectRequirements::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                SubjectRequirements::Table,
                                SubjectRequirements::RequirementId,
                            )
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选修池表
        manager
            .create_table(
                Table::create()
                    .table(ElectivePools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ElectivePools::Id)
                            .string_len(ID_LEN)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ElectivePools::DegreeProgramId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectivePools::Name)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ElectivePools::Description).text().null())
                    .col(
                        ColumnDef::new(ElectivePools::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectivePools::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ElectivePools::Table, ElectivePools::DegreeProgramId)
                            .to(DegreePrograms::Table, DegreePrograms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选修池科目关联表
        manager
            .create_table(
                Table::create()
                    .table(ElectivePoolSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ElectivePoolSubjects::ElectivePoolId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectivePoolSubjects::SubjectId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ElectivePoolSubjects::ElectivePoolId)
                            .col(ElectivePoolSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ElectivePoolSubjects::Table,
                                ElectivePoolSubjects::ElectivePoolId,
                            )
                            .to(ElectivePools::Table, ElectivePools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ElectivePoolSubjects::Table, ElectivePoolSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选修规则表
        manager
            .create_table(
                Table::create()
                    .table(ElectiveRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ElectiveRules::Id)
                            .string_len(ID_LEN)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ElectiveRules::DegreeProgramId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectiveRules::PoolId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectiveRules::AppliesFromYear)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ElectiveRules::AppliesToYear).integer().null())
                    .col(
                        ColumnDef::new(ElectiveRules::RequirementType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectiveRules::MinimumValue)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectiveRules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectiveRules::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ElectiveRules::Table, ElectiveRules::DegreeProgramId)
                            .to(DegreePrograms::Table, DegreePrograms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ElectiveRules::Table, ElectiveRules::PoolId)
                            .to(ElectivePools::Table, ElectivePools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建用户科目进度表
        manager
            .create_table(
                Table::create()
                    .table(UserSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSubjects::UserId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSubjects::SubjectId)
                            .string_len(ID_LEN)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserSubjects::Status).string().not_null())
                    .col(ColumnDef::new(UserSubjects::FinalGrade).double().null())
                    .col(
                        ColumnDef::new(UserSubjects::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserSubjects::UserId)
                            .col(UserSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserSubjects::Table, UserSubjects::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserSubjects::Table, UserSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 科目表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subjects_degree_program_id")
                    .table(Subjects::Table)
                    .col(Subjects::DegreeProgramId)
                    .to_owned(),
            )
            .await?;

        // 先修关系反向索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subject_requirements_requirement_id")
                    .table(SubjectRequirements::Table)
                    .col(SubjectRequirements::RequirementId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_degree_programs_degree_program_id")
                    .table(UserDegreePrograms::Table)
                    .col(UserDegreePrograms::DegreeProgramId)
                    .to_owned(),
            )
            .await?;

        // 选修池与规则索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_elective_pools_degree_program_id")
                    .table(ElectivePools::Table)
                    .col(ElectivePools::DegreeProgramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_elective_pool_subjects_subject_id")
                    .table(ElectivePoolSubjects::Table)
                    .col(ElectivePoolSubjects::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_elective_rules_degree_program_id")
                    .table(ElectiveRules::Table)
                    .col(ElectiveRules::DegreeProgramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_elective_rules_pool_id")
                    .table(ElectiveRules::Table)
                    .col(ElectiveRules::PoolId)
                    .to_owned(),
            )
            .await?;

        // 用户科目进度索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_subjects_subject_id")
                    .table(UserSubjects::Table)
                    .col(UserSubjects::SubjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(UserSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ElectiveRules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ElectivePoolSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ElectivePools::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectRequirements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserDegreePrograms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DegreePrograms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DegreePrograms {
    #[sea_orm(iden = "degree_programs")]
    Table,
    Id,
    Name,
    University,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserDegreePrograms {
    #[sea_orm(iden = "user_degree_programs")]
    Table,
    UserId,
    DegreeProgramId,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    DegreeProgramId,
    Name,
    Year,
    Term,
    Credits,
    Hours,
    IsElective,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubjectRequirements {
    #[sea_orm(iden = "subject_requirements")]
    Table,
    SubjectId,
    RequirementId,
    MinStatus,
}

#[derive(DeriveIden)]
enum ElectivePools {
    #[sea_orm(iden = "elective_pools")]
    Table,
    Id,
    DegreeProgramId,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ElectivePoolSubjects {
    #[sea_orm(iden = "elective_pool_subjects")]
    Table,
    ElectivePoolId,
    SubjectId,
}

#[derive(DeriveIden)]
enum ElectiveRules {
    #[sea_orm(iden = "elective_rules")]
    Table,
    Id,
    DegreeProgramId,
    PoolId,
    AppliesFromYear,
    AppliesToYear,
    RequirementType,
    MinimumValue,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserSubjects {
    #[sea_orm(iden = "user_subjects")]
    Table,
    UserId,
    SubjectId,
    Status,
    FinalGrade,
    UpdatedAt,
}
