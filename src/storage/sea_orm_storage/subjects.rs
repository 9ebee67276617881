//! 科目目录与先修关系存储操作
//!
//! 科目行与先修边总在同一事务中写入，任何一步失败都整体回滚。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::degree_programs::Entity as DegreePrograms;
use crate::entity::elective_pool_subjects::{
    Column as PoolSubjectColumn, Entity as ElectivePoolSubjects,
};
use crate::entity::subject_requirements::{
    ActiveModel as RequirementActiveModel, Column as RequirementColumn,
    Entity as SubjectRequirements,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects, Model as SubjectModel};
use crate::errors::{AcadifyError, Result};
use crate::models::subjects::{
    entities::{Subject, SubjectRequirement},
    requests::{NewSubject, ResolvedRequirement, SubjectChanges},
    responses::{RequirementSummary, SubjectDetailResponse},
};
use crate::utils::requirement_graph::RequirementGraph;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建科目及其先修关系
    pub async fn create_subject_impl(&self, req: NewSubject) -> Result<SubjectDetailResponse> {
        let now = chrono::Utc::now().timestamp();
        let subject_id = uuid::Uuid::new_v4().to_string();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("开启事务失败: {e}")))?;

        let program = DegreePrograms::find_by_id(req.degree_program_id.clone())
            .one(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询学位项目失败: {e}")))?;
        if program.is_none() {
            return Err(AcadifyError::referential("unknown degree program"));
        }

        self.check_requirements(&txn, &req.degree_program_id, &subject_id, &req.requirements)
            .await?;

        let model = ActiveModel {
            id: Set(subject_id.clone()),
            degree_program_id: Set(req.degree_program_id),
            name: Set(req.name),
            year: Set(req.year),
            term: Set(req.term.to_string()),
            credits: Set(req.credits),
            hours: Set(req.hours),
            is_elective: Set(req.is_elective),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model
            .insert(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("创建科目失败: {e}")))?;

        insert_requirements(&txn, &subject_id, &req.requirements).await?;

        txn.commit()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_subject_impl(&subject_id)
            .await?
            .ok_or_else(|| AcadifyError::database_operation("创建后未找到科目"))
    }

    /// 获取科目详情（含已解析的先修条件）
    pub async fn get_subject_impl(
        &self,
        subject_id: &str,
    ) -> Result<Option<SubjectDetailResponse>> {
        let subject = Subjects::find_by_id(subject_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询科目失败: {e}")))?;

        match subject {
            Some(subject) => Ok(self.build_subject_details(vec![subject]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 列出学位项目的科目详情
    pub async fn list_program_subjects_impl(
        &self,
        program_id: &str,
    ) -> Result<Vec<SubjectDetailResponse>> {
        let subjects = self.find_program_subject_models(program_id).await?;
        self.build_subject_details(subjects).await
    }

    /// 更新科目；requirements 给出时整体替换先修边
    pub async fn update_subject_impl(
        &self,
        subject_id: &str,
        changes: SubjectChanges,
    ) -> Result<Option<SubjectDetailResponse>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Subjects::find_by_id(subject_id.to_string())
            .one(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询科目失败: {e}")))?
        else {
            return Ok(None);
        };

        let target_program = changes
            .degree_program_id
            .clone()
            .unwrap_or_else(|| existing.degree_program_id.clone());
        let program_changed = target_program != existing.degree_program_id;

        if program_changed {
            self.check_program_move(&txn, &existing, &target_program)
                .await?;
        }

        // 新的边集：显式给出的，或迁移项目时沿用的旧边
        match &changes.requirements {
            Some(requirements) => {
                self.check_requirements(&txn, &target_program, subject_id, requirements)
                    .await?;
            }
            None if program_changed => {
                let current = load_requirements(&txn, subject_id).await?;
                self.check_requirements(&txn, &target_program, subject_id, &current)
                    .await?;
            }
            None => {}
        }

        let mut model: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(year) = changes.year {
            model.year = Set(Some(year));
        }
        if program_changed {
            model.degree_program_id = Set(target_program);
        }
        if let Some(term) = changes.term {
            model.term = Set(term.to_string());
        }
        if let Some(credits) = changes.credits {
            model.credits = Set(credits);
        }
        if let Some(hours) = changes.hours {
            model.hours = Set(hours);
        }
        if let Some(is_elective) = changes.is_elective {
            model.is_elective = Set(is_elective);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("更新科目失败: {e}")))?;

        if let Some(requirements) = &changes.requirements {
            SubjectRequirements::delete_many()
                .filter(RequirementColumn::SubjectId.eq(subject_id))
                .exec(&txn)
                .await
                .map_err(|e| AcadifyError::database_operation(format!("删除先修关系失败: {e}")))?;
            insert_requirements(&txn, subject_id, requirements).await?;
        }

        txn.commit()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_subject_impl(subject_id).await
    }

    /// 删除科目（外键级联删除先修边、选修池关联与进度）
    pub async fn delete_subject_impl(&self, subject_id: &str) -> Result<bool> {
        let result = Subjects::delete_by_id(subject_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学位项目下的科目
    pub async fn list_subjects_by_program_impl(&self, program_id: &str) -> Result<Vec<Subject>> {
        let subjects = self.find_program_subject_models(program_id).await?;
        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 一组科目的全部先修边
    pub async fn list_requirements_for_subjects_impl(
        &self,
        subject_ids: &[String],
    ) -> Result<Vec<SubjectRequirement>> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        let edges = SubjectRequirements::find()
            .filter(RequirementColumn::SubjectId.is_in(subject_ids.iter().cloned()))
            .order_by_asc(RequirementColumn::SubjectId)
            .order_by_asc(RequirementColumn::RequirementId)
            .all(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询先修关系失败: {e}")))?;

        Ok(edges
            .into_iter()
            .map(|m| m.into_subject_requirement())
            .collect())
    }

    async fn find_program_subject_models(&self, program_id: &str) -> Result<Vec<SubjectModel>> {
        Subjects::find()
            .filter(Column::DegreeProgramId.eq(program_id))
            .order_by_asc(Column::Year)
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询科目列表失败: {e}")))
    }

    /// 为科目附上带名称的先修条件
    async fn build_subject_details(
        &self,
        subjects: Vec<SubjectModel>,
    ) -> Result<Vec<SubjectDetailResponse>> {
        let ids: Vec<String> = subjects.iter().map(|s| s.id.clone()).collect();
        let edges = self.list_requirements_for_subjects_impl(&ids).await?;

        let requirement_ids: Vec<String> = edges.iter().map(|e| e.requirement_id.clone()).collect();
        let names: HashMap<String, String> = if requirement_ids.is_empty() {
            HashMap::new()
        } else {
            Subjects::find()
                .filter(Column::Id.is_in(requirement_ids))
                .all(&self.db)
                .await
                .map_err(|e| AcadifyError::database_operation(format!("查询先修科目失败: {e}")))?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect()
        };

        let mut by_subject: HashMap<String, Vec<RequirementSummary>> = HashMap::new();
        for edge in edges {
            let name = names.get(&edge.requirement_id).cloned().unwrap_or_default();
            by_subject
                .entry(edge.subject_id)
                .or_default()
                .push(RequirementSummary {
                    id: edge.requirement_id,
                    name,
                    min_status: edge.min_status,
                });
        }

        Ok(subjects
            .into_iter()
            .map(|model| {
                let requirements = by_subject.remove(&model.id).unwrap_or_default();
                SubjectDetailResponse {
                    subject: model.into_subject(),
                    requirements,
                }
            })
            .collect())
    }

    /// 校验先修列表：全部存在、同属一个学位项目，按配置拒绝成环
    async fn check_requirements<C: ConnectionTrait>(
        &self,
        conn: &C,
        program_id: &str,
        subject_id: &str,
        requirements: &[ResolvedRequirement],
    ) -> Result<()> {
        if requirements.is_empty() {
            return Ok(());
        }

        let ids: Vec<String> = requirements
            .iter()
            .map(|r| r.requirement_id.clone())
            .collect();
        let found: HashMap<String, String> = Subjects::find()
            .filter(Column::Id.is_in(ids))
            .all(conn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询先修科目失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.degree_program_id))
            .collect();

        for requirement in requirements {
            match found.get(&requirement.requirement_id) {
                None => return Err(AcadifyError::referential("unknown requirement subject")),
                Some(owner) if owner != program_id => {
                    return Err(AcadifyError::referential(
                        "requirement subject belongs to another program",
                    ));
                }
                Some(_) => {}
            }
        }

        if self.reject_requirement_cycles {
            let program_subjects: Vec<String> = Subjects::find()
                .filter(Column::DegreeProgramId.eq(program_id))
                .all(conn)
                .await
                .map_err(|e| AcadifyError::database_operation(format!("查询科目列表失败: {e}")))?
                .into_iter()
                .map(|m| m.id)
                .collect();
            let existing = SubjectRequirements::find()
                .filter(RequirementColumn::SubjectId.is_in(program_subjects))
                .filter(RequirementColumn::SubjectId.ne(subject_id))
                .all(conn)
                .await
                .map_err(|e| AcadifyError::database_operation(format!("查询先修关系失败: {e}")))?;

            let mut graph = RequirementGraph::new();
            for edge in &existing {
                graph.add_edge(&edge.subject_id, &edge.requirement_id);
            }
            for requirement in requirements {
                graph.add_edge(subject_id, &requirement.requirement_id);
            }
            if graph.has_cycle() {
                return Err(AcadifyError::validation("requirement cycle detected"));
            }
        }

        Ok(())
    }

    /// 更换所属学位项目前的检查
    async fn check_program_move<C: ConnectionTrait>(
        &self,
        conn: &C,
        subject: &SubjectModel,
        target_program: &str,
    ) -> Result<()> {
        let program = DegreePrograms::find_by_id(target_program.to_string())
            .one(conn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询学位项目失败: {e}")))?;
        if program.is_none() {
            return Err(AcadifyError::referential("unknown degree program"));
        }

        let pool_links = ElectivePoolSubjects::find()
            .filter(PoolSubjectColumn::SubjectId.eq(subject.id.as_str()))
            .count(conn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询选修池关联失败: {e}")))?;
        if pool_links > 0 {
            return Err(AcadifyError::referential(
                "subject is linked to elective pools of its current program",
            ));
        }

        let dependents = SubjectRequirements::find()
            .filter(RequirementColumn::RequirementId.eq(subject.id.as_str()))
            .count(conn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询先修关系失败: {e}")))?;
        if dependents > 0 {
            return Err(AcadifyError::referential(
                "subject is required by other subjects of its current program",
            ));
        }

        Ok(())
    }
}

async fn load_requirements<C: ConnectionTrait>(
    conn: &C,
    subject_id: &str,
) -> Result<Vec<ResolvedRequirement>> {
    let edges = SubjectRequirements::find()
        .filter(RequirementColumn::SubjectId.eq(subject_id))
        .all(conn)
        .await
        .map_err(|e| AcadifyError::database_operation(format!("查询先修关系失败: {e}")))?;

    Ok(edges
        .into_iter()
        .map(|m| {
            let edge = m.into_subject_requirement();
            ResolvedRequirement {
                requirement_id: edge.requirement_id,
                min_status: edge.min_status,
            }
        })
        .collect())
}

async fn insert_requirements<C: ConnectionTrait>(
    conn: &C,
    subject_id: &str,
    requirements: &[ResolvedRequirement],
) -> Result<()> {
    if requirements.is_empty() {
        return Ok(());
    }

    let rows = requirements.iter().map(|r| RequirementActiveModel {
        subject_id: Set(subject_id.to_string()),
        requirement_id: Set(r.requirement_id.clone()),
        min_status: Set(r.min_status.to_string()),
    });

    SubjectRequirements::insert_many(rows)
        .exec_without_returning(conn)
        .await
        .map_err(|e| AcadifyError::database_operation(format!("写入先修关系失败: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::programs::fixtures::program;
    use super::*;
    use crate::models::subjects::entities::{RequirementStatus, SubjectTerm};

    fn new_subject(
        program_id: &str,
        name: &str,
        requirements: &[(&str, RequirementStatus)],
    ) -> NewSubject {
        NewSubject {
            name: name.to_string(),
            year: Some(1),
            degree_program_id: program_id.to_string(),
            term: SubjectTerm::Annual,
            credits: 6.0,
            hours: 96.0,
            is_elective: false,
            requirements: requirements
                .iter()
                .map(|(id, status)| ResolvedRequirement {
                    requirement_id: id.to_string(),
                    min_status: *status,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_subject_resolves_requirements() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "Análisis I", &[]))
            .await
            .unwrap();
        let b = storage
            .create_subject_impl(new_subject(
                &p.id,
                "Análisis II",
                &[(&a.subject.id, RequirementStatus::FinalPending)],
            ))
            .await
            .unwrap();

        assert_eq!(b.requirements.len(), 1);
        assert_eq!(b.requirements[0].id, a.subject.id);
        assert_eq!(b.requirements[0].name, "Análisis I");
        assert_eq!(b.requirements[0].min_status, RequirementStatus::FinalPending);
    }

    #[tokio::test]
    async fn test_unknown_requirement_rejects_whole_create() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "A", &[]))
            .await
            .unwrap();

        let err = storage
            .create_subject_impl(new_subject(
                &p.id,
                "B",
                &[
                    (&a.subject.id, RequirementStatus::Passed),
                    ("does-not-exist", RequirementStatus::Passed),
                ],
            ))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "unknown requirement subject");
        assert_eq!(err.http_status(), 400);

        // 没有任何残留：科目和先修边都未写入
        let subjects = storage.list_subjects_by_program_impl(&p.id).await.unwrap();
        assert_eq!(subjects.len(), 1);
        let edges = SubjectRequirements::find().all(&storage.db).await.unwrap();
        assert!(edges.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_program_is_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let err = storage
            .create_subject_impl(new_subject("missing", "A", &[]))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "unknown degree program");
    }

    #[tokio::test]
    async fn test_cross_program_requirement_is_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let other = storage
            .create_subject_impl(new_subject(&q.id, "Other", &[]))
            .await
            .unwrap();

        let err = storage
            .create_subject_impl(new_subject(
                &p.id,
                "A",
                &[(&other.subject.id, RequirementStatus::Passed)],
            ))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "requirement subject belongs to another program");
    }

    #[tokio::test]
    async fn test_update_replaces_and_clears_requirements() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "A", &[]))
            .await
            .unwrap();
        let b = storage
            .create_subject_impl(new_subject(&p.id, "B", &[]))
            .await
            .unwrap();
        let c = storage
            .create_subject_impl(new_subject(
                &p.id,
                "C",
                &[(&a.subject.id, RequirementStatus::Passed)],
            ))
            .await
            .unwrap();

        let updated = storage
            .update_subject_impl(
                &c.subject.id,
                SubjectChanges {
                    name: Some("C2".into()),
                    requirements: Some(vec![ResolvedRequirement {
                        requirement_id: b.subject.id.clone(),
                        min_status: RequirementStatus::Passed,
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.subject.name, "C2");
        assert_eq!(updated.requirements.len(), 1);
        assert_eq!(updated.requirements[0].id, b.subject.id);

        let cleared = storage
            .update_subject_impl(
                &c.subject.id,
                SubjectChanges {
                    requirements: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.requirements.is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_state() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "A", &[]))
            .await
            .unwrap();
        let b = storage
            .create_subject_impl(new_subject(
                &p.id,
                "B",
                &[(&a.subject.id, RequirementStatus::Passed)],
            ))
            .await
            .unwrap();

        let err = storage
            .update_subject_impl(
                &b.subject.id,
                SubjectChanges {
                    name: Some("renamed".into()),
                    requirements: Some(vec![ResolvedRequirement {
                        requirement_id: "ghost".into(),
                        min_status: RequirementStatus::Passed,
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 400);

        let reloaded = storage
            .get_subject_impl(&b.subject.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.subject.name, "B");
        assert_eq!(reloaded.requirements.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_subject_is_none() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let result = storage
            .update_subject_impl("ghost", SubjectChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_program_move_rejected_with_dependents() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "A", &[]))
            .await
            .unwrap();
        storage
            .create_subject_impl(new_subject(
                &p.id,
                "B",
                &[(&a.subject.id, RequirementStatus::Passed)],
            ))
            .await
            .unwrap();

        let err = storage
            .update_subject_impl(
                &a.subject.id,
                SubjectChanges {
                    degree_program_id: Some(q.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[tokio::test]
    async fn test_program_move_allowed_for_isolated_subject() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "A", &[]))
            .await
            .unwrap();

        let moved = storage
            .update_subject_impl(
                &a.subject.id,
                SubjectChanges {
                    degree_program_id: Some(q.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.subject.degree_program_id, q.id);
    }

    #[tokio::test]
    async fn test_cycles_allowed_unless_configured() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "A", &[]))
            .await
            .unwrap();
        let b = storage
            .create_subject_impl(new_subject(
                &p.id,
                "B",
                &[(&a.subject.id, RequirementStatus::Passed)],
            ))
            .await
            .unwrap();
        let back_edge = SubjectChanges {
            requirements: Some(vec![ResolvedRequirement {
                requirement_id: b.subject.id.clone(),
                min_status: RequirementStatus::Passed,
            }]),
            ..Default::default()
        };

        let strict = storage.clone().with_cycle_rejection(true);
        let err = strict
            .update_subject_impl(&a.subject.id, back_edge.clone())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "requirement cycle detected");

        let lenient = storage
            .update_subject_impl(&a.subject.id, back_edge)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(lenient.requirements.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_subject_cascades_edges() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let a = storage
            .create_subject_impl(new_subject(&p.id, "A", &[]))
            .await
            .unwrap();
        let b = storage
            .create_subject_impl(new_subject(
                &p.id,
                "B",
                &[(&a.subject.id, RequirementStatus::Passed)],
            ))
            .await
            .unwrap();

        assert!(storage.delete_subject_impl(&a.subject.id).await.unwrap());
        let b = storage
            .get_subject_impl(&b.subject.id)
            .await
            .unwrap()
            .unwrap();
        assert!(b.requirements.is_empty());
        assert!(!storage.delete_subject_impl(&a.subject.id).await.unwrap());
    }
}
