//! 选修池存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::elective_pool_subjects::{
    ActiveModel as PoolSubjectActiveModel, Column as PoolSubjectColumn,
    Entity as ElectivePoolSubjects,
};
use crate::entity::elective_pools::{
    ActiveModel, Column, Entity as ElectivePools, Model as ElectivePoolModel,
};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{AcadifyError, Result};
use crate::models::elective_pools::{
    entities::{ElectivePool, ElectivePoolSubject},
    requests::{CreateElectivePoolRequest, UpdateElectivePoolRequest},
    responses::{ElectivePoolDetailResponse, PoolSubjectSummary},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建选修池
    pub async fn create_elective_pool_impl(
        &self,
        program_id: &str,
        req: CreateElectivePoolRequest,
    ) -> Result<ElectivePool> {
        if self.get_program_by_id_impl(program_id).await?.is_none() {
            return Err(AcadifyError::not_found("Degree program not found"));
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            degree_program_id: Set(program_id.to_string()),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("创建选修池失败: {e}")))?;

        Ok(result.into_elective_pool())
    }

    /// 获取选修池详情
    pub async fn get_elective_pool_impl(
        &self,
        program_id: &str,
        pool_id: &str,
    ) -> Result<Option<ElectivePoolDetailResponse>> {
        match find_pool(&self.db, program_id, pool_id).await? {
            Some(pool) => Ok(self.build_pool_details(vec![pool]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 列出学位项目的选修池
    pub async fn list_elective_pools_impl(
        &self,
        program_id: &str,
    ) -> Result<Vec<ElectivePoolDetailResponse>> {
        let pools = ElectivePools::find()
            .filter(Column::DegreeProgramId.eq(program_id))
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询选修池列表失败: {e}")))?;

        self.build_pool_details(pools).await
    }

    /// 更新选修池
    pub async fn update_elective_pool_impl(
        &self,
        program_id: &str,
        pool_id: &str,
        update: UpdateElectivePoolRequest,
    ) -> Result<Option<ElectivePool>> {
        let Some(pool) = find_pool(&self.db, program_id, pool_id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = pool.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("更新选修池失败: {e}")))?;

        Ok(Some(result.into_elective_pool()))
    }

    /// 删除选修池（级联删除关联与规则）
    pub async fn delete_elective_pool_impl(&self, program_id: &str, pool_id: &str) -> Result<bool> {
        let result = ElectivePools::delete_many()
            .filter(
                Condition::all()
                    .add(Column::Id.eq(pool_id))
                    .add(Column::DegreeProgramId.eq(program_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("删除选修池失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 向选修池添加科目：科目必须属于选修池所在的学位项目，重复添加视为冲突
    pub async fn add_subject_to_pool_impl(
        &self,
        program_id: &str,
        pool_id: &str,
        subject_id: &str,
    ) -> Result<ElectivePoolSubject> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("开启事务失败: {e}")))?;

        if find_pool(&txn, program_id, pool_id).await?.is_none() {
            return Err(AcadifyError::not_found("Elective pool not found"));
        }

        let subject = Subjects::find_by_id(subject_id.to_string())
            .one(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询科目失败: {e}")))?
            .ok_or_else(|| AcadifyError::not_found("Subject not found"))?;
        if subject.degree_program_id != program_id {
            return Err(AcadifyError::referential("subject not in program"));
        }

        let existing = ElectivePoolSubjects::find()
            .filter(
                Condition::all()
                    .add(PoolSubjectColumn::ElectivePoolId.eq(pool_id))
                    .add(PoolSubjectColumn::SubjectId.eq(subject_id)),
            )
            .one(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询选修池关联失败: {e}")))?;
        if existing.is_some() {
            return Err(AcadifyError::conflict("subject already in pool"));
        }

        let link = PoolSubjectActiveModel {
            elective_pool_id: Set(pool_id.to_string()),
            subject_id: Set(subject_id.to_string()),
        };
        ElectivePoolSubjects::insert(link)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AcadifyError::conflict("subject already in pool")
                }
                _ => AcadifyError::database_operation(format!("添加选修池科目失败: {e}")),
            })?;

        txn.commit()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(ElectivePoolSubject {
            elective_pool_id: pool_id.to_string(),
            subject_id: subject_id.to_string(),
        })
    }

    /// 从选修池移除科目
    pub async fn remove_subject_from_pool_impl(
        &self,
        program_id: &str,
        pool_id: &str,
        subject_id: &str,
    ) -> Result<bool> {
        if find_pool(&self.db, program_id, pool_id).await?.is_none() {
            return Ok(false);
        }

        let result = ElectivePoolSubjects::delete_many()
            .filter(
                Condition::all()
                    .add(PoolSubjectColumn::ElectivePoolId.eq(pool_id))
                    .add(PoolSubjectColumn::SubjectId.eq(subject_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("移除选修池科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn build_pool_details(
        &self,
        pools: Vec<ElectivePoolModel>,
    ) -> Result<Vec<ElectivePoolDetailResponse>> {
        if pools.is_empty() {
            return Ok(Vec::new());
        }

        let pool_ids: Vec<String> = pools.iter().map(|p| p.id.clone()).collect();
        let links = ElectivePoolSubjects::find()
            .filter(PoolSubjectColumn::ElectivePoolId.is_in(pool_ids))
            .find_also_related(Subjects)
            .order_by_asc(SubjectColumn::Year)
            .order_by_asc(SubjectColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询选修池科目失败: {e}")))?;

        let mut by_pool: HashMap<String, Vec<PoolSubjectSummary>> = HashMap::new();
        for (link, subject) in links {
            if let Some(subject) = subject {
                by_pool
                    .entry(link.elective_pool_id)
                    .or_default()
                    .push(PoolSubjectSummary {
                        id: subject.id,
                        name: subject.name,
                        year: subject.year,
                        credits: subject.credits,
                        hours: subject.hours,
                    });
            }
        }

        Ok(pools
            .into_iter()
            .map(|pool| {
                let subjects = by_pool.remove(&pool.id).unwrap_or_default();
                ElectivePoolDetailResponse {
                    pool: pool.into_elective_pool(),
                    subjects,
                }
            })
            .collect())
    }
}

/// 查找属于指定学位项目的选修池
pub(super) async fn find_pool<C: ConnectionTrait>(
    conn: &C,
    program_id: &str,
    pool_id: &str,
) -> Result<Option<ElectivePoolModel>> {
    ElectivePools::find()
        .filter(
            Condition::all()
                .add(Column::Id.eq(pool_id))
                .add(Column::DegreeProgramId.eq(program_id)),
        )
        .one(conn)
        .await
        .map_err(|e| AcadifyError::database_operation(format!("查询选修池失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::super::programs::fixtures::program;
    use super::*;
    use crate::models::subjects::{entities::SubjectTerm, requests::NewSubject};
    use sea_orm::PaginatorTrait;

    async fn subject(storage: &SeaOrmStorage, program_id: &str, name: &str) -> String {
        storage
            .create_subject_impl(NewSubject {
                name: name.to_string(),
                year: Some(3),
                degree_program_id: program_id.to_string(),
                term: SubjectTerm::Semester,
                credits: 4.0,
                hours: 64.0,
                is_elective: true,
                requirements: vec![],
            })
            .await
            .unwrap()
            .subject
            .id
    }

    async fn pool(storage: &SeaOrmStorage, program_id: &str) -> ElectivePool {
        storage
            .create_elective_pool_impl(
                program_id,
                CreateElectivePoolRequest {
                    name: "Electivas".into(),
                    description: Some("Optativas de 3er año".into()),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_pool_requires_program() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let err = storage
            .create_elective_pool_impl(
                "missing",
                CreateElectivePoolRequest {
                    name: "X".into(),
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[tokio::test]
    async fn test_duplicate_pool_link_conflicts_and_keeps_one_row() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let s = subject(&storage, &p.id, "Redes").await;
        let pool = pool(&storage, &p.id).await;

        storage
            .add_subject_to_pool_impl(&p.id, &pool.id, &s)
            .await
            .unwrap();
        let err = storage
            .add_subject_to_pool_impl(&p.id, &pool.id, &s)
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 409);

        let links = ElectivePoolSubjects::find()
            .filter(PoolSubjectColumn::ElectivePoolId.eq(pool.id.as_str()))
            .count(&storage.db)
            .await
            .unwrap();
        assert_eq!(links, 1);

        let detail = storage
            .get_elective_pool_impl(&p.id, &pool.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.subjects.len(), 1);
        assert_eq!(detail.subjects[0].name, "Redes");
    }

    #[tokio::test]
    async fn test_subject_from_other_program_is_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let foreign = subject(&storage, &q.id, "Foreign").await;
        let pool = pool(&storage, &p.id).await;

        let err = storage
            .add_subject_to_pool_impl(&p.id, &pool.id, &foreign)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "subject not in program");
        assert_eq!(err.http_status(), 400);
    }

    #[tokio::test]
    async fn test_remove_missing_link_returns_false() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let s = subject(&storage, &p.id, "Redes").await;
        let pool = pool(&storage, &p.id).await;

        assert!(
            !storage
                .remove_subject_from_pool_impl(&p.id, &pool.id, &s)
                .await
                .unwrap()
        );
        storage
            .add_subject_to_pool_impl(&p.id, &pool.id, &s)
            .await
            .unwrap();
        assert!(
            storage
                .remove_subject_from_pool_impl(&p.id, &pool.id, &s)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_pool_is_scoped_to_program() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let pool = pool(&storage, &p.id).await;

        assert!(
            storage
                .get_elective_pool_impl(&q.id, &pool.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            !storage
                .delete_elective_pool_impl(&q.id, &pool.id)
                .await
                .unwrap()
        );
        assert!(
            storage
                .delete_elective_pool_impl(&p.id, &pool.id)
                .await
                .unwrap()
        );
        assert!(
            storage
                .list_elective_pools_impl(&p.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_update_pool_partial() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let pool = pool(&storage, &p.id).await;

        let updated = storage
            .update_elective_pool_impl(
                &p.id,
                &pool.id,
                UpdateElectivePoolRequest {
                    name: Some("Renamed".into()),
                    description: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.description, pool.description);
    }
}
