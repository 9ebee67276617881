//! 学习进度存储操作
//!
//! 同步在单个事务内完成：裁剪本学位项目中未提交的科目，再逐条 upsert 提交的科目。

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::user_subjects::{ActiveModel, Column, Entity as UserSubjects};
use crate::errors::{AcadifyError, Result};
use crate::models::user_subjects::entities::{ProgressUpdate, SyncOutcome, UserSubject};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 学位项目的全部科目 ID
    pub async fn list_program_subject_ids_impl(&self, program_id: &str) -> Result<Vec<String>> {
        program_subject_ids(&self.db, program_id).await
    }

    /// 用户在该学位项目内的进度行
    pub async fn list_user_subjects_in_program_impl(
        &self,
        user_id: &str,
        program_id: &str,
    ) -> Result<Vec<UserSubject>> {
        let rows = UserSubjects::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                crate::entity::user_subjects::Relation::Subject.def(),
            )
            .filter(Column::UserId.eq(user_id))
            .filter(SubjectColumn::DegreeProgramId.eq(program_id))
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询学习进度失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_user_subject()).collect())
    }

    /// 同步学习进度
    ///
    /// 提交后，该用户在该学位项目范围内的进度行与提交内容完全一致：
    /// 未提交的科目被删除，提交的科目被插入或更新；未提交成绩的条目沿用已有成绩。
    /// 其他学位项目的进度行不受影响。
    pub async fn sync_user_subjects_impl(
        &self,
        user_id: &str,
        program_id: &str,
        updates: Vec<ProgressUpdate>,
    ) -> Result<SyncOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("开启事务失败: {e}")))?;

        let program_subjects: HashSet<String> = program_subject_ids(&txn, program_id)
            .await?
            .into_iter()
            .collect();
        if updates
            .iter()
            .any(|u| !program_subjects.contains(&u.subject_id))
        {
            return Err(AcadifyError::validation("subject not in program"));
        }

        // 只为未提交成绩的科目查询已有成绩
        let without_grade: Vec<String> = updates
            .iter()
            .filter(|u| u.final_grade.is_none())
            .map(|u| u.subject_id.clone())
            .collect();
        let carried: HashMap<String, f64> = if without_grade.is_empty() {
            HashMap::new()
        } else {
            UserSubjects::find()
                .filter(Column::UserId.eq(user_id))
                .filter(Column::SubjectId.is_in(without_grade))
                .all(&txn)
                .await
                .map_err(|e| AcadifyError::database_operation(format!("查询已有成绩失败: {e}")))?
                .into_iter()
                .filter_map(|m| m.final_grade.map(|grade| (m.subject_id, grade)))
                .collect()
        };

        let submitted: HashSet<&str> = updates.iter().map(|u| u.subject_id.as_str()).collect();
        let stale: Vec<String> = program_subjects
            .iter()
            .filter(|id| !submitted.contains(id.as_str()))
            .cloned()
            .collect();
        let pruned = if stale.is_empty() {
            0
        } else {
            UserSubjects::delete_many()
                .filter(Column::UserId.eq(user_id))
                .filter(Column::SubjectId.is_in(stale))
                .exec(&txn)
                .await
                .map_err(|e| AcadifyError::database_operation(format!("清理学习进度失败: {e}")))?
                .rows_affected
        };

        let now = chrono::Utc::now().timestamp();
        for update in &updates {
            let final_grade = update
                .final_grade
                .or_else(|| carried.get(&update.subject_id).copied());
            let row = ActiveModel {
                user_id: Set(user_id.to_string()),
                subject_id: Set(update.subject_id.clone()),
                status: Set(update.status.to_string()),
                final_grade: Set(final_grade),
                updated_at: Set(now),
            };

            UserSubjects::insert(row)
                .on_conflict(
                    OnConflict::columns([Column::UserId, Column::SubjectId])
                        .update_columns([Column::Status, Column::FinalGrade, Column::UpdatedAt])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| AcadifyError::database_operation(format!("写入学习进度失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("提交事务失败: {e}")))?;

        debug!(
            "同步学习进度完成: user={}, program={}, upserted={}, pruned={}",
            user_id,
            program_id,
            updates.len(),
            pruned
        );

        Ok(SyncOutcome {
            upserted: updates.len(),
            pruned,
        })
    }
}

async fn program_subject_ids<C: ConnectionTrait>(
    conn: &C,
    program_id: &str,
) -> Result<Vec<String>> {
    Subjects::find()
        .select_only()
        .column(SubjectColumn::Id)
        .filter(SubjectColumn::DegreeProgramId.eq(program_id))
        .order_by_asc(SubjectColumn::Id)
        .into_tuple::<String>()
        .all(conn)
        .await
        .map_err(|e| AcadifyError::database_operation(format!("查询学位项目科目失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::super::programs::fixtures::{program, student};
    use super::*;
    use crate::models::subjects::{
        entities::{RequirementStatus, SubjectTerm},
        requests::{NewSubject, ResolvedRequirement},
    };
    use crate::models::user_subjects::entities::SubjectStatus;

    async fn subject(
        storage: &SeaOrmStorage,
        program_id: &str,
        name: &str,
        requires: &[&str],
    ) -> String {
        storage
            .create_subject_impl(NewSubject {
                name: name.to_string(),
                year: Some(1),
                degree_program_id: program_id.to_string(),
                term: SubjectTerm::Annual,
                credits: 0.0,
                hours: 0.0,
                is_elective: false,
                requirements: requires
                    .iter()
                    .map(|id| ResolvedRequirement {
                        requirement_id: id.to_string(),
                        min_status: RequirementStatus::Passed,
                    })
                    .collect(),
            })
            .await
            .unwrap()
            .subject
            .id
    }

    fn update(subject_id: &str, status: SubjectStatus, grade: Option<f64>) -> ProgressUpdate {
        ProgressUpdate {
            subject_id: subject_id.to_string(),
            status,
            final_grade: grade,
        }
    }

    async fn snapshot(
        storage: &SeaOrmStorage,
        user_id: &str,
        program_id: &str,
    ) -> Vec<(String, SubjectStatus, Option<f64>)> {
        storage
            .list_user_subjects_in_program_impl(user_id, program_id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.subject_id, r.status, r.final_grade))
            .collect()
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let u = student(&storage, "s@uni.edu").await;
        let a = subject(&storage, &p.id, "A", &[]).await;
        let b = subject(&storage, &p.id, "B", &[]).await;

        let payload = vec![
            update(&a, SubjectStatus::Passed, Some(8.0)),
            update(&b, SubjectStatus::InProgress, None),
        ];
        storage
            .sync_user_subjects_impl(&u.id, &p.id, payload.clone())
            .await
            .unwrap();
        let first = snapshot(&storage, &u.id, &p.id).await;
        let outcome = storage
            .sync_user_subjects_impl(&u.id, &p.id, payload)
            .await
            .unwrap();
        let second = snapshot(&storage, &u.id, &p.id).await;

        assert_eq!(first, second);
        assert_eq!(outcome, SyncOutcome { upserted: 2, pruned: 0 });
    }

    #[tokio::test]
    async fn test_omitted_subject_is_pruned() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let u = student(&storage, "s@uni.edu").await;
        let a = subject(&storage, &p.id, "A", &[]).await;
        let b = subject(&storage, &p.id, "B", &[]).await;

        storage
            .sync_user_subjects_impl(
                &u.id,
                &p.id,
                vec![
                    update(&a, SubjectStatus::InProgress, None),
                    update(&b, SubjectStatus::InProgress, None),
                ],
            )
            .await
            .unwrap();
        let outcome = storage
            .sync_user_subjects_impl(&u.id, &p.id, vec![update(&a, SubjectStatus::Passed, None)])
            .await
            .unwrap();

        assert_eq!(outcome.pruned, 1);
        assert_eq!(
            snapshot(&storage, &u.id, &p.id).await,
            vec![(a, SubjectStatus::Passed, None)]
        );
    }

    #[tokio::test]
    async fn test_omitted_grade_is_carried_forward() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let u = student(&storage, "s@uni.edu").await;
        let x = subject(&storage, &p.id, "X", &[]).await;

        storage
            .sync_user_subjects_impl(
                &u.id,
                &p.id,
                vec![update(&x, SubjectStatus::FinalPending, Some(7.0))],
            )
            .await
            .unwrap();
        storage
            .sync_user_subjects_impl(&u.id, &p.id, vec![update(&x, SubjectStatus::Passed, None)])
            .await
            .unwrap();

        assert_eq!(
            snapshot(&storage, &u.id, &p.id).await,
            vec![(x.clone(), SubjectStatus::Passed, Some(7.0))]
        );

        // 显式提交的成绩覆盖旧值
        storage
            .sync_user_subjects_impl(
                &u.id,
                &p.id,
                vec![update(&x, SubjectStatus::PassedWithDistinction, Some(9.5))],
            )
            .await
            .unwrap();
        assert_eq!(
            snapshot(&storage, &u.id, &p.id).await,
            vec![(x, SubjectStatus::PassedWithDistinction, Some(9.5))]
        );
    }

    #[tokio::test]
    async fn test_empty_submission_clears_only_this_program() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let u = student(&storage, "s@uni.edu").await;
        let a = subject(&storage, &p.id, "A", &[]).await;
        let b = subject(&storage, &p.id, "B", &[]).await;
        let c = subject(&storage, &q.id, "C", &[]).await;

        storage
            .sync_user_subjects_impl(
                &u.id,
                &p.id,
                vec![
                    update(&a, SubjectStatus::Passed, None),
                    update(&b, SubjectStatus::InProgress, None),
                ],
            )
            .await
            .unwrap();
        storage
            .sync_user_subjects_impl(
                &u.id,
                &q.id,
                vec![update(&c, SubjectStatus::Passed, Some(6.0))],
            )
            .await
            .unwrap();

        let outcome = storage
            .sync_user_subjects_impl(&u.id, &p.id, vec![])
            .await
            .unwrap();
        assert_eq!(outcome.pruned, 2);
        assert!(snapshot(&storage, &u.id, &p.id).await.is_empty());
        assert_eq!(
            snapshot(&storage, &u.id, &q.id).await,
            vec![(c, SubjectStatus::Passed, Some(6.0))]
        );
    }

    #[tokio::test]
    async fn test_other_students_are_untouched() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let alice = student(&storage, "alice@uni.edu").await;
        let bob = student(&storage, "bob@uni.edu").await;
        let a = subject(&storage, &p.id, "A", &[]).await;

        storage
            .sync_user_subjects_impl(&bob.id, &p.id, vec![update(&a, SubjectStatus::Passed, None)])
            .await
            .unwrap();
        storage
            .sync_user_subjects_impl(&alice.id, &p.id, vec![])
            .await
            .unwrap();

        assert_eq!(snapshot(&storage, &bob.id, &p.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_foreign_subject_rejects_whole_submission() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let u = student(&storage, "s@uni.edu").await;
        let a = subject(&storage, &p.id, "A", &[]).await;
        let foreign = subject(&storage, &q.id, "F", &[]).await;

        storage
            .sync_user_subjects_impl(
                &u.id,
                &p.id,
                vec![update(&a, SubjectStatus::InProgress, None)],
            )
            .await
            .unwrap();
        let err = storage
            .sync_user_subjects_impl(
                &u.id,
                &p.id,
                vec![update(&foreign, SubjectStatus::Passed, None)],
            )
            .await
            .unwrap_err();
        assert_eq!(err.message(), "subject not in program");

        // 未裁剪任何行
        assert_eq!(snapshot(&storage, &u.id, &p.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_program_subject_ids() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let a = subject(&storage, &p.id, "A", &[]).await;
        let b = subject(&storage, &p.id, "B", &[&a]).await;

        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(storage.list_program_subject_ids_impl(&p.id).await.unwrap(), expected);
    }
}
