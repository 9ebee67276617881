//! 选修规则存储操作

use super::SeaOrmStorage;
use super::elective_pools::find_pool;
use crate::entity::degree_programs::Entity as DegreePrograms;
use crate::entity::elective_pools::{Entity as ElectivePools, Model as ElectivePoolModel};
use crate::entity::elective_rules::{ActiveModel, Column, Entity as ElectiveRules, Model};
use crate::errors::{AcadifyError, Result};
use crate::models::elective_rules::{
    requests::{RuleFields, UpdateElectiveRuleRequest},
    responses::{ElectiveRuleDetailResponse, RulePoolSummary},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

fn into_detail(rule: Model, pool: ElectivePoolModel) -> ElectiveRuleDetailResponse {
    ElectiveRuleDetailResponse {
        rule: rule.into_elective_rule(),
        pool: RulePoolSummary {
            id: pool.id,
            name: pool.name,
        },
    }
}

impl SeaOrmStorage {
    /// 创建选修规则：选修池必须属于同一学位项目
    pub async fn create_elective_rule_impl(
        &self,
        program_id: &str,
        rule: RuleFields,
    ) -> Result<ElectiveRuleDetailResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("开启事务失败: {e}")))?;

        let program = DegreePrograms::find_by_id(program_id.to_string())
            .one(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询学位项目失败: {e}")))?;
        if program.is_none() {
            return Err(AcadifyError::not_found("Degree program not found"));
        }

        let pool = check_rule_pool(&txn, program_id, &rule.pool_id).await?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            degree_program_id: Set(program_id.to_string()),
            pool_id: Set(rule.pool_id),
            applies_from_year: Set(rule.applies_from_year),
            applies_to_year: Set(rule.applies_to_year),
            requirement_type: Set(rule.requirement_type.to_string()),
            minimum_value: Set(rule.minimum_value),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("创建选修规则失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(into_detail(created, pool))
    }

    /// 获取选修规则详情
    pub async fn get_elective_rule_impl(
        &self,
        program_id: &str,
        rule_id: &str,
    ) -> Result<Option<ElectiveRuleDetailResponse>> {
        let result = ElectiveRules::find()
            .filter(
                Condition::all()
                    .add(Column::Id.eq(rule_id))
                    .add(Column::DegreeProgramId.eq(program_id)),
            )
            .find_also_related(ElectivePools)
            .one(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询选修规则失败: {e}")))?;

        Ok(result.and_then(|(rule, pool)| pool.map(|pool| into_detail(rule, pool))))
    }

    /// 列出学位项目的选修规则
    pub async fn list_elective_rules_impl(
        &self,
        program_id: &str,
    ) -> Result<Vec<ElectiveRuleDetailResponse>> {
        let rules = ElectiveRules::find()
            .filter(Column::DegreeProgramId.eq(program_id))
            .find_also_related(ElectivePools)
            .order_by_asc(Column::AppliesFromYear)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询选修规则列表失败: {e}")))?;

        Ok(rules
            .into_iter()
            .filter_map(|(rule, pool)| pool.map(|pool| into_detail(rule, pool)))
            .collect())
    }

    /// 更新选修规则：合并后整体重新校验
    pub async fn update_elective_rule_impl(
        &self,
        program_id: &str,
        rule_id: &str,
        update: UpdateElectiveRuleRequest,
    ) -> Result<Option<ElectiveRuleDetailResponse>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = ElectiveRules::find()
            .filter(
                Condition::all()
                    .add(Column::Id.eq(rule_id))
                    .add(Column::DegreeProgramId.eq(program_id)),
            )
            .one(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("查询选修规则失败: {e}")))?
        else {
            return Ok(None);
        };

        let merged = update.merge_into(&existing.clone().into_elective_rule())?;
        let pool = check_rule_pool(&txn, program_id, &merged.pool_id).await?;

        let mut model: ActiveModel = existing.into();
        model.pool_id = Set(merged.pool_id);
        model.applies_from_year = Set(merged.applies_from_year);
        model.applies_to_year = Set(merged.applies_to_year);
        model.requirement_type = Set(merged.requirement_type.to_string());
        model.minimum_value = Set(merged.minimum_value);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("更新选修规则失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AcadifyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(into_detail(updated, pool)))
    }

    /// 删除选修规则
    pub async fn delete_elective_rule_impl(&self, program_id: &str, rule_id: &str) -> Result<bool> {
        let result = ElectiveRules::delete_many()
            .filter(
                Condition::all()
                    .add(Column::Id.eq(rule_id))
                    .add(Column::DegreeProgramId.eq(program_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AcadifyError::database_operation(format!("删除选修规则失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

/// 规则引用的选修池必须存在且属于同一学位项目
async fn check_rule_pool<C: ConnectionTrait>(
    conn: &C,
    program_id: &str,
    pool_id: &str,
) -> Result<ElectivePoolModel> {
    if let Some(pool) = find_pool(conn, program_id, pool_id).await? {
        return Ok(pool);
    }

    let exists_elsewhere = ElectivePools::find_by_id(pool_id.to_string())
        .one(conn)
        .await
        .map_err(|e| AcadifyError::database_operation(format!("查询选修池失败: {e}")))?
        .is_some();
    if exists_elsewhere {
        Err(AcadifyError::referential("pool does not belong to program"))
    } else {
        Err(AcadifyError::not_found("pool not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::programs::fixtures::program;
    use super::*;
    use crate::models::elective_pools::requests::CreateElectivePoolRequest;
    use crate::models::elective_rules::entities::RequirementType;
    use crate::models::elective_rules::requests::CreateElectiveRuleRequest;

    async fn pool_id(storage: &SeaOrmStorage, program_id: &str) -> String {
        storage
            .create_elective_pool_impl(
                program_id,
                CreateElectivePoolRequest {
                    name: "Electivas".into(),
                    description: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    fn fields(pool_id: &str) -> RuleFields {
        CreateElectiveRuleRequest {
            pool_id: pool_id.to_string(),
            applies_from_year: 3,
            applies_to_year: Some(5),
            requirement_type: "credits".into(),
            minimum_value: 12.0,
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_rule_with_pool_summary() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let pool = pool_id(&storage, &p.id).await;

        let rule = storage
            .create_elective_rule_impl(&p.id, fields(&pool))
            .await
            .unwrap();
        assert_eq!(rule.pool.id, pool);
        assert_eq!(rule.pool.name, "Electivas");
        assert_eq!(rule.rule.requirement_type, RequirementType::Credits);

        let listed = storage.list_elective_rules_impl(&p.id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_pool_from_other_program_is_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let q = program(&storage, "Q").await;
        let foreign_pool = pool_id(&storage, &q.id).await;

        let err = storage
            .create_elective_rule_impl(&p.id, fields(&foreign_pool))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "pool does not belong to program");
        assert_eq!(err.http_status(), 400);

        let err = storage
            .create_elective_rule_impl(&p.id, fields("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[tokio::test]
    async fn test_update_revalidates_merged_range() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let pool = pool_id(&storage, &p.id).await;
        let rule = storage
            .create_elective_rule_impl(&p.id, fields(&pool))
            .await
            .unwrap();

        let err = storage
            .update_elective_rule_impl(
                &p.id,
                &rule.rule.id,
                UpdateElectiveRuleRequest {
                    applies_from_year: Some(6),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "applies_to_year cannot be less than applies_from_year"
        );

        let updated = storage
            .update_elective_rule_impl(
                &p.id,
                &rule.rule.id,
                UpdateElectiveRuleRequest {
                    applies_from_year: Some(6),
                    applies_to_year: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.rule.applies_from_year, 6);
        assert_eq!(updated.rule.applies_to_year, None);
    }

    #[tokio::test]
    async fn test_delete_pool_cascades_rules() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let p = program(&storage, "P").await;
        let pool = pool_id(&storage, &p.id).await;
        let rule = storage
            .create_elective_rule_impl(&p.id, fields(&pool))
            .await
            .unwrap();

        assert!(
            storage
                .delete_elective_pool_impl(&p.id, &pool)
                .await
                .unwrap()
        );
        assert!(
            storage
                .get_elective_rule_impl(&p.id, &rule.rule.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
