use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use crate::errors::{AcadifyError, Result};
use crate::models::elective_rules::entities::{ElectiveRule, RequirementType};
use crate::utils::validate::validate_id;

// 区分「字段缺失」与「显式 null」
fn deserialize_some<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn parse_requirement_type(raw: &str) -> Result<RequirementType> {
    raw.trim()
        .parse::<RequirementType>()
        .map_err(|_| AcadifyError::validation("invalid requirement_type"))
}

fn check_from_year(from: i32) -> Result<i32> {
    if from <= 0 {
        return Err(AcadifyError::validation(
            "applies_from_year must be greater than 0",
        ));
    }
    Ok(from)
}

fn check_minimum_value(value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AcadifyError::validation(
            "minimum_value must be greater than 0",
        ));
    }
    Ok(value)
}

fn check_year_range(from: i32, to: Option<i32>) -> Result<()> {
    if let Some(to) = to
        && to < from
    {
        return Err(AcadifyError::validation(
            "applies_to_year cannot be less than applies_from_year",
        ));
    }
    Ok(())
}

/// 规则的可写字段（已校验）
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFields {
    pub pool_id: String,
    pub applies_from_year: i32,
    pub applies_to_year: Option<i32>,
    pub requirement_type: RequirementType,
    pub minimum_value: f64,
}

// 创建选修规则请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-rule.ts")]
pub struct CreateElectiveRuleRequest {
    pub pool_id: String,
    pub applies_from_year: i32,
    pub applies_to_year: Option<i32>,
    pub requirement_type: String,
    pub minimum_value: f64,
}

impl CreateElectiveRuleRequest {
    pub fn validate(&self) -> Result<RuleFields> {
        let pool_id = validate_id(&self.pool_id, "pool_id")?;
        let applies_from_year = check_from_year(self.applies_from_year)?;
        check_year_range(applies_from_year, self.applies_to_year)?;
        let minimum_value = check_minimum_value(self.minimum_value)?;
        let requirement_type = parse_requirement_type(&self.requirement_type)?;

        Ok(RuleFields {
            pool_id,
            applies_from_year,
            applies_to_year: self.applies_to_year,
            requirement_type,
            minimum_value,
        })
    }
}

// 更新选修规则请求（部分字段）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-rule.ts")]
pub struct UpdateElectiveRuleRequest {
    pub pool_id: Option<String>,
    pub applies_from_year: Option<i32>,
    // null 表示清除上限（不限年份）
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub applies_to_year: Option<Option<i32>>,
    pub requirement_type: Option<String>,
    pub minimum_value: Option<f64>,
}

impl UpdateElectiveRuleRequest {
    /// 合并到已有规则并整体校验
    pub fn merge_into(&self, existing: &ElectiveRule) -> Result<RuleFields> {
        let pool_id = match self.pool_id.as_deref() {
            Some(raw) => validate_id(raw, "pool_id")?,
            None => existing.pool_id.clone(),
        };
        let applies_from_year =
            check_from_year(self.applies_from_year.unwrap_or(existing.applies_from_year))?;
        let applies_to_year = match self.applies_to_year {
            Some(to) => to,
            None => existing.applies_to_year,
        };
        check_year_range(applies_from_year, applies_to_year)?;
        let minimum_value =
            check_minimum_value(self.minimum_value.unwrap_or(existing.minimum_value))?;
        let requirement_type = match self.requirement_type.as_deref() {
            Some(raw) => parse_requirement_type(raw)?,
            None => existing.requirement_type,
        };

        Ok(RuleFields {
            pool_id,
            applies_from_year,
            applies_to_year,
            requirement_type,
            minimum_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(from: i32, to: Option<i32>, kind: &str, min: f64) -> CreateElectiveRuleRequest {
        CreateElectiveRuleRequest {
            pool_id: "pool-1".into(),
            applies_from_year: from,
            applies_to_year: to,
            requirement_type: kind.into(),
            minimum_value: min,
        }
    }

    fn existing() -> ElectiveRule {
        ElectiveRule {
            id: "rule-1".into(),
            degree_program_id: "prog-1".into(),
            pool_id: "pool-1".into(),
            applies_from_year: 3,
            applies_to_year: Some(5),
            requirement_type: RequirementType::Credits,
            minimum_value: 10.0,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_inverted_year_range_rejected() {
        let err = create(4, Some(3), "hours", 1.0).validate().unwrap_err();
        assert_eq!(
            err.message(),
            "applies_to_year cannot be less than applies_from_year"
        );
    }

    #[test]
    fn test_open_ended_range_accepted() {
        let fields = create(2, None, "subject_count", 3.0).validate().unwrap();
        assert_eq!(fields.applies_to_year, None);
        assert_eq!(fields.requirement_type, RequirementType::SubjectCount);
    }

    #[test]
    fn test_non_positive_values_rejected() {
        assert!(create(0, None, "hours", 1.0).validate().is_err());
        assert!(create(1, None, "hours", 0.0).validate().is_err());
        assert!(create(1, None, "hours", -2.0).validate().is_err());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = create(1, None, "grades", 1.0).validate().unwrap_err();
        assert_eq!(err.message(), "invalid requirement_type");
    }

    #[test]
    fn test_update_merges_and_revalidates_range() {
        let update = UpdateElectiveRuleRequest {
            applies_from_year: Some(6),
            ..Default::default()
        };
        assert!(update.merge_into(&existing()).is_err());

        let update = UpdateElectiveRuleRequest {
            minimum_value: Some(12.5),
            ..Default::default()
        };
        let merged = update.merge_into(&existing()).unwrap();
        assert_eq!(merged.minimum_value, 12.5);
        assert_eq!(merged.applies_to_year, Some(5));
    }

    #[test]
    fn test_update_null_clears_upper_bound() {
        let update: UpdateElectiveRuleRequest =
            serde_json::from_str(r#"{"applies_to_year": null, "applies_from_year": 7}"#).unwrap();
        let merged = update.merge_into(&existing()).unwrap();
        assert_eq!(merged.applies_to_year, None);
        assert_eq!(merged.applies_from_year, 7);

        let absent: UpdateElectiveRuleRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.applies_to_year, None);
    }
}
