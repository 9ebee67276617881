use serde::Serialize;
use ts_rs::TS;

use crate::models::elective_rules::entities::ElectiveRule;

/// 规则所属选修池摘要
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-rule.ts")]
pub struct RulePoolSummary {
    pub id: String,
    pub name: String,
}

/// 选修规则详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-rule.ts")]
pub struct ElectiveRuleDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub rule: ElectiveRule,
    pub pool: RulePoolSummary,
}

/// 选修规则列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-rule.ts")]
pub struct ElectiveRuleListResponse {
    pub items: Vec<ElectiveRuleDetailResponse>,
}
