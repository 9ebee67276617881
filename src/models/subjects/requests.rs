use std::collections::HashSet;

use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{AcadifyError, Result};
use crate::models::subjects::entities::{RequirementStatus, SubjectTerm};
use crate::utils::validate::{
    MAX_NAME_LEN, validate_id, validate_non_negative, validate_optional_string,
    validate_required_string,
};

// 先修条件输入
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct RequirementInput {
    pub id: String,
    #[serde(default)]
    pub min_status: Option<String>,
}

/// 解析后的先修条件
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequirement {
    pub requirement_id: String,
    pub min_status: RequirementStatus,
}

/// 解析整份先修列表：校验 ID、解析最低状态（缺省为 passed）、拒绝重复
pub fn resolve_requirements(inputs: &[RequirementInput]) -> Result<Vec<ResolvedRequirement>> {
    let mut seen = HashSet::with_capacity(inputs.len());
    let mut resolved = Vec::with_capacity(inputs.len());

    for input in inputs {
        let requirement_id = validate_id(&input.id, "requirement id")?;
        let min_status = match input.min_status.as_deref().map(str::trim) {
            None | Some("") => RequirementStatus::default(),
            Some(raw) => raw
                .parse::<RequirementStatus>()
                .map_err(|_| AcadifyError::validation("invalid requirement status"))?,
        };
        if !seen.insert(requirement_id.clone()) {
            return Err(AcadifyError::validation("duplicate requirement"));
        }
        resolved.push(ResolvedRequirement {
            requirement_id,
            min_status,
        });
    }

    Ok(resolved)
}

fn parse_term(raw: &str) -> Result<SubjectTerm> {
    raw.trim()
        .parse::<SubjectTerm>()
        .map_err(|_| AcadifyError::validation("invalid term"))
}

fn validate_year(year: i32) -> Result<i32> {
    if year <= 0 {
        return Err(AcadifyError::validation("year must be greater than 0"));
    }
    Ok(year)
}

// 创建科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub year: Option<i32>,
    #[serde(rename = "degreeProgramID", alias = "degreeProgramId")]
    pub degree_program_id: String,
    pub term: Option<String>,
    pub credits: Option<f64>,
    pub hours: Option<f64>,
    pub is_elective: Option<bool>,
    #[serde(default)]
    pub requirements: Vec<RequirementInput>,
}

/// 通过校验的新科目
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub year: Option<i32>,
    pub degree_program_id: String,
    pub term: SubjectTerm,
    pub credits: f64,
    pub hours: f64,
    pub is_elective: bool,
    pub requirements: Vec<ResolvedRequirement>,
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> Result<NewSubject> {
        Ok(NewSubject {
            name: validate_required_string(&self.name, "name", MAX_NAME_LEN)?,
            year: self.year.map(validate_year).transpose()?,
            degree_program_id: validate_id(&self.degree_program_id, "degreeProgramID")?,
            term: match self.term.as_deref() {
                Some(raw) => parse_term(raw)?,
                None => SubjectTerm::default(),
            },
            credits: validate_non_negative(self.credits.unwrap_or(0.0), "credits")?,
            hours: validate_non_negative(self.hours.unwrap_or(0.0), "hours")?,
            is_elective: self.is_elective.unwrap_or(false),
            requirements: resolve_requirements(&self.requirements)?,
        })
    }
}

// 更新科目请求（requirements 给出时整体替换，空数组表示清空）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "degreeProgramID", alias = "degreeProgramId")]
    pub degree_program_id: Option<String>,
    pub term: Option<String>,
    pub credits: Option<f64>,
    pub hours: Option<f64>,
    pub is_elective: Option<bool>,
    pub requirements: Option<Vec<RequirementInput>>,
}

/// 通过校验的科目变更
#[derive(Debug, Clone, Default)]
pub struct SubjectChanges {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub degree_program_id: Option<String>,
    pub term: Option<SubjectTerm>,
    pub credits: Option<f64>,
    pub hours: Option<f64>,
    pub is_elective: Option<bool>,
    pub requirements: Option<Vec<ResolvedRequirement>>,
}

impl UpdateSubjectRequest {
    pub fn validate(&self) -> Result<SubjectChanges> {
        let degree_program_id = match self.degree_program_id.as_deref() {
            Some(raw) => Some(validate_id(raw, "degreeProgramID")?),
            None => None,
        };

        Ok(SubjectChanges {
            name: validate_optional_string(self.name.as_deref(), "name", MAX_NAME_LEN)?,
            year: self.year.map(validate_year).transpose()?,
            degree_program_id,
            term: self.term.as_deref().map(parse_term).transpose()?,
            credits: self
                .credits
                .map(|v| validate_non_negative(v, "credits"))
                .transpose()?,
            hours: self
                .hours
                .map(|v| validate_non_negative(v, "hours"))
                .transpose()?,
            is_elective: self.is_elective,
            requirements: self
                .requirements
                .as_deref()
                .map(resolve_requirements)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(id: &str, min_status: Option<&str>) -> RequirementInput {
        RequirementInput {
            id: id.to_string(),
            min_status: min_status.map(str::to_string),
        }
    }

    #[test]
    fn test_min_status_defaults_to_passed() {
        let resolved = resolve_requirements(&[req("a", None), req("b", Some(""))]).unwrap();
        assert!(
            resolved
                .iter()
                .all(|r| r.min_status == RequirementStatus::Passed)
        );
    }

    #[test]
    fn test_final_pending_is_accepted() {
        let resolved = resolve_requirements(&[req(" a ", Some("final_pending"))]).unwrap();
        assert_eq!(
            resolved,
            vec![ResolvedRequirement {
                requirement_id: "a".into(),
                min_status: RequirementStatus::FinalPending,
            }]
        );
    }

    #[test]
    fn test_invalid_min_status_rejected() {
        let err = resolve_requirements(&[req("a", Some("in_progress"))]).unwrap_err();
        assert_eq!(err.message(), "invalid requirement status");
    }

    #[test]
    fn test_duplicate_requirement_rejected() {
        let err = resolve_requirements(&[req("a", None), req(" a", Some("final_pending"))])
            .unwrap_err();
        assert_eq!(err.message(), "duplicate requirement");
    }

    #[test]
    fn test_create_request_from_json() {
        let json = r#"{
            "name": "Análisis Matemático II",
            "year": 2,
            "degreeProgramID": "prog-1",
            "requirements": [{"id": "am1"}, {"id": "aga", "minStatus": "final_pending"}]
        }"#;
        let parsed: CreateSubjectRequest = serde_json::from_str(json).unwrap();
        let subject = parsed.validate().unwrap();
        assert_eq!(subject.term, SubjectTerm::Annual);
        assert_eq!(subject.requirements.len(), 2);
        assert!(!subject.is_elective);
    }

    #[test]
    fn test_create_request_rejects_bad_term() {
        let parsed = CreateSubjectRequest {
            name: "Física".into(),
            year: None,
            degree_program_id: "p".into(),
            term: Some("weekly".into()),
            credits: None,
            hours: None,
            is_elective: None,
            requirements: vec![],
        };
        assert_eq!(parsed.validate().unwrap_err().message(), "invalid term");
    }

    #[test]
    fn test_update_rejects_empty_program_id() {
        let update = UpdateSubjectRequest {
            degree_program_id: Some("  ".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_empty_requirements_means_clear() {
        let update: UpdateSubjectRequest = serde_json::from_str(r#"{"requirements": []}"#).unwrap();
        let changes = update.validate().unwrap();
        assert_eq!(changes.requirements, Some(vec![]));

        let untouched: UpdateSubjectRequest = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert_eq!(untouched.validate().unwrap().requirements, None);
    }
}
