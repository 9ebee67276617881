use std::collections::HashSet;

use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{AcadifyError, Result};
use crate::models::user_subjects::entities::{ProgressUpdate, SubjectStatus};

/// 期末成绩取值范围
pub const MIN_FINAL_GRADE: f64 = 0.0;
pub const MAX_FINAL_GRADE: f64 = 10.0;

// 单条进度提交
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/user-subject.ts")]
pub struct SubjectProgressEntry {
    #[serde(alias = "id")]
    pub subject_id: String,
    pub status: String,
    #[serde(default)]
    pub final_grade: Option<f64>,
}

// 保存某学位项目下的全部科目进度
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user-subject.ts")]
pub struct SaveUserSubjectsRequest {
    #[serde(default)]
    pub subjects: Vec<SubjectProgressEntry>,
}

impl SaveUserSubjectsRequest {
    /// 按固定顺序逐项校验整份提交，任何一项失败即整体拒绝：
    /// 科目归属 → 状态取值 → 重复科目 → 成绩范围 → 条目上限
    pub fn validate(
        &self,
        program_subjects: &HashSet<String>,
        max_entries: usize,
    ) -> Result<Vec<ProgressUpdate>> {
        let ids: Vec<&str> = self
            .subjects
            .iter()
            .map(|entry| entry.subject_id.trim())
            .collect();

        if ids.iter().any(|id| !program_subjects.contains(*id)) {
            return Err(AcadifyError::validation("subject not in program"));
        }

        let statuses = self
            .subjects
            .iter()
            .map(|entry| entry.status.trim().parse::<SubjectStatus>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| AcadifyError::validation("invalid status"))?;

        let mut seen = HashSet::with_capacity(ids.len());
        if !ids.iter().all(|id| seen.insert(*id)) {
            return Err(AcadifyError::validation("duplicate subject"));
        }

        let grade_out_of_range = self.subjects.iter().any(|entry| {
            entry
                .final_grade
                .is_some_and(|g| !(MIN_FINAL_GRADE..=MAX_FINAL_GRADE).contains(&g))
        });
        if grade_out_of_range {
            return Err(AcadifyError::validation(format!(
                "finalGrade must be between {MIN_FINAL_GRADE} and {MAX_FINAL_GRADE}"
            )));
        }

        if self.subjects.len() > max_entries {
            return Err(AcadifyError::validation(format!(
                "too many subjects: at most {max_entries} entries per submission"
            )));
        }

        Ok(ids
            .into_iter()
            .zip(statuses)
            .zip(self.subjects.iter())
            .map(|((id, status), entry)| ProgressUpdate {
                subject_id: id.to_string(),
                status,
                final_grade: entry.final_grade,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> HashSet<String> {
        ["a", "b", "c"].iter().map(|s| s.to_string()).collect()
    }

    fn entry(id: &str, status: &str, grade: Option<f64>) -> SubjectProgressEntry {
        SubjectProgressEntry {
            subject_id: id.into(),
            status: status.into(),
            final_grade: grade,
        }
    }

    fn request(entries: Vec<SubjectProgressEntry>) -> SaveUserSubjectsRequest {
        SaveUserSubjectsRequest { subjects: entries }
    }

    #[test]
    fn test_valid_submission() {
        let updates = request(vec![
            entry("a", "passed", Some(8.0)),
            entry(" b ", "in_progress", None),
        ])
        .validate(&program(), 500)
        .unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].subject_id, "b");
        assert_eq!(updates[1].status, SubjectStatus::InProgress);
        assert_eq!(updates[0].final_grade, Some(8.0));
    }

    #[test]
    fn test_empty_submission_is_valid() {
        assert!(request(vec![]).validate(&program(), 500).unwrap().is_empty());
    }

    #[test]
    fn test_subject_outside_program() {
        let err = request(vec![entry("z", "passed", None)])
            .validate(&program(), 500)
            .unwrap_err();
        assert_eq!(err.message(), "subject not in program");
    }

    #[test]
    fn test_invalid_status() {
        let err = request(vec![entry("a", "failed", None)])
            .validate(&program(), 500)
            .unwrap_err();
        assert_eq!(err.message(), "invalid status");
    }

    #[test]
    fn test_duplicate_subject() {
        let err = request(vec![entry("a", "passed", None), entry("a ", "passed", None)])
            .validate(&program(), 500)
            .unwrap_err();
        assert_eq!(err.message(), "duplicate subject");
    }

    #[test]
    fn test_grade_bounds() {
        for grade in [-0.5, 10.01, f64::NAN] {
            assert!(
                request(vec![entry("a", "passed", Some(grade))])
                    .validate(&program(), 500)
                    .is_err()
            );
        }
        for grade in [0.0, 10.0] {
            assert!(
                request(vec![entry("a", "passed", Some(grade))])
                    .validate(&program(), 500)
                    .is_ok()
            );
        }
    }

    #[test]
    fn test_size_cap() {
        let err = request(vec![entry("a", "passed", None), entry("b", "passed", None)])
            .validate(&program(), 1)
            .unwrap_err();
        assert!(err.message().starts_with("too many subjects"));
    }

    #[test]
    fn test_membership_checked_before_status() {
        // 两个问题同时存在时，先报告科目归属
        let err = request(vec![entry("z", "bogus", None)])
            .validate(&program(), 500)
            .unwrap_err();
        assert_eq!(err.message(), "subject not in program");
    }

    #[test]
    fn test_status_checked_before_duplicates() {
        let err = request(vec![entry("a", "passed", None), entry("a", "bogus", None)])
            .validate(&program(), 500)
            .unwrap_err();
        assert_eq!(err.message(), "invalid status");
    }

    #[test]
    fn test_deserialize_accepts_id_alias() {
        let req: SaveUserSubjectsRequest = serde_json::from_str(
            r#"{"subjects": [{"id": "a", "status": "passed"}, {"subjectId": "b", "status": "final_pending", "finalGrade": 4}]}"#,
        )
        .unwrap();
        assert_eq!(req.subjects[0].subject_id, "a");
        assert_eq!(req.subjects[1].final_grade, Some(4.0));
    }
}
