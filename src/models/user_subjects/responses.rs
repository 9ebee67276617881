use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use crate::models::programs::entities::DegreeProgram;
use crate::models::subjects::entities::{
    RequirementStatus, Subject, SubjectRequirement, SubjectTerm,
};
use crate::models::user_subjects::entities::{SubjectStatus, UserSubject};

/// 先修条件引用
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/user-subject.ts")]
pub struct RequirementRef {
    pub id: String,
    pub min_status: RequirementStatus,
}

/// 合并了学生状态的科目视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/user-subject.ts")]
pub struct SubjectProgressView {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub term: SubjectTerm,
    pub is_elective: bool,
    pub status: SubjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub final_grade: Option<f64>,
    pub requirements: Vec<RequirementRef>,
}

/// 某学位项目下学生的完整进度
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user-subject.ts")]
pub struct ProgramProgressResponse {
    pub id: String,
    pub name: String,
    pub university: String,
    pub subjects: Vec<SubjectProgressView>,
}

impl ProgramProgressResponse {
    /// 合并科目定义、学生进度与先修关系
    ///
    /// 没有进度记录的科目一律视为 `available`，成绩只在有记录时返回。
    pub fn assemble(
        program: DegreeProgram,
        mut subjects: Vec<Subject>,
        progress: Vec<UserSubject>,
        edges: Vec<SubjectRequirement>,
    ) -> Self {
        let progress_by_subject: HashMap<String, UserSubject> = progress
            .into_iter()
            .map(|row| (row.subject_id.clone(), row))
            .collect();

        let mut requirements_by_subject: HashMap<String, Vec<RequirementRef>> = HashMap::new();
        for edge in edges {
            requirements_by_subject
                .entry(edge.subject_id)
                .or_default()
                .push(RequirementRef {
                    id: edge.requirement_id,
                    min_status: edge.min_status,
                });
        }

        subjects.sort_by(|a, b| {
            (a.year.unwrap_or(i32::MAX), &a.name, &a.id).cmp(&(
                b.year.unwrap_or(i32::MAX),
                &b.name,
                &b.id,
            ))
        });

        let subjects = subjects
            .into_iter()
            .map(|subject| {
                let record = progress_by_subject.get(&subject.id);
                let mut requirements = requirements_by_subject
                    .remove(&subject.id)
                    .unwrap_or_default();
                requirements.sort_by(|a, b| a.id.cmp(&b.id));

                SubjectProgressView {
                    status: record.map(|r| r.status).unwrap_or_default(),
                    final_grade: record.and_then(|r| r.final_grade),
                    id: subject.id,
                    name: subject.name,
                    year: subject.year,
                    term: subject.term,
                    is_elective: subject.is_elective,
                    requirements,
                }
            })
            .collect();

        Self {
            id: program.id,
            name: program.name,
            university: program.university,
            subjects,
        }
    }
}

/// 保存进度的响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user-subject.ts")]
pub struct SaveUserSubjectsResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> DegreeProgram {
        DegreeProgram {
            id: "p".into(),
            name: "Sistemas".into(),
            university: "UTN".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn subject(id: &str, year: Option<i32>) -> Subject {
        Subject {
            id: id.into(),
            degree_program_id: "p".into(),
            name: id.to_uppercase(),
            year,
            term: SubjectTerm::Annual,
            credits: 0.0,
            hours: 0.0,
            is_elective: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_missing_progress_defaults_to_available() {
        let view = ProgramProgressResponse::assemble(
            program(),
            vec![subject("a", Some(1)), subject("b", Some(1))],
            vec![],
            vec![],
        );
        assert_eq!(view.subjects.len(), 2);
        assert!(
            view.subjects
                .iter()
                .all(|s| s.status == SubjectStatus::Available && s.final_grade.is_none())
        );
    }

    #[test]
    fn test_progress_and_requirements_are_merged() {
        let view = ProgramProgressResponse::assemble(
            program(),
            vec![subject("b", Some(2)), subject("a", Some(1))],
            vec![UserSubject {
                user_id: "u".into(),
                subject_id: "a".into(),
                status: SubjectStatus::Passed,
                final_grade: Some(9.0),
                updated_at: chrono::Utc::now(),
            }],
            vec![SubjectRequirement {
                subject_id: "b".into(),
                requirement_id: "a".into(),
                min_status: RequirementStatus::Passed,
            }],
        );

        assert_eq!(view.subjects[0].id, "a");
        assert_eq!(view.subjects[0].status, SubjectStatus::Passed);
        assert_eq!(view.subjects[0].final_grade, Some(9.0));
        assert!(view.subjects[0].requirements.is_empty());

        assert_eq!(view.subjects[1].status, SubjectStatus::Available);
        assert_eq!(
            view.subjects[1].requirements,
            vec![RequirementRef {
                id: "a".into(),
                min_status: RequirementStatus::Passed,
            }]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let view =
            ProgramProgressResponse::assemble(program(), vec![subject("a", None)], vec![], vec![]);
        let json = serde_json::to_value(&view).unwrap();
        let first = &json["subjects"][0];
        assert_eq!(first["status"], "available");
        assert_eq!(first["isElective"], false);
        assert_eq!(first["term"], "annual");
        assert!(first.get("finalGrade").is_none());
        assert_eq!(json["university"], "UTN");
    }
}
